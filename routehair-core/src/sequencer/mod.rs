//! Visit-order sequencing for a bounded selection of locations.
//!
//! [`NearestNeighbourSequencer`] builds a route greedily: from the current
//! position it always travels to the closest unvisited location. Selection is
//! O(n²), which is fine for the five to ten stops the
//! [`SelectionPolicy`](crate::SelectionPolicy) admits.

use geo::Coord;
use thiserror::Error;

use crate::{Location, OptimizationResult, RouteStop, haversine_km};

/// What the sequencer should minimise when choosing the next stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptimizationMode {
    /// Shortest great-circle hop.
    #[default]
    Distance,
    /// Shortest estimated travel time; hops are weighted before comparison.
    Time,
}

/// Error returned when parsing an unknown [`OptimizationMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown optimisation mode '{0}' (expected 'distance' or 'time')")]
pub struct UnknownMode(pub String);

impl OptimizationMode {
    /// Return the mode as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Time => "time",
        }
    }
}

impl std::fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OptimizationMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "time" => Ok(Self::Time),
            _ => Err(UnknownMode(s.to_owned())),
        }
    }
}

/// Calibration constants for [`NearestNeighbourSequencer`].
///
/// The defaults are tuned to the route shapes the nearest-neighbour
/// heuristic produces in dense urban districts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Average travel speed used to turn distance into minutes.
    pub average_speed_kmh: f64,
    /// Fixed time spent at each stop, in minutes.
    pub dwell_minutes: u32,
    /// Multiplier applied to candidate distances in [`OptimizationMode::Time`].
    pub time_mode_weight: f64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
            dwell_minutes: 10,
            time_mode_weight: 1.2,
        }
    }
}

/// Errors returned by [`SequencerConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SequencerConfigError {
    /// The average speed was zero, negative or not finite.
    #[error("average speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),
    /// The time-mode weight was zero, negative or not finite.
    #[error("time mode weight must be positive, got {0}")]
    InvalidWeight(f64),
}

impl SequencerConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`SequencerConfigError`] when the speed or weight is not a
    /// positive finite number.
    pub fn validate(self) -> Result<Self, SequencerConfigError> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(SequencerConfigError::InvalidSpeed(self.average_speed_kmh));
        }
        if !(self.time_mode_weight.is_finite() && self.time_mode_weight > 0.0) {
            return Err(SequencerConfigError::InvalidWeight(self.time_mode_weight));
        }
        Ok(self)
    }

    /// Weight applied to candidate distances when comparing them.
    #[must_use]
    pub const fn selection_weight(&self, mode: OptimizationMode) -> f64 {
        match mode {
            OptimizationMode::Distance => 1.0,
            OptimizationMode::Time => self.time_mode_weight,
        }
    }
}

/// Order a selection of locations into a visit route.
///
/// Implementations never fail: out-of-policy selections still produce a
/// best-effort result and an empty selection produces
/// [`OptimizationResult::empty`]. Sequencers must be `Send + Sync` so a single
/// instance can serve concurrent callers.
pub trait RouteSequencer: Send + Sync {
    /// Sequence `locations` starting from `start`.
    fn sequence(
        &self,
        start: Coord<f64>,
        locations: &[Location],
        mode: OptimizationMode,
    ) -> OptimizationResult;
}

/// Greedy nearest-neighbour sequencer.
///
/// Ties go to the candidate that appears first in the input, so identical
/// inputs always yield identical routes.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbourSequencer {
    config: SequencerConfig,
}

impl NearestNeighbourSequencer {
    /// Construct a sequencer using the default calibration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a sequencer with explicit calibration.
    #[must_use]
    pub const fn with_config(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// Calibration in use.
    #[must_use]
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }
}

impl RouteSequencer for NearestNeighbourSequencer {
    fn sequence(
        &self,
        start: Coord<f64>,
        locations: &[Location],
        mode: OptimizationMode,
    ) -> OptimizationResult {
        if locations.is_empty() {
            return OptimizationResult::empty();
        }

        let weight = self.config.selection_weight(mode);
        let mut unvisited: Vec<&Location> = locations.iter().collect();
        let mut stops: Vec<RouteStop> = Vec::with_capacity(locations.len());
        let mut current = start;
        let mut total_km = 0.0_f64;

        while !unvisited.is_empty() {
            let nearest_index = nearest_candidate(current, &unvisited, weight);
            let nearest = unvisited.remove(nearest_index);
            total_km = accumulate(total_km, haversine_km(current, nearest.location));
            stops.push(RouteStop {
                order: stop_order(stops.len()),
                location: nearest.clone(),
            });
            current = nearest.location;
        }

        let result = OptimizationResult {
            total_distance_km: round_to_centi(total_km),
            total_duration_minutes: self.estimate_minutes(total_km, locations.len()),
            stops,
        };
        log::debug!(
            "sequenced {} stops in {mode} mode: {:.2} km, {} min",
            result.stops.len(),
            result.total_distance_km,
            result.total_duration_minutes
        );
        result
    }
}

impl NearestNeighbourSequencer {
    /// Travel time at the configured speed plus a fixed dwell per stop,
    /// rounded to the nearest minute.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "duration estimate is a rounded floating-point sum; the cast saturates"
    )]
    fn estimate_minutes(&self, total_km: f64, stop_count: usize) -> u32 {
        let travel_minutes = total_km / self.config.average_speed_kmh * 60.0;
        let stops = f64::from(u32::try_from(stop_count).unwrap_or(u32::MAX));
        let visit_minutes = f64::from(self.config.dwell_minutes) * stops;
        (travel_minutes + visit_minutes).round() as u32
    }
}

/// Index of the closest candidate under `weight`; the first index wins ties.
#[expect(
    clippy::float_arithmetic,
    reason = "candidate comparison scales distances by the mode weight"
)]
fn nearest_candidate(current: Coord<f64>, candidates: &[&Location], weight: f64) -> usize {
    let mut nearest_index = 0;
    let mut min_weighted = f64::INFINITY;
    for (index, candidate) in candidates.iter().enumerate() {
        let weighted = haversine_km(current, candidate.location) * weight;
        if weighted < min_weighted {
            min_weighted = weighted;
            nearest_index = index;
        }
    }
    nearest_index
}

#[expect(clippy::float_arithmetic, reason = "running distance total")]
fn accumulate(total_km: f64, leg_km: f64) -> f64 {
    total_km + leg_km
}

#[expect(clippy::float_arithmetic, reason = "rounding to two decimal places")]
fn round_to_centi(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn stop_order(placed: usize) -> u32 {
    u32::try_from(placed).map_or(u32::MAX, |count| count.saturating_add(1))
}

/// Sequence `locations` from `start` with the default calibration.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routehair_core::{Category, Location, OptimizationMode, optimize};
///
/// let start = Coord { x: 127.0276, y: 37.4979 };
/// let far = Location::new("far", "Far", "", Coord { x: 127.05, y: 37.52 }, Category::Salon)?;
/// let near = Location::new("near", "Near", "", Coord { x: 127.03, y: 37.50 }, Category::Salon)?;
///
/// let result = optimize(start, &[far, near], OptimizationMode::Distance);
/// assert_eq!(result.location_ids(), vec!["near", "far"]);
/// assert_eq!(result.stops[0].order, 1);
/// # Ok::<(), routehair_core::LocationError>(())
/// ```
#[must_use]
pub fn optimize(
    start: Coord<f64>,
    locations: &[Location],
    mode: OptimizationMode,
) -> OptimizationResult {
    NearestNeighbourSequencer::new().sequence(start, locations, mode)
}
