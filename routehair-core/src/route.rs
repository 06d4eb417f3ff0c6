//! Ordered visit plans produced by a [`RouteSequencer`](crate::RouteSequencer).
//!
//! Results are ephemeral: they are recomputed on every optimisation run and
//! never persisted.

use std::time::Duration;

use crate::Location;

/// One position in a visit plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStop {
    /// 1-based position in the plan.
    pub order: u32,
    /// Location visited at this position.
    pub location: Location,
}

/// Ordered stops with aggregate distance and duration.
///
/// # Examples
/// ```
/// use routehair_core::OptimizationResult;
///
/// let result = OptimizationResult::empty();
/// assert!(result.is_empty());
/// assert_eq!(result.total_distance_km, 0.0);
/// assert_eq!(result.total_duration().as_secs(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Stops in visiting order.
    pub stops: Vec<RouteStop>,
    /// Great-circle length of the plan in kilometres, rounded to 2 dp.
    pub total_distance_km: f64,
    /// Travel plus dwell time in whole minutes.
    pub total_duration_minutes: u32,
}

impl OptimizationResult {
    /// The zero-valued result returned for an empty selection.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stops: Vec::new(),
            total_distance_km: 0.0,
            total_duration_minutes: 0,
        }
    }

    /// Whether the plan has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of stops in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Location identifiers in visiting order.
    #[must_use]
    pub fn location_ids(&self) -> Vec<&str> {
        self.stops
            .iter()
            .map(|stop| stop.location.id.as_str())
            .collect()
    }

    /// Total duration as a [`Duration`].
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.total_duration_minutes) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use geo::Coord;

    fn stop(order: u32, id: &str) -> RouteStop {
        let location = Location::new(id, id, "", Coord { x: 0.0, y: 0.0 }, Category::Salon)
            .expect("valid coordinate");
        RouteStop { order, location }
    }

    #[test]
    fn location_ids_follow_stop_order() {
        let result = OptimizationResult {
            stops: vec![stop(1, "b"), stop(2, "a")],
            total_distance_km: 1.5,
            total_duration_minutes: 23,
        };
        assert_eq!(result.location_ids(), vec!["b", "a"]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.total_duration(), Duration::from_secs(23 * 60));
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(OptimizationResult::default(), OptimizationResult::empty());
    }
}
