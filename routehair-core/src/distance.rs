//! Great-circle distance between WGS84 coordinates.
//!
//! Distances use the haversine formula over a sphere of radius
//! [`EARTH_RADIUS_KM`]. The radius is fixed so that route totals stay
//! comparable with previously recorded plans; `geo`'s own haversine metric
//! uses a slightly different mean radius.

use geo::Coord;

/// Earth radius used by every distance computation, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// This is the wire shape used by requests; internally coordinates are
/// [`Coord`] values with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routehair_core::LatLng;
///
/// let gangnam = LatLng::new(37.4979, 127.0276);
/// let coord: Coord<f64> = gangnam.into();
/// assert_eq!(coord.y, 37.4979);
/// assert_eq!(coord.x, 127.0276);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Construct a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

/// Great-circle distance in kilometres between two latitude/longitude pairs.
///
/// The result is symmetric and zero for identical points. Inputs are not
/// range-checked.
///
/// # Examples
/// ```
/// use routehair_core::distance_km;
///
/// assert_eq!(distance_km(37.5, 127.0, 37.5, 127.0), 0.0);
/// let d = distance_km(37.4979, 127.0276, 37.5172, 127.0473);
/// assert!((d - 2.8).abs() < 0.1);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is inherently floating-point"
)]
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();

    let a = half_lat * half_lat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_lng * half_lng;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometres between two [`Coord`] values.
///
/// Coordinates follow the workspace convention of `x = longitude` and
/// `y = latitude`.
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    distance_km(from.y, from.x, to.y, to.x)
}
