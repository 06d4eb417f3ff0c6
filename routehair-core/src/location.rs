use geo::Coord;
use thiserror::Error;

use crate::Category;

/// A catalogued business the representative may visit.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Locations
/// are owned by an external catalogue; the engine only reads them.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routehair_core::{Category, Location};
///
/// let salon = Location::new(
///     "s-1",
///     "Gangnam Cut",
///     "Seoul Gangnam-gu Teheran-ro 1",
///     Coord { x: 127.0276, y: 37.4979 },
///     Category::HairSalon,
/// )?;
///
/// assert_eq!(salon.latitude(), 37.4979);
/// assert_eq!(salon.longitude(), 127.0276);
/// # Ok::<(), routehair_core::LocationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::LocationRecord", into = "wire::LocationRecord")
)]
pub struct Location {
    /// Unique catalogue identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Postal address as displayed to the user.
    pub address: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Business category.
    pub category: Category,
    /// Administrative district, e.g. `"Gangnam-gu"`.
    pub district: String,
    /// Contact number, when the catalogue has one.
    pub phone: Option<String>,
}

/// Errors returned by [`Location::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// Latitude fell outside `[-90, 90]` or was not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]` or was not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Location {
    /// Validate the coordinate and construct a [`Location`].
    ///
    /// The district is left empty and no phone number is attached; use
    /// [`Location::with_district`] and [`Location::with_phone`] to fill them.
    ///
    /// # Errors
    /// Returns [`LocationError`] when the latitude or longitude is outside the
    /// WGS84 range.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        location: Coord<f64>,
        category: Category,
    ) -> Result<Self, LocationError> {
        validate_coord(location)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            location,
            category,
            district: String::new(),
            phone: None,
        })
    }

    /// Attach the administrative district.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = district.into();
        self
    }

    /// Attach a contact number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

fn validate_coord(location: Coord<f64>) -> Result<(), LocationError> {
    if !(-90.0..=90.0).contains(&location.y) {
        return Err(LocationError::LatitudeOutOfRange(location.y));
    }
    if !(-180.0..=180.0).contains(&location.x) {
        return Err(LocationError::LongitudeOutOfRange(location.x));
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod wire {
    use geo::Coord;
    use serde::{Deserialize, Serialize};

    use super::{Location, LocationError, validate_coord};
    use crate::Category;

    /// Flat JSON shape with explicit `lat`/`lng` keys.
    #[derive(Serialize, Deserialize)]
    pub(super) struct LocationRecord {
        id: String,
        name: String,
        address: String,
        lat: f64,
        lng: f64,
        category: Category,
        #[serde(default)]
        district: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    }

    impl TryFrom<LocationRecord> for Location {
        type Error = LocationError;

        fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
            let location = Coord {
                x: record.lng,
                y: record.lat,
            };
            validate_coord(location)?;
            Ok(Self {
                id: record.id,
                name: record.name,
                address: record.address,
                location,
                category: record.category,
                district: record.district,
                phone: record.phone,
            })
        }
    }

    impl From<Location> for LocationRecord {
        fn from(location: Location) -> Self {
            Self {
                id: location.id,
                name: location.name,
                address: location.address,
                lat: location.location.y,
                lng: location.location.x,
                category: location.category,
                district: location.district,
                phone: location.phone,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(lat: f64, lng: f64) -> Result<Location, LocationError> {
        Location::new("id", "name", "address", Coord { x: lng, y: lat }, Category::Salon)
    }

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(37.4979, 127.0276)]
    fn accepts_coordinates_on_and_inside_bounds(#[case] lat: f64, #[case] lng: f64) {
        assert!(at(lat, lng).is_ok());
    }

    #[rstest]
    #[case(90.0001, 0.0, LocationError::LatitudeOutOfRange(90.0001))]
    #[case(-91.0, 0.0, LocationError::LatitudeOutOfRange(-91.0))]
    #[case(0.0, 180.5, LocationError::LongitudeOutOfRange(180.5))]
    fn rejects_out_of_range_coordinates(
        #[case] lat: f64,
        #[case] lng: f64,
        #[case] expected: LocationError,
    ) {
        assert_eq!(at(lat, lng), Err(expected));
    }

    #[test]
    fn rejects_nan_latitude() {
        assert!(matches!(
            at(f64::NAN, 0.0),
            Err(LocationError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn builder_methods_fill_optional_fields() {
        let location = at(0.0, 0.0)
            .expect("valid coordinate")
            .with_district("Gangnam-gu")
            .with_phone("02-000-0000");
        assert_eq!(location.district, "Gangnam-gu");
        assert_eq!(location.phone.as_deref(), Some("02-000-0000"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_lat_lng_keys_and_validates() {
        let json = r#"{"id":"1","name":"A","address":"Seoul","lat":37.5,"lng":127.0,"category":"hair_shop"}"#;
        let location: Location = serde_json::from_str(json).expect("valid location JSON");
        assert_eq!(location.latitude(), 37.5);
        assert_eq!(location.category, Category::HairShop);
        assert!(location.district.is_empty());

        let value = serde_json::to_value(&location).expect("serialise location");
        assert_eq!(value["lng"], 127.0);
        assert!(value.get("phone").is_none());

        let invalid = r#"{"id":"1","name":"A","address":"Seoul","lat":137.5,"lng":127.0,"category":"salon"}"#;
        assert!(serde_json::from_str::<Location>(invalid).is_err());
    }
}
