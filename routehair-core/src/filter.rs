//! Region, category and text filters over a location catalogue.

use crate::{Category, Location};

/// Criteria narrowing a catalogue down to candidate locations.
///
/// With a district, a location matches on exact district equality;
/// otherwise its address must mention the city. A missing category matches
/// every category. The optional query matches the name or the address,
/// ignoring case.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routehair_core::{Category, Location, LocationFilter, filter_locations};
///
/// let salon = Location::new("1", "Blue Cut", "Seoul Gangnam-gu", Coord { x: 127.0, y: 37.5 }, Category::HairSalon)?
///     .with_district("Gangnam-gu");
/// let filter = LocationFilter::city("Seoul").with_category(Category::HairSalon);
///
/// assert_eq!(filter_locations(&[salon], &filter).len(), 1);
/// # Ok::<(), routehair_core::LocationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationFilter {
    /// City name searched for in addresses when no district is set.
    pub city: String,
    /// Exact district to match.
    pub district: Option<String>,
    /// Category to match; `None` matches all.
    pub category: Option<Category>,
    /// Case-insensitive text searched in names and addresses.
    pub query: Option<String>,
}

impl LocationFilter {
    /// Match every location whose address mentions `city`.
    #[must_use]
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    /// Restrict to one district.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Restrict to one category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Add a free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Whether `location` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, location: &Location) -> bool {
        self.matches_region(location)
            && self.matches_category(location)
            && self.matches_query(location)
    }

    fn matches_region(&self, location: &Location) -> bool {
        match &self.district {
            Some(district) => &location.district == district,
            None => location.address.contains(self.city.as_str()),
        }
    }

    fn matches_category(&self, location: &Location) -> bool {
        self.category.is_none_or(|category| category == location.category)
    }

    fn matches_query(&self, location: &Location) -> bool {
        let Some(query) = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        else {
            return true;
        };
        let needle = query.to_lowercase();
        location.name.to_lowercase().contains(&needle)
            || location.address.to_lowercase().contains(&needle)
    }
}

/// Locations matching `filter`, in catalogue order.
#[must_use]
pub fn filter_locations(locations: &[Location], filter: &LocationFilter) -> Vec<Location> {
    locations
        .iter()
        .filter(|location| filter.matches(location))
        .cloned()
        .collect()
}
