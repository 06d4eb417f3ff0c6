//! Closed set of business categories a location can belong to.
//!
//! # Examples
//! ```
//! use routehair_core::Category;
//!
//! assert_eq!(Category::HairSalon.as_str(), "hair_salon");
//! assert_eq!(Category::Salon.to_string(), "salon");
//! ```

use thiserror::Error;

/// Category of a catalogued location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Category {
    /// Neighbourhood hair salon.
    HairSalon,
    /// Branded hair shop.
    HairShop,
    /// Full-service beauty salon.
    Salon,
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::HairSalon, Self::HairShop, Self::Salon];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use routehair_core::Category;
    ///
    /// assert_eq!(Category::HairShop.as_str(), "hair_shop");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HairSalon => "hair_salon",
            Self::HairShop => "hair_shop",
            Self::Salon => "salon",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalised)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
