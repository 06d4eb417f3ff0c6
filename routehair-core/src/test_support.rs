//! Fixtures shared by unit tests, behaviour tests and benchmarks.

use geo::Coord;

use crate::{Category, Location};

/// Gangnam Station, the default start of the sample scenarios.
#[must_use]
pub const fn gangnam_start() -> Coord<f64> {
    Coord {
        x: 127.0276,
        y: 37.4979,
    }
}

type CatalogueRow = (&'static str, &'static str, &'static str, f64, f64, Category);

const CATALOGUE: [CatalogueRow; 8] = [
    ("sinnonhyeon", "Sinnonhyeon Cut", "Gangnam-gu", 37.5045, 127.0250, Category::HairSalon),
    ("nonhyeon", "Nonhyeon Style", "Gangnam-gu", 37.5110, 127.0214, Category::HairShop),
    ("cheongdam", "Cheongdam Atelier", "Gangnam-gu", 37.5172, 127.0473, Category::Salon),
    ("yeoksam", "Yeoksam Hair", "Gangnam-gu", 37.4946, 127.0410, Category::HairSalon),
    ("dogok", "Dogok Beauty", "Gangnam-gu", 37.4860, 127.0330, Category::HairShop),
    ("seocho", "Seocho Lab", "Seocho-gu", 37.4837, 127.0324, Category::HairSalon),
    ("bangbae", "Bangbae Studio", "Seocho-gu", 37.4814, 126.9976, Category::Salon),
    ("jamwon", "Jamwon Salon", "Seocho-gu", 37.5130, 127.0120, Category::HairSalon),
];

/// Eight salons around Gangnam and Seocho, in catalogue order.
///
/// The first five are the Gangnam scenario used throughout the tests.
#[must_use]
pub fn sample_catalogue() -> Vec<Location> {
    CATALOGUE
        .iter()
        .map(|&(id, name, district, lat, lng, category)| Location {
            id: id.to_owned(),
            name: name.to_owned(),
            address: format!("Seoul {district}"),
            location: Coord { x: lng, y: lat },
            category,
            district: district.to_owned(),
            phone: None,
        })
        .collect()
}

/// The first `count` salons of [`sample_catalogue`].
#[must_use]
pub fn sample_selection(count: usize) -> Vec<Location> {
    sample_catalogue().into_iter().take(count).collect()
}
