use serde::{Deserialize, Serialize};

pub type ListingId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A business as returned by the directory API.
///
/// Fetched listings are never mutated; a refetch replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub category_id: i64,
    #[serde(default)]
    pub claimed: bool,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub accessibility: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,

    // Detail page only
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Listing {
    /// Coordinates usable on a map, if any.
    pub fn position(&self) -> Option<Coordinates> {
        self.coordinates.filter(|c| c.is_valid())
    }

    /// "$" .. "$$$$"
    pub fn price_label(&self) -> Option<String> {
        self.price_level
            .filter(|level| (1..=4).contains(level))
            .map(|level| "$".repeat(level as usize))
    }

    pub fn rating_label(&self) -> Option<String> {
        self.rating
            .filter(|r| r.is_finite())
            .map(|r| format!("{r:.1} ★"))
    }
}
