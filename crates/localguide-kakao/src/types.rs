//! Wire types for `GET /v2/local/search/keyword.json`.
//!
//! Kakao encodes coordinates and distances as strings and uses `""` or
//! `null` for missing values; [`PlaceDocument::into_place`] normalises both.

use localguide_core::{Coordinate, Place};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct KeywordSearchResponse {
    #[serde(default)]
    pub meta: Option<SearchMeta>,
    pub documents: Vec<PlaceDocument>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub pageable_count: u32,
    #[serde(default)]
    pub is_end: bool,
}

/// One search hit. Any field may be missing or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address_name: Option<String>,
    #[serde(default)]
    pub road_address_name: Option<String>,
    /// Longitude.
    #[serde(default)]
    pub x: Option<String>,
    /// Latitude.
    #[serde(default)]
    pub y: Option<String>,
    #[serde(default)]
    pub place_url: Option<String>,
    /// Meters from the request's `x`/`y`; empty when no anchor was sent.
    #[serde(default)]
    pub distance: Option<String>,
}

impl PlaceDocument {
    /// Converts the document into a [`Place`], or `None` when the name is
    /// blank or the coordinates are missing, unparsable, or out of range.
    #[must_use]
    pub fn into_place(self) -> Option<Place> {
        let name = non_empty(self.place_name)?;
        let lon = non_empty(self.x)?.parse::<f64>().ok()?;
        let lat = non_empty(self.y)?.parse::<f64>().ok()?;
        let coordinate = Coordinate::new(lon, lat).ok()?;

        let address = non_empty(self.road_address_name)
            .or_else(|| non_empty(self.address_name))
            .unwrap_or_default();

        Some(Place {
            name,
            address,
            coordinate,
            phone: non_empty(self.phone),
            distance_m: non_empty(self.distance).and_then(|d| d.parse::<u32>().ok()),
            url: non_empty(self.place_url),
            category: non_empty(self.category_name),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
