//! Candidate places returned by the place-search provider.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::geo::Coordinate;

/// A single real-world place candidate.
///
/// Built fresh from each provider response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Road address when the provider has one, otherwise the lot address.
    pub address: String,
    pub coordinate: Coordinate,
    pub phone: Option<String>,
    /// Meters from the search anchor; only present for anchor-relative searches.
    pub distance_m: Option<u32>,
    /// External detail-page URL.
    pub url: Option<String>,
    /// Provider category path, e.g. `음식점 > 한식 > 국밥`.
    pub category: Option<String>,
}

impl Place {
    /// Stable identity for bookmarking and dedup: SHA-256 over the trimmed,
    /// lower-cased `name` and `address`, hex-encoded.
    ///
    /// Two places with equal name and address share a key regardless of
    /// coordinates or distance.
    #[must_use]
    pub fn listing_key(&self) -> String {
        let input = format!(
            "{}\x00{}",
            self.name.trim().to_lowercase(),
            self.address.trim().to_lowercase(),
        );
        format!("{:x}", Sha256::digest(input.as_bytes()))
    }

    /// Whether the place's address mentions `region` (plain substring match).
    #[must_use]
    pub fn in_region(&self, region: &str) -> bool {
        self.address.contains(region)
    }
}

/// The terminal artifact of one recommendation request: the ranked places and
/// an optional narrative about their commercial character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResultSet {
    pub places: Vec<Place>,
    pub summary: Option<String>,
}

impl RankedResultSet {
    /// Keeps the first `limit` places in the given order.
    #[must_use]
    pub fn new(mut places: Vec<Place>, limit: usize) -> Self {
        places.truncate(limit);
        Self {
            places,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary.filter(|s| !s.trim().is_empty());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
