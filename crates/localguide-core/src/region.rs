//! Service-region policy and the regional preference filter.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Longest keyword passed on to the place-search provider.
pub const MAX_KEYWORD_CHARS: usize = 20;

/// Tunable policy for the region the assistant serves.
///
/// The defaults describe Busan; every value can be overridden through
/// [`crate::load_app_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPolicy {
    /// Name matched against addresses and prefixed onto queries.
    pub name: String,
    /// Fallback anchor when no location can be resolved.
    pub bias: Coordinate,
    /// Well-known sub-districts appended to keywords as a last resort.
    pub landmarks: Vec<String>,
    /// Keyword used when intent extraction yields nothing.
    pub default_keyword: String,
    /// Radius for anchor-relative place searches, in meters.
    pub search_radius_m: u32,
    /// Query used to snap an anchor onto the nearest transit station.
    pub station_query: String,
    pub station_radius_m: u32,
    /// Maximum number of places returned per request.
    pub result_limit: usize,
}

impl Default for RegionPolicy {
    fn default() -> Self {
        Self {
            name: "부산".to_string(),
            bias: Coordinate {
                lon: 129.0756,
                lat: 35.1796,
            },
            landmarks: vec![
                "부산대".to_string(),
                "서면".to_string(),
                "해운대".to_string(),
            ],
            default_keyword: "맛집".to_string(),
            search_radius_m: 800,
            station_query: "지하철역".to_string(),
            station_radius_m: 3000,
            result_limit: 3,
        }
    }
}

/// Keeps the items matching `pred` when at least one does; otherwise returns
/// every item unchanged. Order is preserved either way.
pub fn prefer_matching<T, F>(items: Vec<T>, pred: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    let (matching, rest): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| pred(item));
    if matching.is_empty() {
        rest
    } else {
        matching
    }
}
