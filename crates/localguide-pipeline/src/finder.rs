//! Place search with progressive query reformulation.

use std::collections::HashSet;

use localguide_core::{prefer_matching, Coordinate, Place, RegionPolicy};
use localguide_kakao::{PlaceSearch, SearchQuery, SortOrder};

use crate::variants::QueryVariants;

/// Finds candidate places for a keyword by trying [`QueryVariants`] in order
/// until one returns results.
pub struct PlaceFinder<S> {
    search: S,
    region: RegionPolicy,
}

impl<S: PlaceSearch> PlaceFinder<S> {
    #[must_use]
    pub fn new(search: S, region: RegionPolicy) -> Self {
        Self { search, region }
    }

    /// Returns up to `limit` places for `keyword`.
    ///
    /// With an `anchor`, each variant is searched within `radius_m` sorted by
    /// distance; without one the search is region-wide and relevance-sorted.
    /// A provider error counts as an empty page for that variant. From the
    /// first non-empty page, places inside the region are preferred and
    /// repeats of the same name and address are dropped.
    ///
    /// An empty result means every variant came back empty.
    pub async fn find_places(
        &self,
        keyword: &str,
        category_hint: Option<&str>,
        anchor: Option<Coordinate>,
        radius_m: u32,
        limit: usize,
    ) -> Vec<Place> {
        let variants = QueryVariants::new(
            keyword,
            category_hint,
            &self.region.name,
            &self.region.landmarks,
        );

        for (attempt, variant) in variants.enumerate() {
            let mut query = SearchQuery::new(variant);
            if let Some(anchor) = anchor {
                query = query.near(anchor, radius_m).sorted_by(SortOrder::Distance);
            }

            let page = match self.search.search(&query).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        query = %query.query,
                        attempt,
                        error = %e,
                        "place search failed, trying next variant"
                    );
                    continue;
                }
            };
            tracing::debug!(query = %query.query, attempt, count = page.len(), "place search variant");
            if page.is_empty() {
                continue;
            }

            let region = self.region.name.as_str();
            let mut seen = HashSet::new();
            let mut places: Vec<Place> = prefer_matching(page, |p| p.in_region(region))
                .into_iter()
                .filter(|p| seen.insert(p.listing_key()))
                .collect();
            places.truncate(limit);
            return places;
        }

        tracing::info!(keyword, "no places found for any variant");
        Vec::new()
    }
}
