//! Anchor resolution: turn free-form location text into a search anchor.
//!
//! Resolution never fails. Any provider error, or an empty page, degrades to
//! the region bias coordinate.

use localguide_core::{prefer_matching, Coordinate, RegionPolicy};
use localguide_kakao::{PlaceSearch, SearchQuery, SortOrder};
use serde::Serialize;

/// Candidates requested when resolving a location name.
const ANCHOR_PAGE_SIZE: u32 = 3;
/// Candidates requested when snapping onto a station.
const STATION_PAGE_SIZE: u32 = 5;

/// Where an anchor coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorOrigin {
    /// The region bias, used when nothing better was available.
    RegionDefault,
    /// A place matching the caller's location text.
    Located,
    /// The transit station nearest to the located place.
    Station,
    /// Supplied by the caller's device, bypassing resolution.
    Device,
}

impl AnchorOrigin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnchorOrigin::RegionDefault => "region_default",
            AnchorOrigin::Located => "located",
            AnchorOrigin::Station => "station",
            AnchorOrigin::Device => "device",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub coordinate: Coordinate,
    pub origin: AnchorOrigin,
}

impl Anchor {
    #[must_use]
    pub fn device(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            origin: AnchorOrigin::Device,
        }
    }

    /// False for the region fallback, which is too coarse to search around.
    #[must_use]
    pub fn is_specific(&self) -> bool {
        self.origin != AnchorOrigin::RegionDefault
    }
}

/// Resolves location text against a [`PlaceSearch`] provider.
pub struct GeoResolver<S> {
    search: S,
    region: RegionPolicy,
}

impl<S: PlaceSearch> GeoResolver<S> {
    #[must_use]
    pub fn new(search: S, region: RegionPolicy) -> Self {
        Self { search, region }
    }

    fn fallback(&self) -> Anchor {
        Anchor {
            coordinate: self.region.bias,
            origin: AnchorOrigin::RegionDefault,
        }
    }

    /// Resolves `location_text` to an [`Anchor`].
    ///
    /// Blank text returns the region bias without a provider call. Otherwise
    /// searches `"{region} {location_text}"` and takes the first candidate
    /// whose address mentions the region, or the first candidate at all.
    pub async fn resolve(&self, location_text: &str) -> Anchor {
        let location = location_text.trim();
        if location.is_empty() {
            return self.fallback();
        }

        let query = SearchQuery::new(format!("{} {location}", self.region.name))
            .size(ANCHOR_PAGE_SIZE);
        let candidates = match self.search.search(&query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    location,
                    error = %e,
                    "anchor lookup failed, using region default"
                );
                return self.fallback();
            }
        };

        let region = self.region.name.as_str();
        match prefer_matching(candidates, |p| p.in_region(region)).first() {
            Some(place) => {
                tracing::debug!(location, place = %place.name, coordinate = %place.coordinate, "anchor resolved");
                Anchor {
                    coordinate: place.coordinate,
                    origin: AnchorOrigin::Located,
                }
            }
            None => {
                tracing::debug!(location, "no anchor candidates, using region default");
                self.fallback()
            }
        }
    }

    /// Coordinate-only form of [`GeoResolver::resolve`].
    pub async fn resolve_anchor(&self, location_text: &str) -> Coordinate {
        self.resolve(location_text).await.coordinate
    }

    /// Resolves `location_text`, then snaps onto the nearest transit station
    /// within the station radius. Keeps the base anchor when no station is
    /// found or the lookup fails.
    pub async fn resolve_station(&self, location_text: &str) -> Anchor {
        let base = self.resolve(location_text).await;

        let query = SearchQuery::new(self.region.station_query.clone())
            .near(base.coordinate, self.region.station_radius_m)
            .sorted_by(SortOrder::Distance)
            .size(STATION_PAGE_SIZE);
        match self.search.search(&query).await {
            Ok(stations) => match stations.into_iter().next() {
                Some(station) => {
                    tracing::debug!(station = %station.name, coordinate = %station.coordinate, "snapped anchor to station");
                    Anchor {
                        coordinate: station.coordinate,
                        origin: AnchorOrigin::Station,
                    }
                }
                None => base,
            },
            Err(e) => {
                tracing::warn!(error = %e, "station lookup failed, keeping base anchor");
                base
            }
        }
    }

    /// Coordinate-only form of [`GeoResolver::resolve_station`].
    pub async fn resolve_nearest_station(&self, location_text: &str) -> Coordinate {
        self.resolve_station(location_text).await.coordinate
    }
}
