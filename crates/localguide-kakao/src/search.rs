//! Keyword search requests and the [`PlaceSearch`] provider trait.

use std::future::Future;
use std::sync::Arc;

use localguide_core::{Coordinate, Place};

use crate::error::KakaoError;

/// Kakao accepts at most 15 documents per page.
pub const MAX_PAGE_SIZE: u32 = 15;

/// Kakao rejects radii above 20 km.
pub const MAX_RADIUS_M: u32 = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Accuracy,
    Distance,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Accuracy => "accuracy",
            SortOrder::Distance => "distance",
        }
    }
}

/// One keyword search against the place-search provider.
///
/// Without an anchor the search is region-agnostic and relevance-ranked; with
/// one, results are limited to `radius_m` around it and carry a distance.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub anchor: Option<Coordinate>,
    pub radius_m: Option<u32>,
    pub size: u32,
    pub sort: SortOrder,
}

impl SearchQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            anchor: None,
            radius_m: None,
            size: MAX_PAGE_SIZE,
            sort: SortOrder::Accuracy,
        }
    }

    #[must_use]
    pub fn near(mut self, anchor: Coordinate, radius_m: u32) -> Self {
        self.anchor = Some(anchor);
        self.radius_m = Some(radius_m.min(MAX_RADIUS_M));
        self
    }

    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// A keyword-based nearby-search provider.
///
/// Implementations return places in provider order. Callers in the pipeline
/// treat every error as "no results for this query".
pub trait PlaceSearch: Send + Sync {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Place>, KakaoError>> + Send;
}

impl<T: PlaceSearch> PlaceSearch for &T {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Place>, KakaoError>> + Send {
        (**self).search(query)
    }
}

impl<T: PlaceSearch> PlaceSearch for Arc<T> {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Place>, KakaoError>> + Send {
        (**self).search(query)
    }
}
