//! Client for the Kakao Local keyword-search API.
//!
//! Provides [`KakaoClient`] and the [`PlaceSearch`] seam the recommendation
//! pipeline is written against, so tests can swap in an in-memory provider.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod search;
pub mod types;

pub use client::KakaoClient;
pub use error::KakaoError;
pub use search::{PlaceSearch, SearchQuery, SortOrder};
pub use types::{KeywordSearchResponse, PlaceDocument, SearchMeta};
