//! HTTP client for the Kakao Local REST API.
//!
//! Wraps `reqwest` with `KakaoAK` authorization, an explicit per-call timeout,
//! retry on transient failures, and typed response deserialization.

use std::time::Duration;

use localguide_core::Place;
use reqwest::{Client, Url};

use crate::error::KakaoError;
use crate::retry::retry_with_backoff;
use crate::search::{PlaceSearch, SearchQuery};
use crate::types::KeywordSearchResponse;

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";
const KEYWORD_SEARCH_PATH: &str = "v2/local/search/keyword.json";

/// Client for the Kakao Local keyword-search endpoint.
///
/// Use [`KakaoClient::new`] for production or [`KakaoClient::with_base_url`]
/// to point at a mock server in tests.
pub struct KakaoClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl KakaoClient {
    /// Creates a client pointed at the production Kakao API.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, KakaoError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// Retries are disabled until [`KakaoClient::with_retry`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`KakaoError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, KakaoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| KakaoError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retry on transient errors (timeouts, 429, 5xx).
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Runs one keyword search and returns the documents as [`Place`]s in
    /// provider order. Documents without a name or usable coordinates are
    /// dropped.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::RateLimited`] on HTTP 429 after retries.
    /// - [`KakaoError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`KakaoError::Http`] on network failure or timeout.
    /// - [`KakaoError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_keyword(&self, query: &SearchQuery) -> Result<Vec<Place>, KakaoError> {
        let url = self.build_url(query)?;
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_json(&url)
        })
        .await?;

        let total = response.documents.len();
        let places: Vec<Place> = response
            .documents
            .into_iter()
            .filter_map(crate::types::PlaceDocument::into_place)
            .collect();

        if places.len() < total {
            tracing::debug!(
                query = %query.query,
                dropped = total - places.len(),
                "dropped Kakao documents without a name or usable coordinates"
            );
        }
        tracing::debug!(query = %query.query, count = places.len(), "Kakao keyword search");

        Ok(places)
    }

    /// Builds the request URL with properly percent-encoded query parameters.
    fn build_url(&self, query: &SearchQuery) -> Result<Url, KakaoError> {
        let mut url = self
            .base_url
            .join(KEYWORD_SEARCH_PATH)
            .map_err(|e| KakaoError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.query);
            if let Some(anchor) = query.anchor {
                pairs.append_pair("x", &anchor.lon.to_string());
                pairs.append_pair("y", &anchor.lat.to_string());
                if let Some(radius) = query.radius_m {
                    pairs.append_pair("radius", &radius.to_string());
                }
            }
            pairs.append_pair("size", &query.size.to_string());
            pairs.append_pair("sort", query.sort.as_str());
        }
        Ok(url)
    }

    /// Sends the GET, maps non-2xx statuses to typed errors, and parses the
    /// body as a [`KeywordSearchResponse`].
    async fn request_json(&self, url: &Url) -> Result<KeywordSearchResponse, KakaoError> {
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("KakaoAK {}", self.api_key),
            )
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(KakaoError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(KakaoError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.path().to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| KakaoError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }
}

impl PlaceSearch for KakaoClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Place>, KakaoError> {
        self.search_keyword(query).await
    }
}

#[cfg(test)]
mod tests {
    use localguide_core::Coordinate;

    use super::*;
    use crate::search::SortOrder;

    fn test_client(base_url: &str) -> KakaoClient {
        KakaoClient::with_base_url("test-key", 5, "localguide-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_for_unanchored_query() {
        let client = test_client("https://dapi.kakao.com");
        let url = client.build_url(&SearchQuery::new("pizza")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://dapi.kakao.com/v2/local/search/keyword.json?query=pizza&size=15&sort=accuracy"
        );
    }

    #[test]
    fn build_url_includes_anchor_and_radius() {
        let client = test_client("https://dapi.kakao.com/");
        let query = SearchQuery::new("cafe")
            .near(
                Coordinate {
                    lon: 129.0756,
                    lat: 35.1796,
                },
                800,
            )
            .size(3)
            .sorted_by(SortOrder::Distance);
        let url = client.build_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://dapi.kakao.com/v2/local/search/keyword.json?query=cafe&x=129.0756&y=35.1796&radius=800&size=3&sort=distance"
        );
    }

    #[test]
    fn build_url_encodes_hangul_and_spaces() {
        let client = test_client("https://dapi.kakao.com");
        let url = client.build_url(&SearchQuery::new("부산 국밥")).unwrap();
        assert!(
            !url.as_str().contains(' '),
            "query param should be percent-encoded: {url}"
        );
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded[0], ("query".to_owned(), "부산 국밥".to_owned()));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = KakaoClient::with_base_url("k", 5, "ua", "not a url");
        assert!(matches!(result, Err(KakaoError::InvalidBaseUrl { .. })));
    }
}
