use thiserror::Error;

/// Errors returned by the Kakao Local API client.
#[derive(Debug, Error)]
pub enum KakaoError {
    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429; the daily or per-second quota was hit.
    #[error("rate limited by Kakao (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
