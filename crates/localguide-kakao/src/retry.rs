//! Retry with exponential back-off and jitter for the Kakao client.
//!
//! Only transient failures are retried. Every reformulation variant the
//! pipeline issues is already a retry of sorts, so the default budget is small.

use std::future::Future;
use std::time::Duration;

use crate::error::KakaoError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** network timeouts and connection failures, HTTP 429, and
/// HTTP 5xx.
///
/// **Not retriable:** other non-2xx statuses, malformed bodies, and
/// configuration errors.
pub(crate) fn is_retriable(err: &KakaoError) -> bool {
    match err {
        KakaoError::Http(e) => e.is_timeout() || e.is_connect(),
        KakaoError::RateLimited { .. } => true,
        KakaoError::UnexpectedStatus { status, .. } => *status >= 500,
        KakaoError::Deserialize { .. } | KakaoError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors.
///
/// The delay before retry `n` is `backoff_base_ms * 2^(n-1)` with ±25 %
/// jitter, raised to the server's `Retry-After` on HTTP 429 and capped at
/// 10 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, KakaoError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, KakaoError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let retry_after_secs = if let KakaoError::RateLimited { retry_after_secs } = &err {
                    Some(*retry_after_secs)
                } else {
                    None
                };
                let delay_ms = backoff_delay_ms(
                    backoff_base_ms,
                    attempt,
                    retry_after_secs,
                    rand::random::<f64>() * 0.5 + 0.75,
                );
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Kakao transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

const MAX_DELAY_MS: u64 = 10_000;

/// Delay before retry `attempt` (1-based). `jitter` scales the exponential
/// component; a `Retry-After` value is a floor on the result. Never exceeds
/// [`MAX_DELAY_MS`].
fn backoff_delay_ms(
    backoff_base_ms: u64,
    attempt: u32,
    retry_after_secs: Option<u64>,
    jitter: f64,
) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * jitter) as u64;
    let floor = retry_after_secs.map_or(0, |secs| secs.saturating_mul(1000));
    jittered.max(floor).min(MAX_DELAY_MS)
}
