//! Retry and backoff helpers for fetching remote images.

use std::time::Duration;

/// Default number of retry attempts for transient network errors.
pub const DEFAULT_NETWORK_RETRIES: u32 = 3;

/// Base delay for exponential backoff (500 ms).
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Maximum delay cap for exponential backoff (10 seconds).
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(10);

/// Gateway statuses that usually clear up on their own.
const TRANSIENT_STATUSES: [u16; 3] = [502, 503, 504];

/// Determine if a reqwest error is worth retrying.
///
/// Connection failures, timeouts and interrupted bodies are transient;
/// anything else (bad URL, TLS misconfiguration, ...) is not.
pub fn is_transient_network_error(error: &reqwest::Error) -> bool {
    if error.is_connect() || error.is_timeout() || error.is_body() {
        return true;
    }

    error
        .status()
        .map(|s| is_transient_status(s.as_u16()))
        .unwrap_or(false)
}

/// True for 502 Bad Gateway, 503 Service Unavailable and 504 Gateway Timeout.
pub fn is_transient_status(status: u16) -> bool {
    TRANSIENT_STATUSES.contains(&status)
}

/// Exponential backoff delay with a fixed half-base jitter.
///
/// `min(base * 2^attempt + base / 2, max)`
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    let jitter = base / 2;
    exponential.saturating_add(jitter).min(max)
}
