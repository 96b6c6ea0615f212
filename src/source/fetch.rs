//! Fetcher - downloads remote images over HTTP.

use std::time::Duration;

use futures_util::StreamExt;

use super::retry::{
    calculate_backoff, is_transient_network_error, is_transient_status, DEFAULT_BACKOFF_BASE,
    DEFAULT_BACKOFF_MAX, DEFAULT_NETWORK_RETRIES,
};
use crate::error::DecodeError;

/// Default timeout for a whole request (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest image body accepted (32 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 32 * 1024 * 1024;

/// HTTP client for image sources, with retry on transient failures.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http_client: reqwest::Client,
    max_retries: u32,
    backoff_base: Duration,
    backoff_max: Duration,
    max_bytes: u64,
}

impl Fetcher {
    /// Create a fetcher with default timeouts and retry policy.
    pub fn new() -> Result<Self, DecodeError> {
        Self::with_settings(DEFAULT_TIMEOUT, DEFAULT_NETWORK_RETRIES)
    }

    /// Create a fetcher with a custom overall timeout and retry count.
    pub fn with_settings(timeout: Duration, max_retries: u32) -> Result<Self, DecodeError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()?;

        Ok(Self {
            http_client,
            max_retries,
            backoff_base: DEFAULT_BACKOFF_BASE,
            backoff_max: DEFAULT_BACKOFF_MAX,
            max_bytes: DEFAULT_MAX_BYTES,
        })
    }

    /// Override the backoff timing (useful for tests).
    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_max = max;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Download `url` once.
    ///
    /// Streams the body and stops as soon as it exceeds the size limit.
    ///
    /// # Errors
    ///
    /// `DecodeError::Status` for non-success responses,
    /// `DecodeError::TooLarge` if the body exceeds the limit,
    /// `DecodeError::Fetch` if the request itself fails.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, DecodeError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecodeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(DecodeError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(DecodeError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    /// Download `url`, retrying transient failures with exponential backoff.
    ///
    /// Connection errors, timeouts, interrupted bodies and 502/503/504 are
    /// retried up to `max_retries` times. Other failures return immediately.
    ///
    /// # Errors
    ///
    /// `DecodeError::Network` once retries are exhausted, otherwise the
    /// error of the failing attempt.
    pub async fn fetch_with_retry(&self, url: &str) -> Result<Vec<u8>, DecodeError> {
        let mut attempt = 0;

        loop {
            let err = match self.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };

            let transient = match &err {
                DecodeError::Fetch(e) => is_transient_network_error(e),
                DecodeError::Status { status, .. } => is_transient_status(*status),
                _ => false,
            };
            if !transient {
                return Err(err);
            }

            if attempt >= self.max_retries {
                log::error!(
                    "Fetching {} failed after {} attempts: {}",
                    url,
                    attempt + 1,
                    err
                );
                return Err(DecodeError::Network {
                    message: err.to_string(),
                    attempts: attempt + 1,
                });
            }

            let delay = calculate_backoff(attempt, self.backoff_base, self.backoff_max);
            log::warn!(
                "Transient error fetching {} (attempt {}/{}): {}. Retrying in {:?}",
                url,
                attempt + 1,
                self.max_retries + 1,
                err,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
