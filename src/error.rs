//! Error type for loading and decoding source images.

/// The image could not be loaded or decoded.
///
/// This is the only failure a render can produce. It is always recoverable:
/// callers show [`DecodeError::FALLBACK_MESSAGE`] instead of a grid.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("image payload is empty")]
    Empty,

    #[error("image could not be decoded: {0}")]
    Format(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("fetching {url} failed with status {status}")]
    Status {
        /// HTTP status code returned by the server
        status: u16,
        url: String,
    },

    #[error("Network error: {message} (after {attempts} attempts)")]
    Network {
        /// Human-readable network error message
        message: String,
        /// Number of attempts made before giving up
        attempts: u32,
    },

    #[error("payload exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("decode task was interrupted")]
    Interrupted,
}

impl DecodeError {
    /// Text shown in place of the grid when a render fails.
    pub const FALLBACK_MESSAGE: &'static str = "[RENDER_ERROR]: VISUAL_BUFFER_UNREADABLE";
}
