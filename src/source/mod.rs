//! Image sources: file paths, http(s) URLs, data URIs and inline bytes.
//!
//! This module turns an [`ImageSource`] into encoded bytes. Remote fetches
//! retry transient network failures with exponential backoff; decoding is
//! left to [`crate::glyph::SourceImage`].

mod fetch;
mod reference;
mod retry;

pub use fetch::{Fetcher, DEFAULT_MAX_BYTES, DEFAULT_TIMEOUT};
pub use reference::{decode_data_uri, resolve, ImageSource};
pub use retry::{
    calculate_backoff, is_transient_network_error, is_transient_status, DEFAULT_BACKOFF_BASE,
    DEFAULT_BACKOFF_MAX, DEFAULT_NETWORK_RETRIES,
};
