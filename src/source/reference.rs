//! Image references and resolving them to encoded bytes.

use std::fmt;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::fetch::Fetcher;
use crate::error::DecodeError;

/// Where a source image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file
    Path(PathBuf),
    /// Remote http(s) URL
    Url(String),
    /// Inline `data:` URI
    DataUri(String),
    /// Already-loaded encoded bytes
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Classify a reference string as a URL, data URI or file path.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else if lowered.starts_with("data:") {
            ImageSource::DataUri(trimmed.to_string())
        } else {
            ImageSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for ImageSource {
    /// Short description for logs; inline payloads are not printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(p) => write!(f, "{}", p.display()),
            ImageSource::Url(u) => write!(f, "{}", u),
            ImageSource::DataUri(d) => write!(f, "data URI ({} chars)", d.len()),
            ImageSource::Bytes(b) => write!(f, "inline bytes ({} bytes)", b.len()),
        }
    }
}

/// Decode a `data:[<mime>][;base64],<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, DecodeError> {
    let (meta, payload) = uri
        .trim()
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUri("missing ',' separator".to_string()))?;

    let meta = meta
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &meta[5..])
        .ok_or_else(|| DecodeError::InvalidDataUri("missing 'data:' scheme".to_string()))?;

    let is_base64 = meta
        .split(';')
        .any(|param| param.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Ok(payload.as_bytes().to_vec());
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| DecodeError::InvalidDataUri(e.to_string()))
}

/// Load the encoded bytes behind a reference.
///
/// Remote URLs go through `fetcher` (with retry); files are read with
/// tokio's fs; data URIs are decoded in place.
pub async fn resolve(source: &ImageSource, fetcher: &Fetcher) -> Result<Vec<u8>, DecodeError> {
    let bytes = match source {
        ImageSource::Path(path) => tokio::fs::read(path).await?,
        ImageSource::Url(url) => fetcher.fetch_with_retry(url).await?,
        ImageSource::DataUri(uri) => decode_data_uri(uri)?,
        ImageSource::Bytes(bytes) => bytes.clone(),
    };

    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(bytes)
}
