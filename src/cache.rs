//! GlyphCache - persistent disk cache for rendered grids.
//!
//! Rendering is a pure function of the encoded image bytes and the
//! [`RenderConfig`](crate::glyph::RenderConfig), so a grid is stored under
//! a hash of both and reused whenever the same pair comes back.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use sha2::{Digest, Sha256};

use crate::glyph::GlyphGrid;

/// Extension of rendered grid files.
const GRID_EXT: &str = "txt";

/// Extension of the sidecar file holding the source description.
const SOURCE_EXT: &str = "source";

/// Default cache size limit in kilobytes (10 MiB).
pub const DEFAULT_MAX_SIZE_KB: u64 = 10 * 1024;

/// Length of a cache key in hex characters.
pub const KEY_LEN: usize = 32;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// True for keys produced by [`GlyphCache::key`]: 32 lowercase hex chars.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LEN && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Write `contents` to a unique temp file beside `path`, then rename it into place.
fn write_atomic(path: &Path, contents: &str) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension(format!(
        "{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::write(&tmp_path, contents)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

/// Persistent disk cache for rendered glyph grids.
#[derive(Debug, Clone)]
pub struct GlyphCache {
    cache_dir: PathBuf,
}

impl GlyphCache {
    /// Create a cache rooted at `cache_dir`.
    /// Does not create the directory - call `ensure_dir_exists()` to create it.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Cache in the platform cache directory.
    /// Default: ~/.cache/glyphgrid/grids/
    pub fn with_default_dir() -> Self {
        Self::new(default_dir())
    }

    /// Ensure the cache directory exists, creating it if necessary.
    pub fn ensure_dir_exists(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.cache_dir)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Deterministic key for an encoded image rendered with a config fingerprint.
    /// Returns a 32-character hex string (first 16 bytes of SHA256).
    pub fn key(image_bytes: &[u8], fingerprint: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(image_bytes);
        hasher.update([0u8]);
        hasher.update(fingerprint.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..16])
    }

    fn grid_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{}", key, GRID_EXT))
    }

    fn source_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{}", key, SOURCE_EXT))
    }

    /// Cached grid for `key`, if present, readable and rectangular.
    ///
    /// Entries with no rows or with rows of differing width are misses.
    pub fn get(&self, key: &str) -> Option<GlyphGrid> {
        let text = std::fs::read_to_string(self.grid_path(key)).ok()?;
        let grid = GlyphGrid::from_text(&text);
        let width = grid.width() as usize;
        let rectangular = grid
            .rows()
            .iter()
            .all(|row| row.chars().count() == width);
        if grid.is_empty() || width == 0 || !rectangular {
            log::warn!("Ignoring malformed cache entry {}", key);
            return None;
        }
        Some(grid)
    }

    /// Store a grid under `key`, overwriting any previous entry.
    pub fn store(&self, key: &str, grid: &GlyphGrid) -> Result<PathBuf, std::io::Error> {
        self.ensure_dir_exists()?;
        let path = self.grid_path(key);
        write_atomic(&path, &grid.to_string())?;
        Ok(path)
    }

    /// Store a grid along with a human-readable description of its source.
    pub fn store_with_source(
        &self,
        key: &str,
        grid: &GlyphGrid,
        source: &str,
    ) -> Result<PathBuf, std::io::Error> {
        let path = self.store(key, grid)?;
        write_atomic(&self.source_path(key), source)?;
        Ok(path)
    }

    /// Store, then trim the cache back under `max_size_kb`.
    pub fn store_with_cleanup(
        &self,
        key: &str,
        grid: &GlyphGrid,
        source: &str,
        max_size_kb: u64,
    ) -> Result<PathBuf, std::io::Error> {
        let path = self.store_with_source(key, grid, source)?;
        self.cleanup_if_needed(max_size_kb)?;
        Ok(path)
    }

    /// All grid files with their metadata.
    fn grid_files(&self) -> Result<Vec<(PathBuf, std::fs::Metadata)>, std::io::Error> {
        let mut files = Vec::new();
        if !self.cache_dir.exists() {
            return Ok(files);
        }

        for entry in std::fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(GRID_EXT) {
                continue;
            }
            if let Ok(metadata) = entry.metadata() {
                if metadata.is_file() {
                    files.push((path, metadata));
                }
            }
        }
        Ok(files)
    }

    /// Remove oldest grids (by modification time) until under `max_size_kb`.
    pub fn cleanup_if_needed(&self, max_size_kb: u64) -> Result<(), std::io::Error> {
        let max_bytes = max_size_kb.saturating_mul(1024);
        let mut files = self.grid_files()?;
        let mut total: u64 = files.iter().map(|(_, m)| m.len()).sum();

        if total <= max_bytes {
            return Ok(());
        }

        files.sort_by_key(|(_, m)| m.modified().unwrap_or(SystemTime::UNIX_EPOCH));

        for (path, metadata) in files {
            if total <= max_bytes {
                break;
            }
            if std::fs::remove_file(&path).is_ok() {
                total = total.saturating_sub(metadata.len());
                let _ = std::fs::remove_file(path.with_extension(SOURCE_EXT));
                log::debug!("Evicted cached grid {}", path.display());
            }
        }

        Ok(())
    }

    /// Total size of all cached grids in bytes.
    pub fn total_size_bytes(&self) -> Result<u64, std::io::Error> {
        Ok(self.grid_files()?.iter().map(|(_, m)| m.len()).sum())
    }

    /// All cached grids, sorted by key.
    pub fn list_entries(&self) -> Result<Vec<CacheEntry>, std::io::Error> {
        let mut entries: Vec<CacheEntry> = self
            .grid_files()?
            .into_iter()
            .map(|(path, metadata)| {
                let key = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string();
                let source = std::fs::read_to_string(self.source_path(&key)).ok();
                CacheEntry {
                    key,
                    source,
                    size_bytes: metadata.len(),
                    path,
                }
            })
            .collect();

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    /// Remove one grid. Returns true if it existed.
    ///
    /// Keys that are not 32 lowercase hex characters are rejected, so a
    /// user-supplied key can never name a file outside the cache directory.
    pub fn remove(&self, key: &str) -> Result<bool, std::io::Error> {
        if !is_valid_key(key) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid cache key '{}': expected {} hex characters", key, KEY_LEN),
            ));
        }
        let path = self.grid_path(key);
        let existed = path.exists();
        if existed {
            std::fs::remove_file(&path)?;
        }
        let _ = std::fs::remove_file(self.source_path(key));
        Ok(existed)
    }

    /// Remove every grid and sidecar. Returns the number of grids removed.
    pub fn clear_all(&self) -> Result<usize, std::io::Error> {
        if !self.cache_dir.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in std::fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            match path.extension().and_then(|e| e.to_str()) {
                Some(GRID_EXT) => {
                    if std::fs::remove_file(&path).is_ok() {
                        count += 1;
                    }
                }
                Some(SOURCE_EXT) => {
                    let _ = std::fs::remove_file(&path);
                }
                _ => {}
            }
        }
        Ok(count)
    }
}

/// Default cache directory: `<platform cache dir>/glyphgrid/grids`.
pub fn default_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("glyphgrid")
        .join("grids")
}

/// Information about one cached grid.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cache key (32 hex chars)
    pub key: String,
    /// Description of the rendered source, if recorded
    pub source: Option<String>,
    pub size_bytes: u64,
    pub path: PathBuf,
}
