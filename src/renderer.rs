//! Async front door: resolve a reference, decode, render, cache.

use crate::cache::{GlyphCache, DEFAULT_MAX_SIZE_KB};
use crate::error::DecodeError;
use crate::glyph::{render_bytes, GlyphGrid, RenderConfig};
use crate::source::{resolve, Fetcher, ImageSource};

/// Renders image references into glyph grids.
///
/// Calls share no mutable state apart from the optional on-disk cache,
/// so a single `Renderer` can serve any number of concurrent renders.
/// Callers that lose interest in a result simply drop the future.
#[derive(Debug, Clone)]
pub struct Renderer {
    fetcher: Fetcher,
    cache: Option<GlyphCache>,
    cache_max_kb: u64,
}

impl Renderer {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            cache: None,
            cache_max_kb: DEFAULT_MAX_SIZE_KB,
        }
    }

    /// Reuse grids from `cache`, trimming it to `max_size_kb` after each store.
    pub fn with_cache(mut self, cache: GlyphCache, max_size_kb: u64) -> Self {
        self.cache = Some(cache);
        self.cache_max_kb = max_size_kb;
        self
    }

    pub fn cache(&self) -> Option<&GlyphCache> {
        self.cache.as_ref()
    }

    /// Render `source` with `config`.
    ///
    /// Decode and resample run on tokio's blocking pool. Cache failures are
    /// logged and never fail the render.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` when the source cannot be loaded or decoded.
    pub async fn render(
        &self,
        source: &ImageSource,
        config: &RenderConfig,
    ) -> Result<GlyphGrid, DecodeError> {
        let bytes = resolve(source, &self.fetcher).await?;

        let key = self
            .cache
            .as_ref()
            .map(|_| GlyphCache::key(&bytes, &config.fingerprint()));

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            match cache.get(key) {
                Some(grid) if grid.width() == config.target_width() => {
                    log::info!("Cache hit for {} ({})", source, key);
                    return Ok(grid);
                }
                Some(_) => log::warn!("Cached grid {} has the wrong width, re-rendering", key),
                None => {}
            }
        }

        let owned_config = config.clone();
        let grid = tokio::task::spawn_blocking(move || render_bytes(&bytes, &owned_config))
            .await
            .map_err(|e| {
                log::error!("Decode task failed: {}", e);
                DecodeError::Interrupted
            })??;

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            // An empty grid has no width to recover from text
            if !grid.is_empty() {
                match cache.store_with_cleanup(key, &grid, &source.to_string(), self.cache_max_kb) {
                    Ok(path) => log::info!("Cached grid for {} at {}", source, path.display()),
                    Err(e) => log::warn!("Failed to cache grid for {}: {}", source, e),
                }
            }
        }

        Ok(grid)
    }
}
