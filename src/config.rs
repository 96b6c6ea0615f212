//! Configuration file handling for glyphgrid.
//!
//! Loads configuration from `~/.config/glyphgrid/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_MAX_SIZE_KB;
use crate::source::DEFAULT_NETWORK_RETRIES;

/// Viewports narrower than this many columns get half-width renders.
pub const DEFAULT_NARROW_THRESHOLD: u16 = 100;

/// Configuration file structure for glyphgrid.
/// Loaded from ~/.config/glyphgrid/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// `[render]` - defaults for every render; CLI flags take precedence.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RenderSection {
    /// Preset name (cyber, standard, blocks, minimal, binary)
    pub preset: Option<String>,
    pub width: Option<u32>,
    /// Custom ramp, darkest glyph first
    pub ramp: Option<String>,
    pub aspect: Option<f64>,
    #[serde(default)]
    pub invert: bool,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ViewportConfig {
    #[serde(default = "default_narrow_threshold")]
    pub narrow_threshold: u16,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            narrow_threshold: DEFAULT_NARROW_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_max_size_kb")]
    pub max_size_kb: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            max_size_kb: DEFAULT_MAX_SIZE_KB,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_narrow_threshold() -> u16 {
    DEFAULT_NARROW_THRESHOLD
}

fn default_retries() -> u32 {
    DEFAULT_NETWORK_RETRIES
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_size_kb() -> u64 {
    DEFAULT_MAX_SIZE_KB
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphgrid").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphgrid/config.toml")
        })
}

/// Contents written by `glyphgrid config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# glyphgrid configuration

[render]
# Preset: cyber, standard, blocks, minimal, binary
preset = "cyber"
# Output width in glyphs
# width = 60
# Custom ramp, darkest glyph first (overrides the preset ramp)
# ramp = " .:-=+*#%@"
# Glyph cell correction (0.5 = cells twice as tall as wide)
# aspect = 0.5
# Reverse the ramp
invert = false
# Pre-contrast applied before quantization
# brightness = 0.0
# contrast = 1.0

[viewport]
# Viewports narrower than this get half-width renders
narrow_threshold = 100

[fetch]
retries = 3
timeout_secs = 30

[cache]
enabled = true
# dir = "/tmp/glyphgrid"
max_size_kb = 10240
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.render.preset.is_none());
        assert!(!config.render.invert);
        assert_eq!(config.viewport.narrow_threshold, 100);
        assert_eq!(config.fetch.retries, 3);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_size_kb, 10240);
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let config = Config::parse(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.render.preset.as_deref(), Some("cyber"));
        assert_eq!(config.viewport, ViewportConfig::default());
        assert_eq!(config.fetch, FetchConfig::default());
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = Config::parse(
            r#"
[render]
width = 40
brightness = -10.0

[cache]
enabled = false
"#,
        )
        .unwrap();
        assert_eq!(config.render.width, Some(40));
        assert_eq!(config.render.brightness, Some(-10.0));
        assert!(config.render.contrast.is_none());
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_size_kb, DEFAULT_MAX_SIZE_KB);
        assert_eq!(config.fetch.retries, 3);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render\nwidth = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[viewport]\nnarrow_threshold = 80\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.viewport.narrow_threshold, 80);
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("glyphgrid/config.toml"));
    }
}
