//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::PresetArg;
use crate::glyph::MAX_TARGET_WIDTH;

/// Parse and validate a glyph width (> 0).
fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if width == 0 {
        return Err("Width must be greater than 0".to_string());
    }
    if width > MAX_TARGET_WIDTH {
        return Err(format!("Width must be at most {}", MAX_TARGET_WIDTH));
    }
    Ok(width)
}

/// Parse and validate an aspect correction (finite, > 0).
fn parse_aspect(s: &str) -> Result<f64, String> {
    let aspect: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(format!("Aspect correction must be > 0, got {}", aspect));
    }
    Ok(aspect)
}

/// Render images as glyph grids for monospace display
#[derive(Parser, Debug)]
#[command(name = "glyphgrid")]
#[command(version, about = "Render images as ASCII glyph grids", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an image file, http(s) URL or data URI
    Render(RenderArgs),
    /// List built-in presets
    Presets,
    /// Rendered grid cache management
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Image path, http(s) URL or data: URI
    pub source: String,

    /// Visual preset
    #[arg(long, short)]
    pub preset: Option<PresetArg>,

    /// Output width in glyphs
    #[arg(long, short, value_parser = parse_width)]
    pub width: Option<u32>,

    /// Custom ramp, darkest glyph first (overrides the preset ramp)
    #[arg(long)]
    pub ramp: Option<String>,

    /// Glyph cell correction (0.5 = cells twice as tall as wide)
    #[arg(long, value_parser = parse_aspect)]
    pub aspect: Option<f64>,

    /// Brightness offset applied before quantization
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<f32>,

    /// Contrast factor applied before quantization (1.0 = unchanged, negative inverts)
    #[arg(long, allow_hyphen_values = true)]
    pub contrast: Option<f32>,

    /// Reverse the ramp
    #[arg(long)]
    pub invert: bool,

    /// Viewport width in columns; narrow viewports get half-width renders
    #[arg(long)]
    pub viewport_cols: Option<u16>,

    /// Skip the rendered grid cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
    /// List cached grids
    List,
    /// Remove one cached grid, or all of them
    Clear {
        /// Key of the grid to remove
        key: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
