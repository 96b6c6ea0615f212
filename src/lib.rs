//! glyphgrid library crate.
//!
//! Converts raster images into fixed-palette glyph grids ("ASCII art")
//! for monospace display. [`glyph`] holds the pure renderer; [`source`],
//! [`cache`] and [`renderer`] wrap it for callers that start from a file,
//! URL or data URI.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod glyph;
pub mod renderer;
pub mod source;

pub use error::DecodeError;
pub use glyph::{render, GlyphGrid, GlyphRamp, Preset, RenderConfig, SourceImage};
pub use renderer::Renderer;
pub use source::{Fetcher, ImageSource};
