//! Image to glyph grid ("ASCII art") renderer.
//!
//! The pipeline, in fixed order:
//!
//! 1. **Dimensions** - glyph rows from the source aspect and a glyph-cell correction
//! 2. **Resample** - bilinear resize to exactly columns x rows pixels
//! 3. **Pre-contrast** - optional per-channel brightness/contrast transform
//! 4. **Luma** - BT.709 perceived brightness per pixel
//! 5. **Mapping** - brightness to an index into the caller's [`GlyphRamp`]
//!
//! Polarity (bright pixels as dense or sparse glyphs) is decided solely by the
//! ramp ordering. See [`Preset`] for the built-in ramps.

mod contrast;
mod dimensions;
mod luma;
mod mapping;
mod ramp;
mod render;

pub use contrast::{apply_pre_contrast, PreContrast};
pub use dimensions::{target_height, MAX_GRID_CELLS, MAX_TARGET_WIDTH};
pub use luma::{luma_bt709, luma_sum, LUMA_SCALE};
pub use mapping::{glyph_for, glyph_index, index_for_sum};
pub use ramp::{
    GlyphRamp, Preset, RampError, BINARY_RAMP, BLOCKS_RAMP, CYBER_RAMP, DEFAULT_ASPECT_CORRECTION,
    DEFAULT_WIDTH, MINIMAL_RAMP, STANDARD_RAMP,
};
pub use render::{render, render_bytes, GlyphGrid, RenderConfig, RenderConfigError, SourceImage};
