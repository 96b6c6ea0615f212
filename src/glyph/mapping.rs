//! Brightness to glyph mapping.

use super::luma::{luma_sum, LUMA_SCALE};
use super::ramp::GlyphRamp;

/// Map an exact luma sum to a ramp index.
///
/// Equivalent to `floor(brightness * (levels - 1))` clamped to
/// `[0, levels - 1]`, but done in integer math so that a brightness of
/// exactly 1.0 lands on the last index without rounding drift.
#[inline]
pub fn index_for_sum(sum: u32, levels: usize) -> usize {
    if levels < 2 {
        return 0;
    }
    let top = (levels - 1) as u64;
    let idx = (sum.min(LUMA_SCALE) as u64 * top) / LUMA_SCALE as u64;
    idx.min(top) as usize
}

/// Ramp index for an RGB pixel.
#[inline]
pub fn glyph_index(r: u8, g: u8, b: u8, levels: usize) -> usize {
    index_for_sum(luma_sum(r, g, b), levels)
}

/// Ramp glyph for an RGB pixel.
#[inline]
pub fn glyph_for(r: u8, g: u8, b: u8, ramp: &GlyphRamp) -> char {
    ramp.glyph(glyph_index(r, g, b, ramp.len()))
}
