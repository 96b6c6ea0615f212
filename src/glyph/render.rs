//! Image to glyph grid rendering.

use std::fmt;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use super::contrast::{apply_pre_contrast, PreContrast};
use super::dimensions::{target_height, MAX_TARGET_WIDTH};
use super::mapping::glyph_for;
use super::ramp::{GlyphRamp, Preset};
use crate::error::DecodeError;

/// Errors raised when building a [`RenderConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderConfigError {
    #[error("target width must be a positive integer")]
    ZeroWidth,

    #[error("target width {0} exceeds the maximum of {max}", max = MAX_TARGET_WIDTH)]
    TooWide(u32),

    #[error("aspect correction must be a finite number > 0, got {0}")]
    InvalidAspect(f64),
}

fn check_width(target_width: u32) -> Result<(), RenderConfigError> {
    match target_width {
        0 => Err(RenderConfigError::ZeroWidth),
        w if w > MAX_TARGET_WIDTH => Err(RenderConfigError::TooWide(w)),
        _ => Ok(()),
    }
}

/// Immutable parameters for one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    target_width: u32,
    ramp: GlyphRamp,
    aspect_correction: f64,
    pre_contrast: Option<PreContrast>,
}

impl RenderConfig {
    /// Config with the default aspect correction and no pre-contrast.
    pub fn new(target_width: u32, ramp: GlyphRamp) -> Result<Self, RenderConfigError> {
        check_width(target_width)?;
        Ok(Self {
            target_width,
            ramp,
            aspect_correction: super::ramp::DEFAULT_ASPECT_CORRECTION,
            pre_contrast: None,
        })
    }

    /// Config carrying a preset's ramp, width and aspect correction.
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            target_width: preset.width(),
            ramp: preset.ramp(),
            aspect_correction: preset.aspect_correction(),
            pre_contrast: None,
        }
    }

    pub fn with_target_width(mut self, target_width: u32) -> Result<Self, RenderConfigError> {
        check_width(target_width)?;
        self.target_width = target_width;
        Ok(self)
    }

    pub fn with_aspect_correction(mut self, aspect: f64) -> Result<Self, RenderConfigError> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(RenderConfigError::InvalidAspect(aspect));
        }
        self.aspect_correction = aspect;
        Ok(self)
    }

    pub fn with_ramp(mut self, ramp: GlyphRamp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn with_pre_contrast(mut self, pre: Option<PreContrast>) -> Self {
        self.pre_contrast = pre;
        self
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    pub fn aspect_correction(&self) -> f64 {
        self.aspect_correction
    }

    pub fn pre_contrast(&self) -> Option<PreContrast> {
        self.pre_contrast
    }

    /// Stable textual identity of every parameter that affects output.
    pub fn fingerprint(&self) -> String {
        let pre = match self.pre_contrast {
            Some(p) => format!("{:08x}:{:08x}", p.brightness.to_bits(), p.contrast.to_bits()),
            None => "none".to_string(),
        };
        format!(
            "w={};a={:016x};p={};r={}",
            self.target_width,
            self.aspect_correction.to_bits(),
            pre,
            self.ramp
        )
    }
}

/// A decoded RGB raster.
///
/// Colour channels are kept straight (not premultiplied): a translucent
/// pixel keeps its own colour, and only fully transparent pixels read as black.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Decode an encoded image (PNG, JPEG, GIF, WebP, ...) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(decoded))
    }

    fn from_dynamic(decoded: DynamicImage) -> Self {
        if !decoded.color().has_alpha() {
            return Self::from_rgb(decoded.to_rgb8());
        }

        let rgba = decoded.to_rgba8();
        let mut pixels = RgbImage::new(rgba.width(), rgba.height());
        for (dst, src) in pixels.pixels_mut().zip(rgba.pixels()) {
            if src[3] != 0 {
                dst.0 = [src[0], src[1], src[2]];
            }
        }
        Self::from_rgb(pixels)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Rendered text grid: `height()` rows of exactly `width()` glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    width: u32,
    rows: Vec<String>,
}

impl GlyphGrid {
    /// Grid with no rows.
    pub fn empty(width: u32) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// Rebuild a grid from its newline-joined form.
    pub fn from_text(text: &str) -> Self {
        let rows: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        let width = rows.first().map(|r| r.chars().count() as u32).unwrap_or(0);
        Self { width, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows joined with `\n`; the last row has no terminator.
impl fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Render a decoded image into a glyph grid.
///
/// 1. rows = floor(H / W * width * aspect_correction)
/// 2. bilinear resample to width x rows
/// 3. optional pre-contrast
/// 4-6. BT.709 luma per pixel, mapped onto the ramp
///
/// A zero-row result is an empty grid, not an error.
pub fn render(source: &SourceImage, config: &RenderConfig) -> GlyphGrid {
    let width = config.target_width();
    let height = target_height(
        source.width(),
        source.height(),
        width,
        config.aspect_correction(),
    );
    log::debug!(
        "rendering {}x{} source into {}x{} glyphs",
        source.width(),
        source.height(),
        width,
        height
    );

    if height == 0 {
        return GlyphGrid::empty(width);
    }

    let mut pixels = if source.pixels.dimensions() == (width, height) {
        source.pixels.clone()
    } else {
        imageops::resize(&source.pixels, width, height, FilterType::Triangle)
    };

    if let Some(pre) = config.pre_contrast() {
        apply_pre_contrast(&mut pixels, pre);
    }

    let ramp = config.ramp();
    let rows = pixels
        .rows()
        .map(|row| row.map(|px| glyph_for(px[0], px[1], px[2], ramp)).collect::<String>())
        .collect();

    GlyphGrid { width, rows }
}

/// Decode inline bytes and render them.
pub fn render_bytes(bytes: &[u8], config: &RenderConfig) -> Result<GlyphGrid, DecodeError> {
    let source = SourceImage::decode(bytes)?;
    Ok(render(&source, config))
}
