//! Pre-quantization brightness/contrast adjustment.

use image::RgbImage;

/// Per-channel affine transform applied before luminance extraction.
///
/// `value' = clamp((value - 128) * contrast + 128 + brightness, 0, 255)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreContrast {
    /// Offset added after scaling, in channel units
    pub brightness: f32,
    /// Scale around mid-gray; 1.0 is identity
    pub contrast: f32,
}

impl Default for PreContrast {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

impl PreContrast {
    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    /// True when the transform leaves every channel unchanged.
    pub fn is_identity(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 1.0
    }

    /// Adjust a single channel value.
    #[inline]
    pub fn adjust(&self, value: u8) -> u8 {
        let v = (value as f32 - 128.0) * self.contrast + 128.0 + self.brightness;
        if v.is_nan() {
            return value;
        }
        v.clamp(0.0, 255.0).round() as u8
    }
}

/// Apply `pre` to every channel of every pixel, in place.
pub fn apply_pre_contrast(image: &mut RgbImage, pre: PreContrast) {
    if pre.is_identity() {
        return;
    }

    // Every channel value maps independently, so precompute all 256.
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = pre.adjust(i as u8);
    }

    for channel in image.iter_mut() {
        *channel = lut[*channel as usize];
    }
}
