//! Perceived brightness using ITU-R BT.709 luma coefficients.
//!
//! Y = 0.2126*R + 0.7152*G + 0.0722*B
//!
//! Coefficients are scaled by 10 000 so the weighted sum stays an exact
//! integer: pure white sums to exactly `LUMA_SCALE` and pure black to 0.

/// BT.709 red coefficient scaled by 10 000.
pub const LUMA_R: u32 = 2126;
/// BT.709 green coefficient scaled by 10 000.
pub const LUMA_G: u32 = 7152;
/// BT.709 blue coefficient scaled by 10 000.
pub const LUMA_B: u32 = 722;

/// Weighted sum of a pure white pixel.
pub const LUMA_SCALE: u32 = (LUMA_R + LUMA_G + LUMA_B) * 255;

/// Exact weighted channel sum in `[0, LUMA_SCALE]`.
#[inline]
pub fn luma_sum(r: u8, g: u8, b: u8) -> u32 {
    LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32
}

/// Perceived brightness in `[0, 1]`.
#[inline]
pub fn luma_bt709(r: u8, g: u8, b: u8) -> f64 {
    luma_sum(r, g, b) as f64 / LUMA_SCALE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        assert_eq!(LUMA_R + LUMA_G + LUMA_B, 10_000);
    }

    #[test]
    fn test_black_and_white_are_exact() {
        assert_eq!(luma_bt709(0, 0, 0), 0.0);
        assert_eq!(luma_bt709(255, 255, 255), 1.0);
    }

    #[test]
    fn test_green_dominates() {
        let r = luma_bt709(255, 0, 0);
        let g = luma_bt709(0, 255, 0);
        let b = luma_bt709(0, 0, 255);
        assert!(g > r && r > b);
        assert!((r - 0.2126).abs() < 1e-12);
        assert!((g - 0.7152).abs() < 1e-12);
        assert!((b - 0.0722).abs() < 1e-12);
    }

    #[test]
    fn test_sum_of_white_is_scale() {
        assert_eq!(luma_sum(255, 255, 255), LUMA_SCALE);
        assert_eq!(LUMA_SCALE, 2_550_000);
    }
}
