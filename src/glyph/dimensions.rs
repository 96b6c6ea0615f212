//! Output grid dimensions with aspect-ratio correction.

/// Largest number of glyph cells (rows x columns) a render may produce.
pub const MAX_GRID_CELLS: u32 = 1 << 20;

/// Widest grid a [`RenderConfig`](super::RenderConfig) accepts.
pub const MAX_TARGET_WIDTH: u32 = 4096;

/// Compute the number of glyph rows for a source image.
///
/// Monospace glyph cells are taller than wide, so rows are scaled by
/// `aspect_correction` (0.5 for cells twice as tall as wide). The result is
/// `floor((src_height / src_width) * target_width * aspect_correction)`.
///
/// Degenerate inputs (zero-sized source, zero width, non-finite or
/// non-positive correction) yield 0 rows. The row count is clamped so the
/// grid never exceeds [`MAX_GRID_CELLS`].
///
/// # Example
/// ```
/// use glyphgrid::glyph::target_height;
/// // 640x480 at 60 columns with 2:1 glyph cells
/// assert_eq!(target_height(640, 480, 60, 0.5), 22);
/// ```
pub fn target_height(src_width: u32, src_height: u32, target_width: u32, aspect_correction: f64) -> u32 {
    if src_width == 0 || src_height == 0 || target_width == 0 {
        return 0;
    }
    if !aspect_correction.is_finite() || aspect_correction <= 0.0 {
        return 0;
    }

    let max_rows = MAX_GRID_CELLS / target_width;
    let rows = (src_height as f64 / src_width as f64) * target_width as f64 * aspect_correction;
    if rows >= max_rows as f64 {
        return max_rows;
    }
    rows.floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_source_halves_rows() {
        assert_eq!(target_height(100, 100, 60, 0.5), 30);
    }

    #[test]
    fn test_aspect_one_preserves_pixel_ratio() {
        assert_eq!(target_height(2, 2, 2, 1.0), 2);
        assert_eq!(target_height(200, 100, 80, 1.0), 40);
    }

    #[test]
    fn test_floors_fractional_rows() {
        // 480/640 * 60 * 0.5 = 22.5
        assert_eq!(target_height(640, 480, 60, 0.5), 22);
    }

    #[test]
    fn test_wide_short_source_gives_zero_rows() {
        // 1/1000 * 10 * 0.5 = 0.005
        assert_eq!(target_height(1000, 1, 10, 0.5), 0);
    }

    #[test]
    fn test_degenerate_inputs_give_zero_rows() {
        assert_eq!(target_height(0, 100, 60, 0.5), 0);
        assert_eq!(target_height(100, 0, 60, 0.5), 0);
        assert_eq!(target_height(100, 100, 0, 0.5), 0);
        assert_eq!(target_height(100, 100, 60, 0.0), 0);
        assert_eq!(target_height(100, 100, 60, f64::NAN), 0);
    }

    #[test]
    fn test_tall_source_grows_rows() {
        assert_eq!(target_height(100, 400, 60, 0.5), 120);
    }

    #[test]
    fn test_huge_aspect_is_clamped_to_cell_budget() {
        let rows = target_height(2, 2, 60, 1e9);
        assert_eq!(rows, MAX_GRID_CELLS / 60);
        assert!(rows as u64 * 60 <= MAX_GRID_CELLS as u64);
    }

    #[test]
    fn test_extremely_tall_source_is_clamped() {
        assert_eq!(target_height(1, u32::MAX, 100, 0.5), MAX_GRID_CELLS / 100);
        assert_eq!(target_height(1, 1, 100, f64::MAX), MAX_GRID_CELLS / 100);
    }

    #[test]
    fn test_budget_at_max_width() {
        // 4096 rows wanted, 256 fit
        assert_eq!(target_height(100, 100, MAX_TARGET_WIDTH, 1.0), 256);
        // 204.8 rows wanted, under the budget
        assert_eq!(target_height(100, 50, MAX_TARGET_WIDTH, 0.1), 204);
    }
}
