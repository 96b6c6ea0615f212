//! Unit tests for the glyph renderer.
//!
//! These tests cover the pipeline stages through the public API:
//! - Output dimensions
//! - Luma and ramp mapping
//! - Polarity through ramp ordering
//! - Pre-contrast
//! - Decode failures

use std::io::Cursor;

use glyphgrid::glyph::*;
use glyphgrid::DecodeError;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

fn solid(width: u32, height: u32, color: [u8; 3]) -> SourceImage {
    SourceImage::from_rgb(RgbImage::from_pixel(width, height, Rgb(color)))
}

fn config(preset: Preset, width: u32, aspect: f64) -> RenderConfig {
    RenderConfig::from_preset(preset)
        .with_target_width(width)
        .unwrap()
        .with_aspect_correction(aspect)
        .unwrap()
}

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

// ==================== Dimension Tests ====================

#[test]
fn test_landscape_dimensions() {
    // 200x100 at width 60, aspect 0.5: floor(0.5 * 60 * 0.5) = 15
    let grid = render(&solid(200, 100, [0, 0, 0]), &config(Preset::Cyber, 60, 0.5));
    assert_eq!(grid.width(), 60);
    assert_eq!(grid.height(), 15);
    assert!(grid.rows().iter().all(|row| row.chars().count() == 60));
}

#[test]
fn test_portrait_dimensions() {
    // 100x200 at width 60, aspect 0.5: floor(2 * 60 * 0.5) = 60
    let grid = render(&solid(100, 200, [0, 0, 0]), &config(Preset::Cyber, 60, 0.5));
    assert_eq!(grid.height(), 60);
}

#[test]
fn test_height_is_floored() {
    // 3x2 at width 5, aspect 0.5: floor(2/3 * 5 * 0.5) = floor(1.666..) = 1
    assert_eq!(target_height(3, 2, 5, 0.5), 1);
    let grid = render(&solid(3, 2, [0, 0, 0]), &config(Preset::Binary, 5, 0.5));
    assert_eq!(grid.height(), 1);
    assert_eq!(grid.to_string(), "     ");
}

#[test]
fn test_zero_rows_is_empty_grid() {
    let grid = render(&solid(1000, 10, [255, 255, 255]), &config(Preset::Cyber, 10, 0.5));
    assert!(grid.is_empty());
    assert_eq!(grid.height(), 0);
    assert_eq!(grid.to_string(), "");
}

#[test]
fn test_width_of_one() {
    let grid = render(&solid(10, 40, [255, 255, 255]), &config(Preset::Binary, 1, 0.5));
    assert_eq!(grid.width(), 1);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.to_string(), "#\n#");
}

#[test]
fn test_extreme_aspect_is_clamped_not_fatal() {
    let grid = render(&solid(2, 2, [0, 0, 0]), &config(Preset::Binary, 60, 1e9));
    assert_eq!(grid.height(), MAX_GRID_CELLS / 60);
    assert!((grid.width() as u64) * (grid.height() as u64) <= MAX_GRID_CELLS as u64);
}

#[test]
fn test_upscaling_small_source() {
    let grid = render(&solid(2, 2, [255, 255, 255]), &config(Preset::Standard, 8, 1.0));
    assert_eq!(grid.width(), 8);
    assert_eq!(grid.height(), 8);
}

// ==================== Mapping Tests ====================

#[test]
fn test_black_maps_to_first_glyph() {
    for preset in Preset::ALL {
        let grid = render(&solid(4, 4, [0, 0, 0]), &config(preset, 4, 1.0));
        let first = preset.ramp().first();
        assert!(
            grid.rows().iter().all(|row| row.chars().all(|c| c == first)),
            "preset {} should map black to {:?}",
            preset.name(),
            first
        );
    }
}

#[test]
fn test_white_maps_to_last_glyph() {
    for preset in Preset::ALL {
        let grid = render(&solid(4, 4, [255, 255, 255]), &config(preset, 4, 1.0));
        let last = preset.ramp().last();
        assert!(
            grid.rows().iter().all(|row| row.chars().all(|c| c == last)),
            "preset {} should map white to {:?}",
            preset.name(),
            last
        );
    }
}

#[test]
fn test_checkerboard_binary() {
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(0, 0, Rgb([0, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 255, 255]));
    img.put_pixel(0, 1, Rgb([255, 255, 255]));
    img.put_pixel(1, 1, Rgb([0, 0, 0]));

    let grid = render(&SourceImage::from_rgb(img), &config(Preset::Binary, 2, 1.0));
    assert_eq!(grid.to_string(), " #\n# ");
}

#[test]
fn test_binary_ramp_uses_two_symbols() {
    let mut img = RgbImage::new(16, 16);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let v = ((x * 16 + y) % 256) as u8;
        *px = Rgb([v, v, v]);
    }
    let grid = render(&SourceImage::from_rgb(img), &config(Preset::Binary, 16, 1.0));
    let text = grid.to_string();
    assert!(text.chars().all(|c| c == ' ' || c == '#' || c == '\n'));
}

#[test]
fn test_brightness_is_monotonic_along_gradient() {
    // Source already at target size, so no resampling mixes the columns
    let width = 16;
    let mut img = RgbImage::new(width, 1);
    for x in 0..width {
        let v = (x * 255 / (width - 1)) as u8;
        img.put_pixel(x, 0, Rgb([v, v, v]));
    }
    let ramp: GlyphRamp = STANDARD_RAMP.parse().unwrap();
    let cfg = RenderConfig::new(width, ramp.clone())
        .unwrap()
        .with_aspect_correction(1.0)
        .unwrap();

    let grid = render(&SourceImage::from_rgb(img), &cfg);
    assert_eq!(grid.height(), 1);

    let indices: Vec<usize> = grid.rows()[0]
        .chars()
        .map(|c| ramp.as_slice().iter().position(|&g| g == c).unwrap())
        .collect();
    assert!(indices.windows(2).all(|w| w[0] <= w[1]), "{:?}", indices);
    assert_eq!(indices[0], 0);
    assert_eq!(indices[width as usize - 1], ramp.len() - 1);
}

#[test]
fn test_green_is_brighter_than_red_and_blue() {
    assert!(luma_bt709(0, 255, 0) > luma_bt709(255, 0, 0));
    assert!(luma_bt709(255, 0, 0) > luma_bt709(0, 0, 255));
    assert_eq!(luma_bt709(255, 255, 255), 1.0);
    assert_eq!(luma_bt709(0, 0, 0), 0.0);
}

#[test]
fn test_glyph_index_range() {
    assert_eq!(glyph_index(0, 0, 0, 10), 0);
    assert_eq!(glyph_index(255, 255, 255, 10), 9);
    assert_eq!(glyph_index(128, 128, 128, 2), 0);
}

// ==================== Polarity Tests ====================

#[test]
fn test_reversed_ramp_flips_polarity() {
    let ramp: GlyphRamp = BINARY_RAMP.parse().unwrap();
    let normal = RenderConfig::new(2, ramp.clone()).unwrap();
    let inverted = RenderConfig::new(2, ramp.reversed()).unwrap();
    let source = solid(4, 4, [0, 0, 0]);

    assert_eq!(render(&source, &normal).to_string(), "  ");
    assert_eq!(render(&source, &inverted).to_string(), "##");
}

#[test]
fn test_cyber_preset_draws_bright_as_sparse() {
    let grid = render(&solid(4, 4, [255, 255, 255]), &config(Preset::Cyber, 4, 1.0));
    assert!(grid.to_string().replace('\n', "").chars().all(|c| c == ' '));

    let grid = render(&solid(4, 4, [0, 0, 0]), &config(Preset::Cyber, 4, 1.0));
    assert!(grid.to_string().replace('\n', "").chars().all(|c| c == '@'));
}

// ==================== Determinism ====================

#[test]
fn test_render_is_idempotent() {
    let mut img = RgbImage::new(37, 23);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x * 7) as u8, (y * 11) as u8, ((x + y) * 3) as u8]);
    }
    let source = SourceImage::from_rgb(img);
    let cfg = config(Preset::Blocks, 20, 0.5);

    assert_eq!(render(&source, &cfg), render(&source, &cfg));
}

// ==================== Pre-contrast Tests ====================

#[test]
fn test_brightness_pushes_grey_over_threshold() {
    let source = solid(2, 2, [200, 200, 200]);
    let plain = config(Preset::Binary, 2, 1.0);
    assert_eq!(render(&source, &plain).to_string(), "  \n  ");

    let boosted = plain.with_pre_contrast(Some(PreContrast::new(60.0, 1.0)));
    assert_eq!(render(&source, &boosted).to_string(), "##\n##");
}

#[test]
fn test_identity_pre_contrast_changes_nothing() {
    let mut img = RgbImage::new(8, 8);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x * 30) as u8, (y * 30) as u8, 90]);
    }
    let source = SourceImage::from_rgb(img);
    let plain = config(Preset::Standard, 8, 1.0);
    let identity = plain
        .clone()
        .with_pre_contrast(Some(PreContrast::new(0.0, 1.0)));

    assert_eq!(render(&source, &plain), render(&source, &identity));
}

// ==================== Decode Tests ====================

#[test]
fn test_decode_empty_bytes() {
    assert!(matches!(SourceImage::decode(&[]), Err(DecodeError::Empty)));
}

#[test]
fn test_decode_garbage() {
    let result = SourceImage::decode(b"definitely not an image");
    assert!(matches!(result, Err(DecodeError::Format(_))));
}

#[test]
fn test_decode_truncated_png() {
    let bytes = encode_png(&RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255])));
    let result = SourceImage::decode(&bytes[..bytes.len() / 2]);
    assert!(result.is_err());
}

#[test]
fn test_transparent_pixels_render_as_black() {
    let bytes = encode_png(&RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 0])));
    let grid = render_bytes(&bytes, &config(Preset::Binary, 4, 1.0)).unwrap();
    assert_eq!(grid.to_string(), "    \n    \n    \n    ");
}

#[test]
fn test_translucent_pixels_keep_their_colour() {
    let bytes = encode_png(&RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 128])));
    let grid = render_bytes(&bytes, &config(Preset::Binary, 2, 1.0)).unwrap();
    assert_eq!(grid.to_string(), "##\n##");
}

#[test]
fn test_opaque_png_round_trip() {
    let bytes = encode_png(&RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])));
    let source = SourceImage::decode(&bytes).unwrap();
    assert_eq!((source.width(), source.height()), (4, 4));

    let grid = render(&source, &config(Preset::Minimal, 4, 0.5));
    assert_eq!(grid.to_string(), "####\n####");
}

// ==================== Config Validation ====================

#[test]
fn test_config_rejects_zero_width() {
    assert!(matches!(
        RenderConfig::from_preset(Preset::Cyber).with_target_width(0),
        Err(RenderConfigError::ZeroWidth)
    ));
}

#[test]
fn test_config_rejects_oversized_width() {
    assert!(matches!(
        RenderConfig::from_preset(Preset::Cyber).with_target_width(MAX_TARGET_WIDTH + 1),
        Err(RenderConfigError::TooWide(_))
    ));
}

#[test]
fn test_config_rejects_bad_aspect() {
    for aspect in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(RenderConfig::from_preset(Preset::Cyber)
            .with_aspect_correction(aspect)
            .is_err());
    }
}

#[test]
fn test_ramp_requires_two_glyphs() {
    assert!(matches!("#".parse::<GlyphRamp>(), Err(RampError::TooShort(1))));
    assert!("".parse::<GlyphRamp>().is_err());
}
