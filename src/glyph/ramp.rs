//! Glyph ramps and the named visual presets built on them.

use std::fmt;
use std::str::FromStr;

/// Ramp used by the chat UI: bright pixels map to sparse glyphs.
pub const CYBER_RAMP: &str = "@#S%?*+;:,.. ";

/// Standard ASCII density ramp (10 levels), bright pixels map to dense glyphs.
pub const STANDARD_RAMP: &str = " .:-=+*#%@";

/// Unicode block ramp (5 levels).
pub const BLOCKS_RAMP: &str = " ░▒▓█";

/// Minimal ramp (4 levels) for a clean look.
pub const MINIMAL_RAMP: &str = " .:#";

/// Two-symbol ramp producing a strictly binary grid.
pub const BINARY_RAMP: &str = " #";

/// Default column count used by every preset.
pub const DEFAULT_WIDTH: u32 = 60;

/// Default aspect correction: glyph cells twice as tall as wide.
pub const DEFAULT_ASPECT_CORRECTION: f64 = 0.5;

/// Errors raised when building a ramp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RampError {
    #[error("glyph ramp needs at least 2 glyphs, got {0}")]
    TooShort(usize),

    #[error("glyph ramp may not contain line breaks")]
    LineBreak,
}

/// Ordered glyph palette. Index 0 is shown for the darkest pixels,
/// the last index for the brightest.
///
/// Whether the last glyph is "dense" or "sparse" is up to the caller;
/// the renderer only follows the ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from an ordered list of glyphs.
    pub fn new(glyphs: Vec<char>) -> Result<Self, RampError> {
        if glyphs.len() < 2 {
            return Err(RampError::TooShort(glyphs.len()));
        }
        // Rows are newline-joined, so a break inside a row would split it
        if glyphs.iter().any(|&c| c == '\n' || c == '\r') {
            return Err(RampError::LineBreak);
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs in the ramp (always >= 2).
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    pub fn first(&self) -> char {
        self.glyphs[0]
    }

    pub fn last(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    pub fn as_slice(&self) -> &[char] {
        &self.glyphs
    }

    /// The same ramp with the opposite polarity.
    pub fn reversed(&self) -> Self {
        let mut glyphs = self.glyphs.clone();
        glyphs.reverse();
        Self { glyphs }
    }
}

impl FromStr for GlyphRamp {
    type Err = RampError;

    /// Every `char` of the string becomes one glyph, in order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars().collect())
    }
}

impl fmt::Display for GlyphRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in &self.glyphs {
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

/// Named visual presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Chat UI look, bright → sparse glyphs
    #[default]
    Cyber,
    /// 10-level ASCII, bright → dense glyphs
    Standard,
    /// Unicode block characters
    Blocks,
    /// 4-level clean look
    Minimal,
    /// Two symbols only
    Binary,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Cyber,
        Preset::Standard,
        Preset::Blocks,
        Preset::Minimal,
        Preset::Binary,
    ];

    /// Ramp characters for this preset.
    pub fn ramp_str(&self) -> &'static str {
        match self {
            Preset::Cyber => CYBER_RAMP,
            Preset::Standard => STANDARD_RAMP,
            Preset::Blocks => BLOCKS_RAMP,
            Preset::Minimal => MINIMAL_RAMP,
            Preset::Binary => BINARY_RAMP,
        }
    }

    pub fn ramp(&self) -> GlyphRamp {
        GlyphRamp {
            glyphs: self.ramp_str().chars().collect(),
        }
    }

    pub fn aspect_correction(&self) -> f64 {
        DEFAULT_ASPECT_CORRECTION
    }

    pub fn width(&self) -> u32 {
        DEFAULT_WIDTH
    }

    /// Cycle to the next preset.
    ///
    /// Order: Cyber -> Standard -> Blocks -> Minimal -> Binary -> Cyber
    pub fn next(&self) -> Self {
        match self {
            Preset::Cyber => Preset::Standard,
            Preset::Standard => Preset::Blocks,
            Preset::Blocks => Preset::Minimal,
            Preset::Minimal => Preset::Binary,
            Preset::Binary => Preset::Cyber,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Cyber => "cyber",
            Preset::Standard => "standard",
            Preset::Blocks => "blocks",
            Preset::Minimal => "minimal",
            Preset::Binary => "binary",
        }
    }

    /// Look a preset up by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_short_ramps() {
        assert_eq!(GlyphRamp::new(vec![]), Err(RampError::TooShort(0)));
        assert_eq!(GlyphRamp::new(vec!['#']), Err(RampError::TooShort(1)));
        assert!(GlyphRamp::new(vec![' ', '#']).is_ok());
    }

    #[test]
    fn test_new_rejects_line_breaks() {
        assert_eq!(" \n#".parse::<GlyphRamp>(), Err(RampError::LineBreak));
        assert_eq!(" \r#".parse::<GlyphRamp>(), Err(RampError::LineBreak));
    }

    #[test]
    fn test_from_str_splits_chars() {
        let ramp: GlyphRamp = " ░▒▓█".parse().unwrap();
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp.first(), ' ');
        assert_eq!(ramp.last(), '█');
    }

    #[test]
    fn test_glyph_clamps_index() {
        let ramp: GlyphRamp = " #".parse().unwrap();
        assert_eq!(ramp.glyph(0), ' ');
        assert_eq!(ramp.glyph(1), '#');
        assert_eq!(ramp.glyph(99), '#');
    }

    #[test]
    fn test_reversed_flips_polarity() {
        let ramp: GlyphRamp = STANDARD_RAMP.parse().unwrap();
        let rev = ramp.reversed();
        assert_eq!(rev.first(), '@');
        assert_eq!(rev.last(), ' ');
        assert_eq!(rev.reversed(), ramp);
    }

    #[test]
    fn test_display_round_trips_string() {
        let ramp: GlyphRamp = CYBER_RAMP.parse().unwrap();
        assert_eq!(ramp.to_string(), CYBER_RAMP);
    }

    #[test]
    fn test_cyber_ramp_keeps_repeated_glyphs() {
        // Two adjacent dots near the sparse end
        let ramp = Preset::Cyber.ramp();
        assert_eq!(ramp.len(), 13);
        assert_eq!(ramp.glyph(10), '.');
        assert_eq!(ramp.glyph(11), '.');
    }

    #[test]
    fn test_all_presets_have_valid_ramps() {
        for preset in Preset::ALL {
            assert!(preset.ramp().len() >= 2, "{} ramp too short", preset.name());
            assert!(preset.aspect_correction() > 0.0);
            assert!(preset.width() > 0);
        }
    }

    #[test]
    fn test_preset_cycle_returns_to_start() {
        let mut p = Preset::default();
        for _ in 0..Preset::ALL.len() {
            p = p.next();
        }
        assert_eq!(p, Preset::default());
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(Preset::from_name("blocks"), Some(Preset::Blocks));
        assert_eq!(Preset::from_name(" CYBER "), Some(Preset::Cyber));
        assert_eq!(Preset::from_name("sepia"), None);
    }
}
