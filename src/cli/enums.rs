//! CLI enum types for preset selection.

use clap::ValueEnum;

use crate::glyph;

/// Visual preset for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PresetArg {
    #[default]
    Cyber,
    Standard,
    Blocks,
    Minimal,
    Binary,
}

impl From<PresetArg> for glyph::Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Cyber => glyph::Preset::Cyber,
            PresetArg::Standard => glyph::Preset::Standard,
            PresetArg::Blocks => glyph::Preset::Blocks,
            PresetArg::Minimal => glyph::Preset::Minimal,
            PresetArg::Binary => glyph::Preset::Binary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_arg_to_preset() {
        assert_eq!(glyph::Preset::from(PresetArg::Cyber), glyph::Preset::Cyber);
        assert_eq!(
            glyph::Preset::from(PresetArg::Standard),
            glyph::Preset::Standard
        );
        assert_eq!(glyph::Preset::from(PresetArg::Blocks), glyph::Preset::Blocks);
        assert_eq!(
            glyph::Preset::from(PresetArg::Minimal),
            glyph::Preset::Minimal
        );
        assert_eq!(glyph::Preset::from(PresetArg::Binary), glyph::Preset::Binary);
    }

    #[test]
    fn test_value_names_match_preset_names() {
        for arg in PresetArg::value_variants() {
            let value = arg.to_possible_value().unwrap();
            assert_eq!(value.get_name(), glyph::Preset::from(*arg).name());
        }
    }
}
