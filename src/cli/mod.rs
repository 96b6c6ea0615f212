//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, CacheAction, Command, ConfigAction, RenderArgs};
pub use commands::{
    build_render_config, build_renderer, format_size, handle_config_action, list_presets,
    responsive_width, run_cache, run_render, write_default_config,
};
pub use enums::PresetArg;
