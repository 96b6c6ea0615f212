//! Subcommand handlers for render, presets, cache and config actions.

use std::path::Path;
use std::time::Duration;

use super::args::{CacheAction, ConfigAction, RenderArgs};
use crate::cache::GlyphCache;
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};
use crate::error::DecodeError;
use crate::glyph::{GlyphRamp, PreContrast, Preset, RenderConfig};
use crate::renderer::Renderer;
use crate::source::{Fetcher, ImageSource};

/// Halve `width` when the viewport is narrower than `narrow_threshold`.
///
/// This is caller policy; the renderer itself only sees the final width.
pub fn responsive_width(width: u32, viewport_cols: Option<u16>, narrow_threshold: u16) -> u32 {
    match viewport_cols {
        Some(cols) if cols < narrow_threshold => (width / 2).max(1),
        _ => width,
    }
}

/// Resolve the effective render config.
///
/// Precedence: CLI flags, then the `[render]` config section, then the preset.
pub fn build_render_config(args: &RenderArgs, config: &Config) -> Result<RenderConfig, String> {
    let section = &config.render;

    let preset = match (args.preset, section.preset.as_deref()) {
        (Some(p), _) => Preset::from(p),
        (None, Some(name)) => Preset::from_name(name)
            .ok_or_else(|| format!("Unknown preset '{}' in config file", name))?,
        (None, None) => Preset::default(),
    };
    let mut render_config = RenderConfig::from_preset(preset);

    if let Some(ramp) = args.ramp.as_deref().or(section.ramp.as_deref()) {
        let ramp: GlyphRamp = ramp
            .parse()
            .map_err(|e| format!("Invalid ramp '{}': {}", ramp, e))?;
        render_config = render_config.with_ramp(ramp);
    }

    if args.invert || section.invert {
        let reversed = render_config.ramp().reversed();
        render_config = render_config.with_ramp(reversed);
    }

    let width = args.width.or(section.width).unwrap_or(preset.width());
    let width = responsive_width(width, args.viewport_cols, config.viewport.narrow_threshold);
    render_config = render_config
        .with_target_width(width)
        .map_err(|e| e.to_string())?;

    if let Some(aspect) = args.aspect.or(section.aspect) {
        render_config = render_config
            .with_aspect_correction(aspect)
            .map_err(|e| e.to_string())?;
    }

    let brightness = args.brightness.or(section.brightness);
    let contrast = args.contrast.or(section.contrast);
    if brightness.is_some() || contrast.is_some() {
        let pre = PreContrast::new(brightness.unwrap_or(0.0), contrast.unwrap_or(1.0));
        render_config = render_config.with_pre_contrast(Some(pre));
    }

    Ok(render_config)
}

/// Build a renderer from the `[fetch]` and `[cache]` sections.
pub fn build_renderer(config: &Config, use_cache: bool) -> Result<Renderer, String> {
    let fetcher = Fetcher::with_settings(
        Duration::from_secs(config.fetch.timeout_secs.max(1)),
        config.fetch.retries,
    )
    .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    let mut renderer = Renderer::new(fetcher);
    if use_cache && config.cache.enabled {
        renderer = renderer.with_cache(open_cache(config), config.cache.max_size_kb);
    }
    Ok(renderer)
}

fn open_cache(config: &Config) -> GlyphCache {
    match &config.cache.dir {
        Some(dir) => GlyphCache::new(dir.clone()),
        None => GlyphCache::with_default_dir(),
    }
}

/// Render one source and print the grid to stdout.
///
/// On a decode failure the fallback message is printed in place of the grid.
pub fn run_render(args: &RenderArgs, config: &Config) -> Result<(), String> {
    let render_config = build_render_config(args, config)?;
    let renderer = build_renderer(config, !args.no_cache)?;
    let source = ImageSource::parse(&args.source);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to create async runtime: {}", e))?;

    match rt.block_on(renderer.render(&source, &render_config)) {
        Ok(grid) => {
            println!("{}", grid);
            Ok(())
        }
        Err(e) => {
            log::error!("Render of {} failed: {}", source, e);
            println!("{}", DecodeError::FALLBACK_MESSAGE);
            Err(e.to_string())
        }
    }
}

/// Print every preset with its ramp.
pub fn list_presets() {
    println!("Available presets:");
    for preset in Preset::ALL {
        println!(
            "  {:<10} width {:<3} aspect {:<4} ramp \"{}\"",
            preset.name(),
            preset.width(),
            preset.aspect_correction(),
            preset.ramp_str()
        );
    }
    println!();
    println!("Use --preset <name> to select one, --invert to reverse its ramp.");
}

/// Handle cache subcommand actions.
pub fn run_cache(action: CacheAction, config: &Config) -> Result<(), String> {
    let cache = open_cache(config);

    match action {
        CacheAction::List => {
            let entries = cache
                .list_entries()
                .map_err(|e| format!("Failed to list cache entries: {}", e))?;

            if entries.is_empty() {
                println!("Cache is empty.");
                return Ok(());
            }

            println!("Cached grids:\n");
            for entry in &entries {
                println!(
                    "  {} {:>9} {}",
                    entry.key,
                    format_size(entry.size_bytes),
                    entry.source.as_deref().unwrap_or("(unknown source)")
                );
            }

            let total = cache
                .total_size_bytes()
                .map_err(|e| format!("Failed to calculate total size: {}", e))?;
            println!("\nTotal: {} grids, {}", entries.len(), format_size(total));
            Ok(())
        }
        CacheAction::Clear { key: Some(key) } => {
            let removed = cache
                .remove(&key)
                .map_err(|e| format!("Failed to remove cached grid: {}", e))?;
            if removed {
                println!("Removed cached grid: {}", key);
            } else {
                println!("No cached grid found with key: {}", key);
            }
            Ok(())
        }
        CacheAction::Clear { key: None } => {
            let count = cache
                .clear_all()
                .map_err(|e| format!("Failed to clear cache: {}", e))?;
            println!("Removed {} cached grid(s).", count);
            Ok(())
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let preset = config.render.preset.as_deref().unwrap_or("cyber");
            println!("Current configuration:");
            println!("  Preset: {}", preset);
            match config.render.width {
                Some(w) => println!("  Width: {}", w),
                None => println!("  Width: preset default"),
            }
            if let Some(ramp) = &config.render.ramp {
                println!("  Ramp: \"{}\"", ramp);
            }
            println!("  Invert: {}", if config.render.invert { "yes" } else { "no" });
            println!("  Narrow viewport below: {} columns", config.viewport.narrow_threshold);
            println!(
                "  Fetch: {} retries, {}s timeout",
                config.fetch.retries, config.fetch.timeout_secs
            );
            println!(
                "  Cache: {} ({} KB max)",
                if config.cache.enabled { "enabled" } else { "disabled" },
                config.cache.max_size_kb
            );
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            write_default_config(&path)?;
            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

/// Write the default config to `path`, refusing to overwrite.
pub fn write_default_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!(
            "Config file already exists: {}\nUse 'glyphgrid config show' to view current settings.",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Error creating config directory: {}", e))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML)
        .map_err(|e| format!("Error writing config file: {}", e))
}

/// Human-readable byte size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
