use clap::Parser;

use glyphgrid::cli::{self, Args, Command};
use glyphgrid::config::Config;

fn main() {
    // Log to stderr, controlled by RUST_LOG
    env_logger::init();

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::Render(render_args) => cli::run_render(&render_args, &config),
        Command::Presets => {
            cli::list_presets();
            Ok(())
        }
        Command::Cache { action } => cli::run_cache(action, &config),
        Command::Config { action } => {
            cli::handle_config_action(action, &config, args.config.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
