//! Verdict CLI - Command-line interface for the verdict normalizer.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use verdict_cli::commands;
use verdict_cli::config::Settings;
use verdict_cli::{Cli, Command, Config, Formatter};
use verdict_normalizer::{Normalizer, NormalizerConfig};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> verdict_cli::Result<()> {
    // Load config, from --config if given
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // A preset replaces the configured limits
    let normalizer_config: NormalizerConfig = match cli.preset {
        Some(preset) => preset.into(),
        None => config.normalizer.clone(),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Normalize(args) => {
            let normalizer = Normalizer::new(normalizer_config);
            commands::execute_normalize(args, &normalizer, &formatter)?;
        }
        Command::Config(args) => {
            let effective = Config {
                settings: Settings {
                    color: color_enabled,
                    format,
                },
                normalizer: normalizer_config,
            };
            commands::execute_config(args, &config_path, &effective, &formatter)?;
        }
    }

    Ok(())
}
