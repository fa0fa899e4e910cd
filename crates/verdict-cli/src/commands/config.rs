//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;
use verdict_normalizer::NormalizerConfig;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config_path: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    if args.path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if args.init {
        init_config(config_path, config, args.force)?;
        println!(
            "{}",
            formatter.info(&format!("Wrote {}", config_path.display()))
        );
        return Ok(());
    }

    if !config_path.exists() {
        eprintln!(
            "{}",
            formatter.info(&format!("{} not found, showing defaults", config_path.display()))
        );
    }
    println!("{}", render_config(&config.normalizer)?);
    Ok(())
}

/// Write `config` to `config_path`, refusing to replace a file unless forced.
pub fn init_config(config_path: &Path, config: &Config, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists; pass --force to overwrite it",
            config_path.display()
        )));
    }
    config.validate()?;
    config.save_to(config_path)
}

/// The effective normalizer configuration as a `[normalizer]` TOML table.
pub fn render_config(normalizer_config: &NormalizerConfig) -> Result<String> {
    let body = normalizer_config.to_toml().map_err(CliError::Config)?;
    Ok(format!("[normalizer]\n{}", body))
}
