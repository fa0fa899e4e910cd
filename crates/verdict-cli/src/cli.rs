//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use verdict_normalizer::NormalizerConfig;

/// Verdict CLI - Normalize AI resource optimization analyses.
#[derive(Debug, Parser)]
#[command(name = "verdict")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VERDICT_CONFIG")]
    pub config: Option<String>,

    /// Normalizer preset, overriding the configured limits
    #[arg(short, long, value_enum, global = true)]
    pub preset: Option<PresetArg>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdict only)
    Quiet,
}

/// Normalizer limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Standard limits
    Default,
    /// Two items per category
    Compact,
    /// Five items per category, longer reasons
    Detailed,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize one or more analysis payloads
    Normalize(NormalizeArgs),

    /// Show or write the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the normalize command.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Payload files; `-` reads stdin
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Also report which extraction strategy produced each record
    #[arg(short, long)]
    pub strategy: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Print the configuration file path instead
    #[arg(long, conflicts_with = "init")]
    pub path: bool,

    /// Write the effective configuration to the configuration file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for NormalizerConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => NormalizerConfig::default(),
            PresetArg::Compact => NormalizerConfig::compact(),
            PresetArg::Detailed => NormalizerConfig::detailed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_command() {
        let cli = Cli::parse_from(["verdict", "normalize", "a.json", "-"]);
        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.inputs, vec!["a.json", "-"]);
                assert!(!args.strategy);
            }
            _ => panic!("Expected Normalize command"),
        }
    }

    #[test]
    fn test_normalize_requires_input() {
        assert!(Cli::try_parse_from(["verdict", "normalize"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "verdict", "config", "--format", "json", "--preset", "compact", "--verbose",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.preset, Some(PresetArg::Compact));
        assert!(cli.verbose);
    }

    #[test]
    fn test_preset_conversion() {
        let config: NormalizerConfig = PresetArg::Detailed.into();
        assert_eq!(config.max_items_per_category, 5);
    }
}
