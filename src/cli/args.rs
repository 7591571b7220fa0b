//! CLI argument definitions.

use super::validators::{parse_threads, parse_timeout_secs};
use crate::output::OutputMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Identify a plant from a photo.
#[derive(Debug, Parser)]
#[command(name = "leafy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Photo to identify.
    pub photo: Option<PathBuf>,

    /// Options for identification.
    #[command(flatten)]
    pub identify: IdentifyArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the species labels the model predicts.
    Labels,
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Options for identifying a photo.
#[derive(Debug, Args)]
pub struct IdentifyArgs {
    /// Path to the ONNX model file (overrides config).
    #[arg(short, long, env = "LEAFY_MODEL_PATH")]
    pub model: Option<PathBuf>,

    /// Intra-op threads for inference (0 = runtime default).
    #[arg(long, value_parser = parse_threads, env = "LEAFY_THREADS")]
    pub threads: Option<usize>,

    /// Timeout in seconds for each knowledge request.
    #[arg(long, value_parser = parse_timeout_secs, env = "LEAFY_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Output mode.
    #[arg(
        long,
        value_enum,
        default_value_t = OutputMode::Human,
        env = "LEAFY_OUTPUT_MODE",
        global = true
    )]
    pub output_mode: OutputMode,

    /// Do not show the progress spinner.
    #[arg(long)]
    pub no_progress: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace+ORT debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_photo_and_model() {
        let cli = Cli::try_parse_from(["leafy", "leaf.jpg", "--model", "plants.onnx"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.photo, Some(PathBuf::from("leaf.jpg")));
        assert_eq!(cli.identify.model, Some(PathBuf::from("plants.onnx")));
        assert_eq!(cli.identify.output_mode, OutputMode::Human);
    }

    #[test]
    fn test_cli_json_mode_and_flags() {
        let cli = Cli::try_parse_from([
            "leafy",
            "leaf.jpg",
            "--output-mode",
            "json",
            "--no-progress",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.identify.output_mode, OutputMode::Json);
        assert!(cli.identify.no_progress);
        assert_eq!(cli.identify.verbose, 2);
    }

    #[test]
    fn test_cli_labels_subcommand() {
        let cli = Cli::try_parse_from(["leafy", "labels"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Labels)));
    }

    #[test]
    fn test_cli_config_subcommand() {
        let cli = Cli::try_parse_from(["leafy", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn test_cli_quiet_is_global() {
        let cli = Cli::try_parse_from(["leafy", "labels", "-q"]).unwrap();
        assert!(cli.identify.quiet);
    }

    #[test]
    fn test_cli_output_mode_after_subcommand() {
        let cli = Cli::try_parse_from(["leafy", "labels", "--output-mode", "json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Labels)));
        assert_eq!(cli.identify.output_mode, OutputMode::Json);

        let cli = Cli::try_parse_from(["leafy", "config", "show", "--output-mode", "json"]).unwrap();
        assert_eq!(cli.identify.output_mode, OutputMode::Json);
    }

    #[test]
    fn test_cli_rejects_invalid_threads() {
        assert!(Cli::try_parse_from(["leafy", "leaf.jpg", "--threads", "500"]).is_err());
    }
}
