//! Leafy - plant identification from a photo.
//!
//! A photo is resized into a fixed-size tensor, classified by an ONNX model
//! whose per-element votes are reduced to one species label, and enriched
//! with a summary and taxonomy looked up from public knowledge endpoints.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod knowledge;
pub mod output;
pub mod photo;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, IdentifyArgs};
use config::{Config, config_file_path, load_default_config, save_default_config, validate_config};
use inference::{LabelRegistry, ModelSession, OnnxLoader};
use knowledge::{HttpFetcher, KnowledgeResolver};
use output::OutputMode;
use output::json_envelope::{ConfigPayload, LabelEntry, LabelsPayload, ResultType};
use photo::Preprocessor;
use pipeline::Identifier;
use std::path::Path;
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for leafy CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.identify.verbose, cli.identify.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, cli.identify.output_mode);
    }

    let config = load_default_config()?;

    let Some(photo) = cli.photo else {
        cli::help::print_smart_help(&config);
        return Ok(());
    };

    identify_photo(&photo, &cli.identify, config)
}

/// Identify one photo and report progress and the result.
fn identify_photo(photo: &Path, args: &IdentifyArgs, mut config: Config) -> Result<()> {
    apply_overrides(&mut config, args);

    let progress = !args.no_progress && !args.quiet;
    let reporter = output::create_reporter(args.output_mode, photo, progress);

    let result = validate_config(&config)
        .and_then(|()| build_identifier(&config))
        .and_then(|identifier| {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(identifier.identify(photo, |status| reporter.status(status)))
        });

    match result {
        Ok(record) => {
            reporter.record(&record);
            Ok(())
        }
        Err(e) => {
            reporter.error(&e);
            Err(e)
        }
    }
}

/// CLI flags and environment take precedence over the config file.
fn apply_overrides(config: &mut Config, args: &IdentifyArgs) {
    if let Some(model) = &args.model {
        config.model.path = Some(model.clone());
    }
    if let Some(threads) = args.threads {
        config.model.intra_threads = threads;
    }
    if let Some(timeout) = args.timeout {
        config.knowledge.request_timeout_secs = timeout;
    }
}

/// Wire the production stages: ONNX model, photo preprocessor, HTTP resolver.
fn build_identifier(config: &Config) -> Result<Identifier<OnnxLoader, HttpFetcher>> {
    let model_path = config.model.path.clone().ok_or(Error::ModelNotConfigured)?;
    info!("Using model: {}", model_path.display());

    let session = ModelSession::new(OnnxLoader::new(model_path, config.model.intra_threads));
    let fetcher = HttpFetcher::new(&config.knowledge)?;
    let resolver = KnowledgeResolver::new(fetcher, &config.knowledge)?;

    Ok(Identifier::new(session, Preprocessor::new(), resolver))
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for results.
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is noisy at info level and suppressed unless -v is given.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn,hyper_util=info,reqwest=info".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, mode: OutputMode) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, mode),
        Command::Labels => {
            handle_labels_command(mode);
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, mode: OutputMode) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext step: set [model] path to your plant classifier ONNX file.");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            match mode {
                OutputMode::Human => {
                    let text = toml::to_string_pretty(&config)
                        .map_err(|source| Error::ConfigSerialize { source })?;
                    print!("{text}");
                }
                OutputMode::Json => {
                    let payload = ConfigPayload {
                        result_type: ResultType::Config,
                        config_path: config_file_path()?,
                        config: serde_json::to_value(&config)
                            .map_err(|source| Error::JsonWrite { source })?,
                    };
                    output::emit_json_result(&payload);
                }
            }
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_labels_command(mode: OutputMode) {
    let registry = LabelRegistry;
    match mode {
        OutputMode::Human => {
            for (index, name) in registry.iter() {
                println!("{:>3}  {name}", index.value());
            }
        }
        OutputMode::Json => {
            let payload = LabelsPayload {
                result_type: ResultType::Labels,
                labels: registry
                    .iter()
                    .map(|(index, name)| LabelEntry {
                        index: index.value(),
                        name: name.to_string(),
                    })
                    .collect(),
            };
            output::emit_json_result(&payload);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "leafy",
            "leaf.jpg",
            "--model",
            "plants.onnx",
            "--threads",
            "2",
            "--timeout",
            "30",
        ])
        .unwrap();
        let mut config = Config::default();

        apply_overrides(&mut config, &cli.identify);

        assert_eq!(config.model.path.as_deref(), Some(Path::new("plants.onnx")));
        assert_eq!(config.model.intra_threads, 2);
        assert_eq!(config.knowledge.request_timeout_secs, 30);
    }

    #[test]
    fn test_timeout_override_replaces_invalid_file_value() {
        let cli = Cli::try_parse_from(["leafy", "leaf.jpg", "--timeout", "5"]).unwrap();
        let mut config = Config::default();
        config.knowledge.request_timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        apply_overrides(&mut config, &cli.identify);

        assert_eq!(config.knowledge.request_timeout_secs, 5);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_build_identifier_requires_model() {
        let result = build_identifier(&Config::default());
        assert!(matches!(result, Err(Error::ModelNotConfigured)));
    }
}
