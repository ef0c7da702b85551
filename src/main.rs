use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use genome::config::ConfigFile;
use genome::{
    ExtractError, GenomeConfig, OllamaClientBuilder, OllamaLabelClassifier, TagExtractor,
    TaggingResult,
};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured classification model.
const MODEL_ENV_VAR: &str = "GENOME_MODEL";

/// Environment variable holding the log filter.
const LOG_ENV_VAR: &str = "GENOME_LOG";

/// genome - extract a story genome from narrative text
#[derive(Parser)]
#[command(name = "genome")]
#[command(about = "Extract genre, mood, perspective, humor and pacing from narrative text")]
#[command(version)]
struct Cli {
    /// Inline text to analyze
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Path to a text file to analyze
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// TOML configuration file (overrides GENOME_CONFIG)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Classification model (overrides GENOME_MODEL and the config file)
    #[arg(short, long, value_name = "MODEL")]
    model: Option<String>,

    /// Ollama base URL (overrides OLLAMA_HOST)
    #[arg(long, value_name = "URL")]
    host: Option<String>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Problems with the input source, reported as user errors.
#[derive(Debug, Error)]
enum InputError {
    #[error("Either --text or --file is required")]
    Missing,

    #[error("--text and --file cannot be used together")]
    Conflicting,

    #[error("Failed to read input file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Logs go to stderr so stdout carries only the result.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("genome={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are input problems: missing or conflicting sources, an
/// unreadable file, or blank text. Classifier and configuration failures are
/// internal errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause.downcast_ref::<InputError>().is_some()
            || matches!(
                cause.downcast_ref::<ExtractError>(),
                Some(ExtractError::InvalidInput)
            )
    })
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.model.as_deref())?;

    if cli.print_config {
        let rendered = ConfigFile::from(&config)
            .to_toml_string()
            .context("Failed to render configuration")?;
        print!("{rendered}");
        return Ok(());
    }

    let text = read_input(cli.text.as_deref(), cli.file.as_deref())?;

    let mut client = OllamaClientBuilder::new();
    if let Some(host) = &cli.host {
        client = client.base_url(host);
    }
    let client = client.build().context("Failed to create Ollama client")?;
    debug!(host = client.base_url(), model = config.default_model(), "classifier ready");

    let classifier = OllamaLabelClassifier::new(Arc::new(client), config.default_model());
    let extractor =
        TagExtractor::new(config, Arc::new(classifier)).context("Invalid configuration")?;

    println!("{}", execute(&text, &extractor, cli.compact)?);
    Ok(())
}

/// Resolves the configuration and applies the model override.
///
/// Model precedence: `--model`, then `GENOME_MODEL`, then the configuration.
fn load_config(path: Option<&Path>, model: Option<&str>) -> Result<GenomeConfig> {
    let config = GenomeConfig::resolve(path).context("Failed to load configuration")?;

    let model = model
        .map(str::to_string)
        .or_else(|| std::env::var(MODEL_ENV_VAR).ok())
        .filter(|m| !m.trim().is_empty());

    match model {
        Some(model) => config
            .with_default_model(model)
            .context("Invalid model identifier"),
        None => Ok(config),
    }
}

/// Reads the document from exactly one of the two input sources.
fn read_input(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (text, file) {
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| {
            InputError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
            .into()
        }),
        (Some(_), Some(_)) => Err(InputError::Conflicting.into()),
        (None, None) => Err(InputError::Missing.into()),
    }
}

/// Runs the extraction and renders the result as JSON.
///
/// Separated from `run` so tests can supply a stub classifier.
fn execute(text: &str, extractor: &TagExtractor, compact: bool) -> Result<String> {
    let result = extractor
        .extract(text)
        .context("Failed to extract story genome")?;
    render_result(&result, compact)
}

fn render_result(result: &TaggingResult, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(result)
    } else {
        serde_json::to_string_pretty(result)
    };
    rendered.context("Failed to serialize result")
}
