use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use recap::analysis::ChatApiGenerator;
use recap::cli::Cli;
use recap::config::Config;
use recap::pipeline::Orchestrator;
use recap::transcribe::WhisperApiBackend;
use recap::{defaults, version_string};
use std::path::Path;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let Some(input) = cli.input else {
        error!("please provide an input file (audio or transcript)");
        std::process::exit(1);
    };

    tracing::debug!(version = %version_string(), "starting recap");

    let mut config = load_config(cli.config.as_deref())?.with_env_overrides();
    config.validate()?;
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    let api_key = std::env::var(defaults::API_KEY_ENV).unwrap_or_default();
    if api_key.is_empty() {
        anyhow::bail!("{} is not set; export your API key first", defaults::API_KEY_ENV);
    }

    let backend = Arc::new(
        WhisperApiBackend::new(&config.api.base_url, &api_key)
            .with_model(&config.transcription.model),
    );
    let generator = Arc::new(
        ChatApiGenerator::new(&config.api.base_url, &api_key).with_model(&config.generation.model),
    );

    let orchestrator = Orchestrator::new(config, backend, generator).with_timeout(cli.timeout);
    let report = orchestrator
        .run(&input, cli.summary_type)
        .await
        .with_context(|| format!("failed to process {}", input.display()))?;

    if report.failed_leaves > 0 {
        eprintln!(
            "{} {} audio segment(s) could not be transcribed; the recap is incomplete",
            "warning:".yellow().bold(),
            report.failed_leaves
        );
    }
    if !cli.quiet {
        println!(
            "{} {}",
            "Recap exported to".green(),
            report.document_path.display()
        );
    }
    Ok(())
}

/// Map `-q`/`-v` onto a tracing filter, unless RUST_LOG overrides it.
fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "recap=error"
    } else {
        match verbose {
            0 => "recap=info",
            1 => "recap=debug",
            _ => "trace",
        }
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config)
}
