//! CLI entrypoint for Symptom Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use symptom_application::{RunDiagnosisInput, RunDiagnosisUseCase};
use symptom_domain::{Location, ResearchContext};
use symptom_infrastructure::{
    AnthropicReasoningGateway, ConfigLoader, FileConfig, WebResearchService,
};
use symptom_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_overrides(&cli, &mut config);

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("Effective configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    info!("Starting Symptom Quorum");

    let input = build_input(&cli)?;

    // === Dependency Injection ===
    let reasoning = AnthropicReasoningGateway::new(&config.reasoning)?;
    if !reasoning.has_api_key() {
        warn!(
            "No API key found (set {}); reasoning calls will fail",
            config.reasoning.api_key_env
        );
    }
    info!("Reasoning model: {}", reasoning.model());
    let research = WebResearchService::new(&config.research)?;

    let use_case = RunDiagnosisUseCase::new(
        Arc::new(reasoning),
        Arc::new(research),
        config.to_pipeline_config(),
    );

    // Execute with or without progress reporting
    let report = if cli.quiet {
        use_case.execute(input).await
    } else if cli.verbose > 0 {
        // Log lines would tear a progress bar
        use_case.execute_with_progress(input, &SimpleProgress).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&report),
        OutputFormat::Conditions => ConsoleFormatter::format_conditions_only(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };

    println!("{}", output);

    Ok(())
}

/// CLI flags win over every config source
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(max) = cli.max_conditions {
        config.pipeline.max_conditions = max;
    }
    if let Some(batch) = cli.batch {
        config.pipeline.agents_batch = batch;
    }
    if let Some(rounds) = cli.rounds {
        config.pipeline.debate_rounds = rounds;
    }
}

fn build_input(cli: &Cli) -> Result<RunDiagnosisInput> {
    let symptoms = match (&cli.symptoms, &cli.symptoms_file) {
        (Some(symptoms), _) => symptoms.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read symptoms from {}", path.display()))?,
        (None, None) => bail!("Symptoms are required. Pass them as an argument or use --symptoms-file."),
    };

    let mut context = ResearchContext::try_new(symptoms)?;
    if let Some(age) = cli.age {
        context = context.with_age(age)?;
    }
    if let Some(sex) = cli.sex {
        context = context.with_sex(sex);
    }
    if let Some(history) = &cli.history {
        context = context.with_medical_history(history.clone());
    }

    let mut input = RunDiagnosisInput::new(context);
    if let Some((lat, lon)) = cli.coordinates() {
        input = input.with_location(Location::try_new(lat, lon)?);
    }
    Ok(input)
}

/// Initialize logging based on verbosity level, `RUST_LOG` taking precedence
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
