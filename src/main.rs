//! Histbook - toy X(3872) event loop
//!
//! Books the standard histograms, runs the event loop and writes the
//! export file.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Configuration, fill or export error

mod cli;

use anyhow::{Context, Result};
use cli::Args;
use histbook::analysis;
use histbook::config::RunConfig;
use histbook::event::ToyEventSource;
use histbook::Registry;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let args = Args::parse_args();

    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);

    info!("histbook v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("run failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: write a default histbook.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new("histbook.toml");
    if path.exists() {
        anyhow::bail!("histbook.toml already exists, remove it first or edit it manually");
    }

    std::fs::write(path, RunConfig::default_toml()).context("failed to write histbook.toml")?;
    println!("Created histbook.toml with default settings.");
    Ok(())
}

/// Initialize logging; RUST_LOG takes precedence over the verbosity flags.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn load_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RunConfig::default(),
    };
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(args)?;
    debug!("Configuration: {:?}", config);

    let (registry, summary) = if config.run.workers > 1 {
        analysis::run_parallel(
            config.run.workers,
            config.run.events,
            config.run.seed,
            config.output.order,
        )
        .context("event loop failed")?
    } else {
        let mut registry = Registry::with_order(config.output.order);
        analysis::book_standard(&mut registry);
        let source = ToyEventSource::new(config.run.seed);
        let summary =
            analysis::run(source, config.run.events, &mut registry).context("event loop failed")?;
        (registry, summary)
    };

    let written = registry.write(&config.output.path).with_context(|| {
        format!(
            "failed to write histograms to {}",
            config.output.path.display()
        )
    })?;

    info!(
        processed = summary.processed,
        failed = summary.failed(),
        signal = summary.signal,
        records = written,
        path = %config.output.path.display(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}
