//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

use histbook::config::RunConfig;
use histbook::ExportOrder;

/// Histbook - histogram booking for Monte-Carlo event loops
///
/// Runs the toy B+ -> X(3872) K+ event loop, fills the standard
/// histograms and exports them as JSON lines.
///
/// Examples:
///   histbook
///   histbook --events 10000 --workers 4 --output run.jsonl
///   histbook --config run.toml --order lexicographic
///   histbook --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", env = "HISTBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of generation attempts
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub events: Option<usize>,

    /// Seed of the toy event source
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Worker threads, each filling its own registry
    #[arg(short, long, value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Export file, created or overwritten
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export order: declaration or lexicographic
    #[arg(long, value_name = "ORDER")]
    pub order: Option<ExportOrder>,

    /// Write a default histbook.toml and exit
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the log level based on verbosity flags.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Override config values with the flags that were given.
    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(events) = self.events {
            config.run.events = events;
        }
        if let Some(seed) = self.seed {
            config.run.seed = seed;
        }
        if let Some(workers) = self.workers {
            config.run.workers = workers;
        }
        if let Some(ref output) = self.output {
            config.output.path = output.clone();
        }
        if let Some(order) = self.order {
            config.output.order = order;
        }
    }
}
