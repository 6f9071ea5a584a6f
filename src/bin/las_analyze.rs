//! LAS Well-Log Analysis
//!
//! Runs the full interpretation pipeline over one LAS file and prints the
//! structured report as JSON. Logs go to stderr so stdout stays machine-readable.
//!
//! Usage:
//!   cargo run --bin las-analyze -- data/las/sample_well.las --pretty
//!   cargo run --bin las-analyze -- well.las --config las_petro.toml --parser manual
//!   cargo run --bin las-analyze -- well.las --output report.json --json-logs

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

use las_petro::config::{AnalysisConfig, ParserSelection};
use las_petro::pipeline;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParserArg {
    Auto,
    Sectioned,
    Manual,
}

impl From<ParserArg> for ParserSelection {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Auto => Self::Auto,
            ParserArg::Sectioned => Self::Sectioned,
            ParserArg::Manual => Self::Manual,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "las-analyze")]
#[command(about = "Petrophysical interpretation of a LAS well-log file")]
#[command(version)]
struct CliArgs {
    /// LAS file to analyse
    file: PathBuf,

    /// Analysis config (TOML). Without it the standard search order applies.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the configured parsing strategy
    #[arg(long, value_enum)]
    parser: Option<ParserArg>,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::load(),
    };
    if let Some(parser) = args.parser {
        config.loader.parser = parser.into();
    }

    let report = pipeline::run_analysis(&args.file, &config)
        .with_context(|| format!("Analysis of {} did not run", args.file.display()))?;

    for item in report.unavailable() {
        warn!(stage = ?item.stage, name = %item.name, reason = %item.reason, "Output unavailable");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
