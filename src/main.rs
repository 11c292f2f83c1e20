use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use junit_report::{Config, OutputFormat, TestResults, aggregate, render};

#[derive(Debug, Parser)]
#[command(name = "junit-report")]
#[command(about = "Aggregate JUnit XML test reports into a summary, JSON, or Markdown")]
struct Args {
    /// Directory containing JUnit XML files, or a single report file
    report_dir: PathBuf,

    /// Output format [default: summary]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Exit with a non-zero code if any test failed or errored
    #[arg(short, long)]
    exit_code: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// When to color the summary
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Config file [default: ./junit-report.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            anyhow::ensure!(path.is_file(), "config file not found: {}", path.display());
            Config::load_file(path)
        }
        None => Config::load(&std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
    };
    let format = args.format.or(config.output.format).unwrap_or_default();
    let fail_on_failure = args.exit_code || config.output.fail_on_failure;

    let pass = aggregate(&args.report_dir, &config.discovery)?;
    if !pass.skipped.is_empty() {
        tracing::warn!(
            "{} report file(s) could not be parsed and were left out",
            pass.skipped.len()
        );
    }
    let results = &pass.results;

    match &args.output {
        Some(path) => {
            let report = render(results, format, false)?;
            std::fs::write(path, report + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let color = format == OutputFormat::Summary
                && args.color.enabled(std::io::stdout().is_terminal());
            println!("{}", render(results, format, color)?);
        }
    }

    if fails_run(fail_on_failure, results) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// A failed test run only fails the process when the caller asked for it.
fn fails_run(fail_on_failure: bool, results: &TestResults) -> bool {
    fail_on_failure && !results.success
}

/// Diagnostics go to stderr, filtered by `JUNIT_REPORT_LOG` (default `warn`).
/// Setting `JUNIT_REPORT_DEBUG=<path>` sends debug-level logs to that file instead.
fn init_logging() {
    if let Some(file) = open_log_file() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
        return;
    }

    let filter =
        EnvFilter::try_from_env("JUNIT_REPORT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn open_log_file() -> Option<std::fs::File> {
    std::env::var("JUNIT_REPORT_DEBUG").ok().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
    })
}
