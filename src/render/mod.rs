//! Text renderings of [`TestResults`]. Every renderer is a pure function and
//! handles the empty result set.

pub mod json;
pub mod markdown;
pub mod summary;
pub mod theme;

use serde::Deserialize;

use crate::error::Result;
use crate::models::TestResults;

/// All supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    #[serde(alias = "text")]
    #[value(alias = "text")]
    Summary,
    /// The full result tree as JSON
    Json,
    /// Markdown table for pull-request comments and CI summaries
    #[serde(alias = "md")]
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Summary => write!(f, "summary"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" | "text" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Render results in the requested format. `color` only affects the summary.
pub fn render(results: &TestResults, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Summary => Ok(summary::render(results, color)),
        OutputFormat::Json => json::render(results),
        OutputFormat::Markdown => Ok(markdown::render(results)),
    }
}
