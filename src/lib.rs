//! Aggregate JUnit-style XML test reports from a directory tree and render
//! them as a plain-text summary, JSON, or Markdown.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod render;

pub use aggregate::{Aggregate, SkippedReport, aggregate, discover};
pub use config::{Config, DiscoveryConfig};
pub use error::{Error, ParseError};
pub use models::{Outcome, TestCase, TestResults, TestStatus, TestSuite};
pub use parser::{parse_report, parse_str};
pub use render::{OutputFormat, render};
