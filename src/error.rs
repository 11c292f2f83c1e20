use std::path::PathBuf;

use thiserror::Error;

/// Why a single report file was left out of an aggregation pass.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("document has no root element")]
    Empty,

    #[error("unrecognized root element <{0}>, expected <testsuite> or <testsuites>")]
    UnrecognizedRoot(String),
}

/// Failures that abort an aggregation pass.
#[derive(Error, Debug)]
pub enum Error {
    #[error("report directory not found: {}", .0.display())]
    ReportDirNotFound(PathBuf),

    #[error("invalid ignore pattern `{pattern}`: {source}")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to scan report directory: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("failed to encode results: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid results JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
