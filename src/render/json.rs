use crate::error::{Error, Result};
use crate::models::TestResults;

/// Pretty-printed JSON of the whole result tree.
pub fn render(results: &TestResults) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(Error::Encode)
}

/// Rebuild results from [`render`] output.
pub fn decode(json: &str) -> Result<TestResults> {
    serde_json::from_str(json).map_err(Error::Decode)
}
