use std::path::Path;

use serde::Deserialize;

use crate::render::OutputFormat;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "junit-report.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Controls which files are picked up as reports.
#[derive(Debug, Deserialize)]
pub struct DiscoveryConfig {
    /// File extensions (without the dot) treated as reports. Matched
    /// case-insensitively.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns (relative to the report directory) of files to skip.
    /// Example: ["coverage/**", "**/*.partial.xml"]
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore: Vec::new(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["xml".into()]
}

/// Defaults for the command-line flags.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    /// Exit non-zero when any test failed or errored.
    #[serde(default)]
    pub fail_on_failure: bool,
}

impl Config {
    /// Load `junit-report.toml` from `dir`, falling back to defaults if absent or invalid.
    pub fn load(dir: &Path) -> Self {
        Self::load_file(&dir.join(CONFIG_FILE))
    }

    /// Load a specific config file, falling back to defaults if absent or invalid.
    pub fn load_file(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
