use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::config::DiscoveryConfig;
use crate::error::{Error, ParseError, Result};
use crate::models::TestResults;
use crate::parser::parse_report;

/// A report file that was left out of the totals, and why.
#[derive(Debug)]
pub struct SkippedReport {
    pub path: PathBuf,
    pub reason: ParseError,
}

/// Outcome of one aggregation pass.
#[derive(Debug)]
pub struct Aggregate {
    pub results: TestResults,
    pub skipped: Vec<SkippedReport>,
}

/// Find every report file under `root`, sorted by path.
///
/// `root` may also name a single report file. A missing path is an error; an
/// existing directory with nothing in it is not.
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::ReportDirNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let ignore = config
        .ignore
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| Error::IgnorePattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let escaped_root = Pattern::escape(&root.to_string_lossy());

    let mut files: Vec<PathBuf> = Vec::new();
    for extension in &config.extensions {
        let pattern = Path::new(&escaped_root)
            .join("**")
            .join(format!("*.{}", extension.trim_start_matches('.')))
            .to_string_lossy()
            .to_string();

        for entry in glob::glob_with(&pattern, options)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("cannot read {}: {}", e.path().display(), e.error());
                    continue;
                }
            };
            if !path.is_file() || files.contains(&path) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if ignore.iter().any(|p| p.matches_path(relative)) {
                tracing::debug!("ignoring {}", path.display());
                continue;
            }
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Run one aggregation pass: discover, parse each report on its own, and
/// fold the ones that parsed into totals.
pub fn aggregate(root: &Path, config: &DiscoveryConfig) -> Result<Aggregate> {
    let files = discover(root, config)?;
    tracing::debug!("found {} report file(s) under {}", files.len(), root.display());

    let mut suites = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        match parse_report(&path) {
            Ok(suite) => {
                tracing::debug!(
                    "parsed {}: {} tests in suite {}",
                    path.display(),
                    suite.tests,
                    suite.name
                );
                suites.push(suite);
            }
            Err(reason) => {
                tracing::warn!("skipping {}: {}", path.display(), reason);
                skipped.push(SkippedReport { path, reason });
            }
        }
    }

    Ok(Aggregate {
        results: TestResults::from_suites(suites),
        skipped,
    })
}
