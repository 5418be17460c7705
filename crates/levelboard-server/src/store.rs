// SPDX-License-Identifier: Apache-2.0

//! Filesystem-backed report access. Reports are produced elsewhere; this
//! store only reads `<name>.json` files under one results directory.

use crate::errors::ApiError;
use levelboard_model::{RepoReport, ReportSummary};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ReportStore {
    results_dir: PathBuf,
}

/// Report names map straight onto file names, so anything that could step
/// outside the results directory is rejected up front.
fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

impl ReportStore {
    #[must_use]
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    #[must_use]
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Every readable report's info header, sorted by report name. A file
    /// that fails to parse is skipped with a warning rather than failing
    /// the whole listing.
    pub fn list_summaries(&self) -> Result<Vec<ReportSummary>, ApiError> {
        let entries = std::fs::read_dir(&self.results_dir).map_err(|err| {
            ApiError::internal(format!(
                "results directory unreadable ({}): {err}",
                self.results_dir.display()
            ))
        })?;

        let mut summaries = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "results directory entry unreadable");
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.read_report(&path) {
                Ok(report) => {
                    if let Some(info) = report.info() {
                        summaries.push(ReportSummary {
                            name: name.to_string(),
                            info: info.clone(),
                        });
                    } else {
                        warn!(report = name, "report has no info header, skipping");
                    }
                }
                Err(err) => {
                    warn!(report = name, %err, "report unreadable, skipping");
                }
            }
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Load one report by name. Unknown names are a 404; names that do not
    /// look like plain file stems are a 400.
    pub fn load(&self, name: &str) -> Result<RepoReport, ApiError> {
        if !valid_name(name) {
            return Err(ApiError::invalid_param("name", name));
        }
        let path = self.results_dir.join(format!("{name}.json"));
        if !path.is_file() {
            return Err(ApiError::not_found(name));
        }
        self.read_report(&path)
            .map_err(|err| ApiError::internal(format!("report {name} unreadable: {err}")))
    }

    fn read_report(&self, path: &Path) -> Result<RepoReport, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
