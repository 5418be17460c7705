// SPDX-License-Identifier: Apache-2.0

//! HTML page rendering by verbatim token substitution into static shells.
//! The shells are plain HTML carrying `PH_*` tokens; anything the report
//! cannot supply renders as `N/A`.

use levelboard_model::{CommitTotals, RepoReport};
use std::path::Path;
use tracing::warn;

const FALLBACK: &str = "N/A";

const DEFAULT_HOME_SHELL: &str = r#"<!doctype html>
<html>
<head><title>levelboard</title></head>
<body>
<h1>Analyzed repositories</h1>
<ul>
PH_REPORT_LINKS
</ul>
</body>
</html>
"#;

const DEFAULT_REPO_SHELL: &str = r#"<!doctype html>
<html>
<head><title>PH_REPO_NAME - levelboard</title></head>
<body>
<h1>PH_REPO_NAME</h1>
<p data-local="PH_IS_LOCAL">Created: PH_REPO_DATE</p>
<table>
<tr><td>Files</td><td>PH_TOTAL_FILES</td></tr>
<tr><td>Commits</td><td>PH_TOTAL_COMMITS</td></tr>
<tr><td>Files modified</td><td>PH_TOTAL_CHANGES</td></tr>
<tr><td>Hours</td><td>PH_TOTAL_HOURS</td></tr>
<tr><td>Lines</td><td>PH_TOTAL_LINES</td></tr>
</table>
</body>
</html>
"#;

/// The two page shells, either built in or read from an assets directory
/// (`home.html` / `repo.html`). A missing or unreadable file falls back to
/// the built-in shell with a warning.
#[derive(Debug, Clone)]
pub struct HtmlShells {
    pub home: String,
    pub repo: String,
}

impl Default for HtmlShells {
    fn default() -> Self {
        Self {
            home: DEFAULT_HOME_SHELL.to_string(),
            repo: DEFAULT_REPO_SHELL.to_string(),
        }
    }
}

impl HtmlShells {
    #[must_use]
    pub fn load(assets_dir: Option<&Path>) -> Self {
        let Some(dir) = assets_dir else {
            return Self::default();
        };
        Self {
            home: read_shell(&dir.join("home.html"), DEFAULT_HOME_SHELL),
            repo: read_shell(&dir.join("repo.html"), DEFAULT_REPO_SHELL),
        }
    }
}

fn read_shell(path: &Path, fallback: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(shell) => shell,
        Err(err) => {
            warn!(path = %path.display(), %err, "shell unreadable, using built-in");
            fallback.to_string()
        }
    }
}

fn fmt_u64(value: Option<u64>) -> String {
    value.map_or_else(|| FALLBACK.to_string(), |v| v.to_string())
}

fn fmt_f64(value: Option<f64>) -> String {
    value.map_or_else(|| FALLBACK.to_string(), |v| format!("{v:.1}"))
}

/// Substitute one report into the repo-page shell. Commit totals come from
/// folding every commit window; local analyses have none and render `N/A`.
#[must_use]
pub fn render_repo_page(shell: &str, report: &RepoReport) -> String {
    let info = report.info();
    let data = info.map(|i| &i.data);
    let totals: Option<CommitTotals> = info.and_then(|i| i.commit_totals());

    shell
        .replace("PH_IS_LOCAL", if report.is_local() { "true" } else { "false" })
        .replace(
            "PH_REPO_NAME",
            data.map_or(FALLBACK, |d| d.name.as_str()),
        )
        .replace(
            "PH_REPO_DATE",
            data.and_then(|d| d.created_date.as_deref())
                .unwrap_or(FALLBACK),
        )
        .replace("PH_TOTAL_FILES", &fmt_u64(data.and_then(|d| d.total_files)))
        .replace("PH_TOTAL_COMMITS", &fmt_u64(totals.map(|t| t.total_commits)))
        .replace(
            "PH_TOTAL_CHANGES",
            &fmt_u64(totals.map(|t| t.total_files_modified)),
        )
        .replace("PH_TOTAL_HOURS", &fmt_f64(totals.map(|t| t.total_hours)))
        .replace("PH_TOTAL_LINES", &fmt_u64(totals.map(|t| t.total_loc)))
}

/// Substitute the report list into the home shell, one link per report.
#[must_use]
pub fn render_home_page(shell: &str, names: &[String]) -> String {
    let links = names
        .iter()
        .map(|name| format!("<li><a href=\"/{name}\">{name}</a></li>"))
        .collect::<Vec<_>>()
        .join("\n");
    shell.replace("PH_REPORT_LINKS", &links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_report() -> RepoReport {
        serde_json::from_str(
            r#"{
                "repoInfo": {
                    "data": {"name": "demo", "createdDate": "2024-03-01", "totalFiles": 12},
                    "commits": [
                        {"commits": 3, "total_hours": 5.0, "total_files_modified": 7, "loc": 210},
                        {"commits": 2, "total_hours": 1.5, "total_files_modified": 4, "loc": 90}
                    ]
                },
                "elements": []
            }"#,
        )
        .expect("parse report")
    }

    #[test]
    fn every_token_is_substituted() {
        let page = render_repo_page(DEFAULT_REPO_SHELL, &remote_report());
        assert!(!page.contains("PH_"), "unsubstituted token in: {page}");
        assert!(page.contains("<h1>demo</h1>"));
        assert!(page.contains("2024-03-01"));
        assert!(page.contains("<td>5</td>"));
        assert!(page.contains("<td>6.5</td>"));
        assert!(page.contains("<td>300</td>"));
        assert!(page.contains("data-local=\"false\""));
    }

    #[test]
    fn local_report_renders_fallbacks() {
        let report: RepoReport =
            serde_json::from_str(r#"{"dirInfo": {"data": {"name": "scratch"}}, "elements": []}"#)
                .expect("parse report");
        let page = render_repo_page(DEFAULT_REPO_SHELL, &report);
        assert!(page.contains("data-local=\"true\""));
        assert!(page.contains("Created: N/A"));
        assert!(page.contains("<td>N/A</td>"));
    }

    #[test]
    fn home_page_links_every_report() {
        let names = vec!["alpha".to_string(), "beta".to_string()];
        let page = render_home_page(DEFAULT_HOME_SHELL, &names);
        assert!(page.contains("<a href=\"/alpha\">alpha</a>"));
        assert!(page.contains("<a href=\"/beta\">beta</a>"));
        assert!(!page.contains("PH_REPORT_LINKS"));
    }

    #[test]
    fn missing_shell_file_falls_back_to_built_in() {
        let dir = tempfile::tempdir().expect("tempdir");
        let shells = HtmlShells::load(Some(dir.path()));
        assert_eq!(shells.home, DEFAULT_HOME_SHELL);

        std::fs::write(dir.path().join("repo.html"), "<html>PH_REPO_NAME</html>")
            .expect("write shell");
        let shells = HtmlShells::load(Some(dir.path()));
        assert_eq!(shells.repo, "<html>PH_REPO_NAME</html>");
    }
}
