// SPDX-License-Identifier: Apache-2.0

use crate::level::{ClassId, Level};
use serde::{Deserialize, Serialize};

/// One aggregated row of the analysis table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableRow {
    pub class: ClassId,
    pub level: Level,
    pub instances: u64,
}

/// Commit aggregates carried in reports produced from a remote repository.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitStat {
    pub commits: u64,
    pub total_hours: f64,
    pub total_files_modified: u64,
    pub loc: u64,
}

/// Fold of all commit stats in a report, used by the repo page renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitTotals {
    pub total_commits: u64,
    pub total_hours: f64,
    pub total_files_modified: u64,
    pub total_loc: u64,
}

impl CommitTotals {
    #[must_use]
    pub fn fold(commits: &[CommitStat]) -> Self {
        commits.iter().fold(Self::default(), |mut acc, c| {
            acc.total_commits += c.commits;
            acc.total_hours += c.total_hours;
            acc.total_files_modified += c.total_files_modified;
            acc.total_loc += c.loc;
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoData {
    pub name: String,
    #[serde(rename = "createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(rename = "totalFiles", default, skip_serializing_if = "Option::is_none")]
    pub total_files: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Header block of one report: static facts plus, for remote analyses,
/// per-window commit aggregates. `commits` is absent for local directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub data: RepoData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<CommitStat>>,
}

impl RepoInfo {
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.commits.is_none()
    }

    #[must_use]
    pub fn commit_totals(&self) -> Option<CommitTotals> {
        self.commits.as_deref().map(CommitTotals::fold)
    }
}

/// One report file: the info header (under `repoInfo` for remote analyses,
/// `dirInfo` for local ones) plus the element rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoReport {
    #[serde(rename = "repoInfo", default, skip_serializing_if = "Option::is_none")]
    pub repo_info: Option<RepoInfo>,
    #[serde(rename = "dirInfo", default, skip_serializing_if = "Option::is_none")]
    pub dir_info: Option<RepoInfo>,
    #[serde(default)]
    pub elements: Vec<TableRow>,
}

impl RepoReport {
    /// The info header, whichever key it was stored under.
    #[must_use]
    pub fn info(&self) -> Option<&RepoInfo> {
        self.repo_info.as_ref().or(self.dir_info.as_ref())
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.info().map_or(true, RepoInfo::is_local)
    }
}

/// List-endpoint projection: the info header of one report file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub name: String,
    #[serde(flatten)]
    pub info: RepoInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_json() -> &'static str {
        r#"{
            "repoInfo": {
                "data": {"name": "demo", "createdDate": "2024-03-01", "totalFiles": 12},
                "commits": [
                    {"commits": 3, "total_hours": 5.0, "total_files_modified": 7, "loc": 210},
                    {"commits": 2, "total_hours": 1.5, "total_files_modified": 4, "loc": 90}
                ]
            },
            "elements": [
                {"class": "list_comprehension", "level": "B1", "instances": 4},
                {"class": "decorator", "level": "C1", "instances": 2}
            ]
        }"#
    }

    #[test]
    fn parses_remote_report() {
        let report: RepoReport = serde_json::from_str(report_json()).expect("parse report");
        assert!(!report.is_local());
        assert_eq!(report.elements.len(), 2);
        assert_eq!(report.elements[0].level, Level::B1);
    }

    #[test]
    fn commit_totals_fold_sums_every_field() {
        let report: RepoReport = serde_json::from_str(report_json()).expect("parse report");
        let totals = report.info().and_then(RepoInfo::commit_totals).expect("totals");
        assert_eq!(totals.total_commits, 5);
        assert_eq!(totals.total_files_modified, 11);
        assert_eq!(totals.total_loc, 300);
        assert!((totals.total_hours - 6.5).abs() < f64::EPSILON);
    }

    #[test]
    fn local_report_has_no_commit_totals() {
        let raw = r#"{
            "dirInfo": {"data": {"name": "scratch"}},
            "elements": []
        }"#;
        let report: RepoReport = serde_json::from_str(raw).expect("parse report");
        assert!(report.is_local());
        assert!(report.info().and_then(RepoInfo::commit_totals).is_none());
    }
}
