#![forbid(unsafe_code)]
//! Levelboard model SSOT.
//!
//! ```compile_fail
//! use levelboard_model::Level;
//!
//! fn exhaustive_match(l: Level) -> &'static str {
//!     match l {
//!         Level::A1 => "a1",
//!         Level::A2 => "a2",
//!     }
//! }
//! ```

mod level;
mod report;

pub use level::{level_display_key, ClassId, Level, ParseError, CLASS_ID_MAX_LEN};
pub use report::{
    CommitStat, CommitTotals, RepoData, RepoInfo, RepoReport, ReportSummary, TableRow,
};

pub const CRATE_NAME: &str = "levelboard-model";
