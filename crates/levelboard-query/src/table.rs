// SPDX-License-Identifier: Apache-2.0

//! In-memory transforms over fetched table rows. Filter and sort are both
//! recomputed against the last-fetched dataset, never against each other's
//! output, so they commute.

use crate::sort::{SortDirection, Sorting};
use levelboard_model::{ClassId, TableRow};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Class,
    Level,
    Instances,
}

impl TableColumn {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "class" => Some(Self::Class),
            "level" => Some(Self::Level),
            "instances" => Some(Self::Instances),
            _ => None,
        }
    }
}

/// Stable single-column sort. Text columns compare case-insensitively,
/// numeric columns numerically. Unknown columns and `None` direction leave
/// the source order untouched.
pub fn sort_rows(rows: &mut [TableRow], sorting: &Sorting) {
    if sorting.direction == SortDirection::None {
        return;
    }
    let Some(column) = TableColumn::parse(&sorting.column) else {
        return;
    };
    rows.sort_by(|a, b| {
        let ordering = match column {
            TableColumn::Class => compare_text(a.class.as_str(), b.class.as_str()),
            TableColumn::Level => a.level.cmp(&b.level),
            TableColumn::Instances => a.instances.cmp(&b.instances),
        };
        match sorting.direction {
            SortDirection::Desc => ordering.reverse(),
            _ => ordering,
        }
    });
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Case-insensitive substring match against the class field.
#[must_use]
pub fn filter_rows(rows: &[TableRow], needle: &str) -> Vec<TableRow> {
    if needle.is_empty() {
        return rows.to_vec();
    }
    let needle = needle.to_lowercase();
    rows.iter()
        .filter(|row| row.class.as_str().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Collapse rows sharing a class key into one row with summed instances.
/// First-seen order is preserved for the lifetime of one fetched dataset.
#[must_use]
pub fn aggregate_rows(rows: impl IntoIterator<Item = TableRow>) -> Vec<TableRow> {
    let mut aggregated: Vec<TableRow> = Vec::new();
    let mut index: HashMap<ClassId, usize> = HashMap::new();
    for row in rows {
        match index.get(&row.class) {
            Some(&at) => aggregated[at].instances += row.instances,
            None => {
                index.insert(row.class.clone(), aggregated.len());
                aggregated.push(row);
            }
        }
    }
    aggregated
}
