// SPDX-License-Identifier: Apache-2.0

use crate::query::QueryMap;
use serde::{Deserialize, Serialize};

pub const SORT_COLUMN_PARAM: &str = "s_c";
pub const SORT_DIRECTION_PARAM: &str = "s_d";
pub const PAGE_PARAM: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// None -> Asc -> Desc -> None.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::Asc,
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
        }
    }

    #[must_use]
    pub const fn as_code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Asc => 1,
            Self::Desc => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Asc,
            2 => Self::Desc,
            _ => Self::None,
        }
    }
}

/// Current sort state of one table, mirrored into the `s_c`/`s_d` params.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sorting {
    pub column: String,
    pub direction: SortDirection,
}

impl Sorting {
    #[must_use]
    pub fn from_query(query: &QueryMap) -> Self {
        Self {
            column: query
                .get_one(SORT_COLUMN_PARAM)
                .unwrap_or_default()
                .to_string(),
            direction: query
                .get_one(SORT_DIRECTION_PARAM)
                .and_then(|raw| raw.parse::<u8>().ok())
                .map_or(SortDirection::None, SortDirection::from_code),
        }
    }

    /// Next state after activating `column`: the same column cycles the
    /// direction, a different column resets to ascending.
    #[must_use]
    pub fn advance(&self, column: &str) -> Self {
        if self.column == column {
            Self {
                column: column.to_string(),
                direction: self.direction.cycle(),
            }
        } else {
            Self {
                column: column.to_string(),
                direction: SortDirection::Asc,
            }
        }
    }

    /// Write this state into the query. Clears both params at `None` and
    /// resets pagination on every change.
    pub fn apply_to_query(&self, query: &mut QueryMap) {
        if self.direction == SortDirection::None {
            query.remove(SORT_COLUMN_PARAM);
            query.remove(SORT_DIRECTION_PARAM);
        } else {
            query.insert_one(SORT_COLUMN_PARAM, self.column.clone());
            query.insert_one(SORT_DIRECTION_PARAM, self.direction.as_code().to_string());
        }
        query.insert_one(PAGE_PARAM, "1");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_activations_return_to_none() {
        let start = Sorting::default();
        let first = start.advance("class");
        assert_eq!(first.direction, SortDirection::Asc);
        let second = first.advance("class");
        assert_eq!(second.direction, SortDirection::Desc);
        let third = second.advance("class");
        assert_eq!(third.direction, SortDirection::None);
    }

    #[test]
    fn new_column_always_resets_to_asc() {
        let sorting = Sorting {
            column: "class".to_string(),
            direction: SortDirection::Desc,
        };
        let next = sorting.advance("instances");
        assert_eq!(next.column, "instances");
        assert_eq!(next.direction, SortDirection::Asc);
    }

    #[test]
    fn apply_clears_params_at_none_and_resets_page() {
        let mut query = QueryMap::parse("s_c=class&s_d=2&page=4");
        Sorting::default().apply_to_query(&mut query);
        assert!(query.get(SORT_COLUMN_PARAM).is_none());
        assert!(query.get(SORT_DIRECTION_PARAM).is_none());
        assert_eq!(query.get_one(PAGE_PARAM), Some("1"));
    }

    #[test]
    fn query_round_trip() {
        let sorting = Sorting {
            column: "instances".to_string(),
            direction: SortDirection::Desc,
        };
        let mut query = QueryMap::new();
        sorting.apply_to_query(&mut query);
        assert_eq!(Sorting::from_query(&query), sorting);
    }

    #[test]
    fn malformed_direction_reads_as_none() {
        let query = QueryMap::parse("s_c=class&s_d=banana");
        assert_eq!(Sorting::from_query(&query).direction, SortDirection::None);
    }
}
