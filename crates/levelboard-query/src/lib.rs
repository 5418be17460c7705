#![forbid(unsafe_code)]
//! Filter model, URL-query codec, and client-side table transforms.
//!
//! URL query strings are stringly typed and collapse single-element lists to
//! scalars. The codec in this crate absorbs that impedance mismatch
//! symmetrically: `deserialize(item, serialize(item, v)) == v` for every
//! representable value `v` without custom overrides.

mod codec;
mod filters;
mod query;
mod sort;
mod table;

pub use codec::{deserialize_filter_value, serialize_filter_value, serialize_filters};
pub use filters::{
    DateRange, FilterDate, FilterEntity, FilterItem, FilterOptions, FilterState, FilterType,
    FilterValue, LookupItems, Scalar,
};
pub use query::{query_changed, QueryMap, QueryValue};
pub use sort::{SortDirection, Sorting, PAGE_PARAM, SORT_COLUMN_PARAM, SORT_DIRECTION_PARAM};
pub use table::{aggregate_rows, filter_rows, sort_rows, TableColumn};

pub const CRATE_NAME: &str = "levelboard-query";
