// SPDX-License-Identifier: Apache-2.0

use crate::query::QueryMap;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Primitive filter value. String forms are what end up in the URL, so
/// equality against query entries always goes through [`Scalar::to_query_string`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
        }
    }

    /// Empty means empty string. Zero and `false` are meaningful values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A selectable option distinct from its raw primitive value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntity {
    pub label: String,
    pub value: Scalar,
    /// Alternate value fields addressable through `FilterOptions::item_value`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Scalar>,
}

impl FilterEntity {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Resolve a named value field: `value`, `label`, or an `extra` entry.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Scalar> {
        match name {
            "value" => Some(self.value.clone()),
            "label" => Some(Scalar::Str(self.label.clone())),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// A date carried by a range filter. `Invalid` reproduces the platform
/// semantics of a not-a-number epoch: a date object that reports itself
/// invalid rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterDate {
    Valid(DateTime<Utc>),
    Invalid,
}

impl FilterDate {
    /// Parse a raw query string as epoch milliseconds.
    #[must_use]
    pub fn from_epoch_millis(raw: &str) -> Self {
        raw.parse::<i64>()
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map_or(Self::Invalid, Self::Valid)
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Valid(dt) => Some(dt.timestamp_millis()),
            Self::Invalid => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<FilterDate>,
    pub to: Option<FilterDate>,
}

impl DateRange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Current value of one filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Entity(FilterEntity),
    Entities(Vec<FilterEntity>),
    Range(DateRange),
}

impl FilterValue {
    /// Empty values are elided from the URL: empty string, empty list, empty
    /// range. Zero and `false` are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Entities(items) => items.is_empty(),
            Self::Entity(_) => false,
            Self::Range(range) => range.is_empty(),
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Single value, written by the user.
    Single,
    /// Multiple values, written by the user.
    Multiple,
    /// Single value, selected from options.
    Select,
    /// Multiple values, selected from options.
    MultipleSelect,
    /// Date range with `from` and `to` sides.
    Date,
}

impl FilterType {
    #[must_use]
    pub fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple | Self::MultipleSelect)
    }
}

/// Enumeration of selectable values. The tag makes the primitive-vs-entity
/// choice explicit instead of sniffing item shapes at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LookupItems {
    Scalars(Vec<Scalar>),
    Entities(Vec<FilterEntity>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<LookupItems>,
    /// Cast raw query strings to numbers on deserialize.
    #[serde(default)]
    pub number: bool,
    /// Deserialize to the full entity instead of its primitive value.
    #[serde(default)]
    pub return_object: bool,
    /// Entity field holding the serialized value. Defaults to `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_value: Option<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn value_field(&self) -> &str {
        self.item_value.as_deref().unwrap_or("value")
    }
}

pub type Serializer = Box<dyn Fn(&FilterState) -> QueryMap + Send + Sync>;
pub type Deserializer = Box<dyn Fn(&QueryMap) -> Option<FilterValue> + Send + Sync>;

/// Declarative description of one filterable field. Immutable once
/// constructed; owned by the view that declares the filter set.
pub struct FilterItem {
    pub key: String,
    pub filter_type: FilterType,
    /// URL parameter alias. Defaults to `key`.
    pub query: Option<String>,
    pub options: Option<FilterOptions>,
    pub serializer: Option<Serializer>,
    pub deserializer: Option<Deserializer>,
}

impl FilterItem {
    #[must_use]
    pub fn new(key: impl Into<String>, filter_type: FilterType) -> Self {
        Self {
            key: key.into(),
            filter_type,
            query: None,
            options: None,
            serializer: None,
            deserializer: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, alias: impl Into<String>) -> Self {
        self.query = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn with_serializer(mut self, serializer: Serializer) -> Self {
        self.serializer = Some(serializer);
        self
    }

    #[must_use]
    pub fn with_deserializer(mut self, deserializer: Deserializer) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    #[must_use]
    pub fn url_key(&self) -> &str {
        self.query.as_deref().unwrap_or(&self.key)
    }
}

impl fmt::Debug for FilterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterItem")
            .field("key", &self.key)
            .field("filter_type", &self.filter_type)
            .field("query", &self.query)
            .field("options", &self.options)
            .field("serializer", &self.serializer.is_some())
            .field("deserializer", &self.deserializer.is_some())
            .finish()
    }
}

/// In-memory value of all declared filters, keyed by filter key.
pub type FilterState = BTreeMap<String, FilterValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_false_are_not_empty() {
        assert!(!FilterValue::Scalar(Scalar::Int(0)).is_empty());
        assert!(!FilterValue::Scalar(Scalar::Bool(false)).is_empty());
        assert!(FilterValue::Scalar(Scalar::Str(String::new())).is_empty());
        assert!(FilterValue::List(vec![]).is_empty());
    }

    #[test]
    fn invalid_epoch_yields_invalid_date_sentinel() {
        assert_eq!(FilterDate::from_epoch_millis("not-a-number"), FilterDate::Invalid);
        assert!(!FilterDate::from_epoch_millis("garbage").is_valid());
        let date = FilterDate::from_epoch_millis("1700000000000");
        assert_eq!(date.timestamp_millis(), Some(1_700_000_000_000));
    }

    #[test]
    fn entity_field_resolution_prefers_builtins() {
        let mut entity = FilterEntity::new("High", Scalar::Int(3));
        entity.extra.insert("code".to_string(), Scalar::Str("H".to_string()));
        assert_eq!(entity.field("value"), Some(Scalar::Int(3)));
        assert_eq!(entity.field("code"), Some(Scalar::Str("H".to_string())));
        assert_eq!(entity.field("missing"), None);
    }

    #[test]
    fn url_key_falls_back_to_filter_key() {
        let plain = FilterItem::new("owner", FilterType::Single);
        assert_eq!(plain.url_key(), "owner");
        let aliased = FilterItem::new("owner", FilterType::Single).with_query("o");
        assert_eq!(aliased.url_key(), "o");
    }
}
