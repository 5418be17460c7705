// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

/// One URL query entry. Query encoding collapses single-element lists to
/// scalars; the two variants keep that ambiguity explicit so the codec can
/// absorb it instead of every caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl QueryValue {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::Many(vs) => vs.as_slice(),
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.as_slice().first().map(String::as_str)
    }
}

/// Ordered, already-decoded URL query snapshot. Percent-decoding happens at
/// the HTTP boundary; this map only ever holds decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap(BTreeMap<String, QueryValue>);

impl QueryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// First value for a key, collapsing `Many` entries.
    #[must_use]
    pub fn get_one(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(QueryValue::first)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert_one(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), QueryValue::One(value.into()));
    }

    pub fn insert_many(
        &mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = String>,
    ) {
        self.0
            .insert(key.into(), QueryValue::Many(values.into_iter().collect()));
    }

    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.0.remove(key)
    }

    /// Overlay `other` on top of this map, replacing colliding keys.
    pub fn merge(&mut self, other: QueryMap) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, QueryValue> {
        self.0.iter()
    }

    /// Parse a decoded `k=v&k=v` string. Repeated keys accumulate into `Many`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut map = Self::new();
        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            map.append(key, value.to_string());
        }
        map
    }

    fn append(&mut self, key: &str, value: String) {
        match self.0.get_mut(key) {
            None => {
                self.0.insert(key.to_string(), QueryValue::One(value));
            }
            Some(QueryValue::One(existing)) => {
                let first = std::mem::take(existing);
                self.0
                    .insert(key.to_string(), QueryValue::Many(vec![first, value]));
            }
            Some(QueryValue::Many(values)) => values.push(value),
        }
    }

    /// Canonical `k=v&k=v` join; `Many` entries repeat the key.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            for v in value.as_slice() {
                parts.push(format!("{key}={v}"));
            }
        }
        parts.join("&")
    }
}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = btree_map::Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, QueryValue)> for QueryMap {
    fn from_iter<T: IntoIterator<Item = (String, QueryValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// True iff any key outside the ignore list differs between the snapshots.
#[must_use]
pub fn query_changed(old: &QueryMap, new: &QueryMap, ignore: &[String]) -> bool {
    let keys: BTreeSet<&String> = old.0.keys().chain(new.0.keys()).collect();
    keys.into_iter()
        .filter(|key| !ignore.iter().any(|i| i == *key))
        .any(|key| old.0.get(key) != new.0.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_accumulate() {
        let map = QueryMap::parse("level=A1&level=B2&owner=alice");
        assert_eq!(
            map.get("level"),
            Some(&QueryValue::Many(vec!["A1".to_string(), "B2".to_string()]))
        );
        assert_eq!(map.get_one("owner"), Some("alice"));
    }

    #[test]
    fn round_trips_through_query_string() {
        let mut map = QueryMap::new();
        map.insert_one("owner", "alice");
        map.insert_many("level", vec!["A1".to_string(), "B2".to_string()]);
        let encoded = map.to_query_string();
        assert_eq!(encoded, "level=A1&level=B2&owner=alice");
        let reparsed = QueryMap::parse(&encoded);
        assert_eq!(reparsed.get("level").map(QueryValue::as_slice), map.get("level").map(QueryValue::as_slice));
        assert_eq!(reparsed.get_one("owner"), Some("alice"));
    }

    #[test]
    fn changed_keys_respects_ignore_list() {
        let old = QueryMap::parse("page=1&owner=alice");
        let new = QueryMap::parse("page=2&owner=alice");
        assert!(query_changed(&old, &new, &[]));
        assert!(!query_changed(&old, &new, &["page".to_string()]));
    }

    #[test]
    fn added_and_removed_keys_count_as_changes() {
        let old = QueryMap::parse("owner=alice");
        let new = QueryMap::parse("owner=alice&level=A1");
        assert!(query_changed(&old, &new, &[]));
        assert!(query_changed(&new, &old, &[]));
        assert!(!query_changed(&old, &new, &["level".to_string()]));
    }
}
