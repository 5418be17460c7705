// SPDX-License-Identifier: Apache-2.0

//! Lossless, reversible mapping between typed filter values and flat URL
//! query key/value pairs.
//!
//! Malformed values never crash the view: the offending fragment is logged
//! and dropped on serialize, and skipped on deserialize.

use crate::filters::{
    DateRange, FilterDate, FilterEntity, FilterItem, FilterOptions, FilterState, FilterType,
    FilterValue, LookupItems, Scalar,
};
use crate::query::{QueryMap, QueryValue};
use tracing::{debug, error};

/// Convert one filter's current value into URL parameters.
///
/// Returns an empty map when the value is absent or empty, when a custom
/// serializer is not set and the value does not fit the declared filter type,
/// and for date ranges with no valid side.
#[must_use]
pub fn serialize_filter_value(item: &FilterItem, state: &FilterState) -> QueryMap {
    let Some(value) = state.get(&item.key) else {
        return QueryMap::new();
    };
    if value.is_empty() {
        return QueryMap::new();
    }
    if let Some(serializer) = &item.serializer {
        return serializer(state);
    }

    let url_key = item.url_key();

    if item.filter_type == FilterType::Date {
        let FilterValue::Range(range) = value else {
            error!(key = url_key, "serialize: expected a date range value");
            return QueryMap::new();
        };
        return serialize_date_range(range, url_key);
    }

    let return_object = item
        .options
        .as_ref()
        .is_some_and(|o| o.return_object)
        && matches!(item.filter_type, FilterType::Select | FilterType::MultipleSelect);
    if return_object {
        let value_field = item
            .options
            .as_ref()
            .map_or("value", FilterOptions::value_field);
        return serialize_entities(value, url_key, value_field);
    }

    serialize_scalars(value, url_key)
}

/// Serialize every declared filter into one URL fragment.
#[must_use]
pub fn serialize_filters(items: &[FilterItem], state: &FilterState) -> QueryMap {
    let mut query = QueryMap::new();
    for item in items {
        query.merge(serialize_filter_value(item, state));
    }
    query
}

fn serialize_date_range(range: &DateRange, url_key: &str) -> QueryMap {
    let mut query = QueryMap::new();
    for (suffix, side) in [("from", range.from), ("to", range.to)] {
        let Some(date) = side else { continue };
        match date.timestamp_millis() {
            Some(ms) => query.insert_one(format!("{url_key}_{suffix}"), ms.to_string()),
            // An invalid date has no epoch to emit; the side is dropped.
            None => debug!(key = url_key, side = suffix, "serialize: invalid date side omitted"),
        }
    }
    query
}

fn serialize_entities(value: &FilterValue, url_key: &str, value_field: &str) -> QueryMap {
    let mut query = QueryMap::new();
    match value {
        FilterValue::Entity(entity) => match entity.field(value_field) {
            Some(scalar) => query.insert_one(url_key, scalar.to_query_string()),
            None => {
                error!(key = url_key, field = value_field, "serialize: entity is missing the value field");
            }
        },
        FilterValue::Entities(entities) => {
            let mut values = Vec::with_capacity(entities.len());
            for entity in entities {
                let Some(scalar) = entity.field(value_field) else {
                    error!(key = url_key, field = value_field, "serialize: entity is missing the value field");
                    return QueryMap::new();
                };
                values.push(scalar.to_query_string());
            }
            query.insert_many(url_key, values);
        }
        _ => {
            error!(key = url_key, "serialize: expected an entity or list of entities");
        }
    }
    query
}

fn serialize_scalars(value: &FilterValue, url_key: &str) -> QueryMap {
    let mut query = QueryMap::new();
    match value {
        FilterValue::Scalar(scalar) => query.insert_one(url_key, scalar.to_query_string()),
        FilterValue::List(scalars) => {
            query.insert_many(url_key, scalars.iter().map(Scalar::to_query_string));
        }
        _ => {
            error!(key = url_key, "serialize: expected a primitive or list of primitives");
        }
    }
    query
}

/// Reconstruct a filter's typed value from the URL query.
///
/// Returns `None` when the relevant parameters are absent or when lookup
/// resolution fails for an entity-valued filter.
#[must_use]
pub fn deserialize_filter_value(item: &FilterItem, query: &QueryMap) -> Option<FilterValue> {
    if let Some(deserializer) = &item.deserializer {
        return deserializer(query);
    }

    let url_key = item.url_key();

    if item.filter_type == FilterType::Date {
        return deserialize_date_range(query, url_key);
    }

    let raw = query.get(url_key)?;
    deserialize_standard(item, raw)
}

fn deserialize_date_range(query: &QueryMap, url_key: &str) -> Option<FilterValue> {
    let from = query
        .get_one(&format!("{url_key}_from"))
        .map(FilterDate::from_epoch_millis);
    let to = query
        .get_one(&format!("{url_key}_to"))
        .map(FilterDate::from_epoch_millis);
    if from.is_none() && to.is_none() {
        return None;
    }
    Some(FilterValue::Range(DateRange { from, to }))
}

fn deserialize_standard(item: &FilterItem, raw: &QueryValue) -> Option<FilterValue> {
    let options = item.options.clone().unwrap_or_default();
    let entries = raw.as_slice();
    if entries.is_empty() {
        return None;
    }

    if options.return_object {
        let Some(LookupItems::Entities(lookup)) = &options.items else {
            error!(
                key = item.key.as_str(),
                "deserialize: return_object requires an entity lookup list"
            );
            return None;
        };
        let mut found = Vec::with_capacity(entries.len());
        for entry in entries {
            match find_entity(lookup, options.value_field(), entry) {
                Some(entity) => found.push(entity.clone()),
                None => {
                    error!(key = item.key.as_str(), value = entry.as_str(), "deserialize: no entity matches the query value");
                    return None;
                }
            }
        }
        return Some(collapse_entities(found, item.filter_type));
    }

    let scalars = entries
        .iter()
        .map(|entry| resolve_scalar(entry, &options, &item.key))
        .collect::<Vec<_>>();
    Some(collapse_scalars(scalars, item.filter_type))
}

fn find_entity<'a>(
    lookup: &'a [FilterEntity],
    value_field: &str,
    entry: &str,
) -> Option<&'a FilterEntity> {
    lookup.iter().find(|candidate| {
        candidate
            .field(value_field)
            .is_some_and(|scalar| scalar.to_query_string() == entry)
    })
}

/// Match one query entry against the lookup list; fall back to a numeric cast
/// or the raw string when nothing matches or no list is declared.
fn resolve_scalar(entry: &str, options: &FilterOptions, key: &str) -> Scalar {
    if let Some(items) = &options.items {
        match items {
            LookupItems::Scalars(lookup) => {
                if let Some(found) = lookup
                    .iter()
                    .find(|candidate| candidate.to_query_string() == entry)
                {
                    return found.clone();
                }
            }
            LookupItems::Entities(_) => {
                error!(key, "deserialize: entity lookup list on a primitive filter");
            }
        }
    }
    if options.number {
        return cast_number(entry, key);
    }
    Scalar::Str(entry.to_string())
}

fn cast_number(entry: &str, key: &str) -> Scalar {
    if let Ok(int) = entry.parse::<i64>() {
        return Scalar::Int(int);
    }
    if let Ok(float) = entry.parse::<f64>() {
        return Scalar::Float(float);
    }
    debug!(key, value = entry, "deserialize: numeric cast failed, keeping raw string");
    Scalar::Str(entry.to_string())
}

fn collapse_scalars(mut scalars: Vec<Scalar>, filter_type: FilterType) -> FilterValue {
    if filter_type.is_multiple() {
        FilterValue::List(scalars)
    } else {
        FilterValue::Scalar(scalars.swap_remove(0))
    }
}

fn collapse_entities(mut entities: Vec<FilterEntity>, filter_type: FilterType) -> FilterValue {
    if filter_type.is_multiple() {
        FilterValue::Entities(entities)
    } else {
        FilterValue::Entity(entities.swap_remove(0))
    }
}
