//! Transient settings snapshot exchanged between the settings model and the stores

use super::config_value::{ConfigDocument, ConfigValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical setting name → value, rebuilt on every write cycle.
///
/// Keys are flat strings; nesting is expressed with dots
/// (`"fpf.grounding.max_results"`, `"enable.gptr"`), never with nested maps.
/// Lookups are optimistic: a missing or mistyped entry is simply `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBag {
    values: BTreeMap<String, ConfigValue>,
}

impl ValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ConfigValue::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.values.iter()
    }

    /// Entries whose key starts with `prefix.`, with the prefix stripped.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a ConfigValue)> + 'a {
        self.values.iter().filter_map(move |(k, v)| {
            k.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|rest| (rest, v))
        })
    }

    /// Flatten a (possibly nested) document into dotted keys.
    ///
    /// `{"enable": {"fpf": true}}` and `{"enable.fpf": true}` produce the same bag.
    /// Lists and scalars are kept as leaf values.
    pub fn from_document(document: &ConfigDocument) -> Self {
        let mut bag = Self::new();
        bag.flatten_into(None, document);
        bag
    }

    fn flatten_into(&mut self, prefix: Option<&str>, document: &ConfigDocument) {
        for (key, value) in document {
            let full_key = match prefix {
                Some(p) => format!("{}.{}", p, key),
                None => key.clone(),
            };
            match value {
                ConfigValue::Map(inner) => self.flatten_into(Some(&full_key), inner),
                other => {
                    self.values.insert(full_key, other.clone());
                }
            }
        }
    }

    /// The bag as a flat document, keys in sorted order.
    pub fn to_document(&self) -> ConfigDocument {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for ValueBag {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
