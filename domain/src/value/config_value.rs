//! Scalar-or-mapping configuration values

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mapping from key to value that keeps insertion order.
///
/// Used as the in-memory form of every structured settings document so that
/// rewriting a document does not reorder the keys a human put there.
pub type ConfigDocument = IndexMap<String, ConfigValue>;

/// A value found in (or destined for) a settings artifact.
///
/// Deserialization is untagged: the first variant whose shape matches wins,
/// so `1` becomes [`ConfigValue::Int`] and `1.5` becomes [`ConfigValue::Float`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ConfigValue>),
    Map(ConfigDocument),
}

impl ConfigValue {
    /// Integer view. Floats are truncated toward zero; everything else is `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(v) => Some(*v),
            ConfigValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            _ => None,
        }
    }

    /// Floating-point view of a numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Int(v) => Some(*v as f64),
            ConfigValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigDocument> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ConfigDocument> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ConfigValue::Map(_))
    }

    /// The inner mapping; any other value is first replaced by an empty one.
    pub fn make_map(&mut self) -> &mut ConfigDocument {
        match self {
            ConfigValue::Map(m) => m,
            other => {
                *other = ConfigValue::Map(ConfigDocument::new());
                other.make_map()
            }
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::Str(s) => write!(f, "{:?}", s),
            ConfigValue::List(items) => write!(f, "[{} items]", items.len()),
            ConfigValue::Map(m) => write!(f, "{{{} keys}}", m.len()),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::Str(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Str(v.to_string())
    }
}

impl From<ConfigDocument> for ConfigValue {
    fn from(v: ConfigDocument) -> Self {
        ConfigValue::Map(v)
    }
}
