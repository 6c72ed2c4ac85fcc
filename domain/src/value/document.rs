//! Dotted-path navigation over [`ConfigDocument`]s.
//!
//! Reads are safe-navigate-with-default: a missing key, or an intermediate
//! level that is not a mapping, yields `None` (or the caller's default)
//! rather than an error. Writes create missing levels and replace
//! non-mapping intermediates with empty mappings.

use super::config_value::{ConfigDocument, ConfigValue};

/// Path helpers for nested settings documents.
pub trait DocumentPath {
    /// Look up a value by dotted path (e.g. `"grounding.max_results"`).
    fn get_path(&self, path: &str) -> Option<&ConfigValue>;

    /// Set a value by dotted path, creating intermediate mappings as needed.
    fn set_path(&mut self, path: &str, value: ConfigValue);

    /// Get (or create) the mapping stored at `key`.
    ///
    /// A non-mapping value already stored at `key` is replaced.
    fn ensure_map(&mut self, key: &str) -> &mut ConfigDocument;

    fn get_i64_or(&self, path: &str, default: i64) -> i64 {
        self.get_path(path)
            .and_then(ConfigValue::as_i64)
            .unwrap_or(default)
    }

    fn get_f64_or(&self, path: &str, default: f64) -> f64 {
        self.get_path(path)
            .and_then(ConfigValue::as_f64)
            .unwrap_or(default)
    }

    fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(ConfigValue::as_str)
    }
}

impl DocumentPath for ConfigDocument {
    fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.get(first)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    fn set_path(&mut self, path: &str, value: ConfigValue) {
        match path.split_once('.') {
            None => {
                self.insert(path.to_string(), value);
            }
            Some((head, rest)) => self.ensure_map(head).set_path(rest, value),
        }
    }

    fn ensure_map(&mut self, key: &str) -> &mut ConfigDocument {
        self.entry(key.to_string())
            .or_insert_with(|| ConfigValue::Map(ConfigDocument::new()))
            .make_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigDocument {
        let mut grounding = ConfigDocument::new();
        grounding.insert("max_results".into(), ConfigValue::Int(7));
        let mut doc = ConfigDocument::new();
        doc.insert("grounding".into(), ConfigValue::Map(grounding));
        doc.insert("google".into(), ConfigValue::Str("not a map".into()));
        doc
    }

    #[test]
    fn test_get_path_nested() {
        let doc = sample();
        assert_eq!(doc.get_i64_or("grounding.max_results", 5), 7);
    }

    #[test]
    fn test_missing_intermediate_yields_default() {
        let doc = sample();
        assert_eq!(doc.get_i64_or("provider.timeout", 30), 30);
        // Intermediate exists but is a scalar
        assert_eq!(doc.get_i64_or("google.max_tokens", 1500), 1500);
    }

    #[test]
    fn test_set_path_replaces_scalar_intermediate() {
        let mut doc = sample();
        doc.set_path("google.max_tokens", ConfigValue::Int(2048));
        assert_eq!(doc.get_i64_or("google.max_tokens", 0), 2048);
    }

    #[test]
    fn test_set_path_keeps_existing_siblings_and_order() {
        let mut doc = sample();
        doc.set_path("grounding.enabled", ConfigValue::Bool(true));
        let grounding = doc["grounding"].as_map().unwrap();
        let keys: Vec<_> = grounding.keys().cloned().collect();
        assert_eq!(keys, vec!["max_results", "enabled"]);
        let top: Vec<_> = doc.keys().cloned().collect();
        assert_eq!(top, vec!["grounding", "google"]);
    }

    #[test]
    fn test_ensure_map_resets_scalar_in_place() {
        let mut doc = sample();
        doc.ensure_map("google").insert("max_tokens".into(), ConfigValue::Int(900));
        assert!(doc["google"].is_map());
        let top: Vec<_> = doc.keys().cloned().collect();
        assert_eq!(top, vec!["grounding", "google"]);
        assert_eq!(doc.get_i64_or("grounding.max_results", 0), 7);
    }
}
