//! Numeric-literal patching of source text.
//!
//! The patcher edits `"KEY": <number>` sites inside a file it does not
//! parse. Lookups are scoped to the configuration block (the `{ ... }` that
//! follows the block marker) and fall back to the whole text when the block
//! is missing or does not contain the key. Only the first match is touched.

use regex::Regex;
use std::collections::BTreeMap;
use std::ops::Range;

/// Marker of the configuration block in the default source artifact.
pub const DEFAULT_BLOCK_MARKER: &str = "DEFAULT_CONFIG";

const NUMBER: &str = r"-?\d+(?:\.\d+)?";
const INTEGER_EPSILON: f64 = 1e-9;

/// Locates and replaces numeric literals by quoted key.
#[derive(Debug, Clone)]
pub struct LiteralPatcher {
    block: Regex,
    pair: Regex,
}

impl LiteralPatcher {
    /// Patcher for blocks introduced by `marker` (`MARKER: Type = {` or `MARKER = {`).
    pub fn new(marker: &str) -> Result<Self, regex::Error> {
        let block = Regex::new(&format!(
            r"(?ms){}\s*(?::\s*[\w.\[\], ]+?)?\s*=\s*\{{(.*?)\}}\s*$",
            regex::escape(marker)
        ))?;
        let pair = Regex::new(&format!(r#""([^"\\]+)"\s*:\s*({})"#, NUMBER))?;
        Ok(Self { block, pair })
    }

    /// Byte range of the configuration block body, if present.
    fn block_span(&self, text: &str) -> Option<Range<usize>> {
        self.block
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.range())
    }

    fn key_regex(key: &str) -> Option<Regex> {
        Regex::new(&format!(r#"("{}"\s*:\s*)({})"#, regex::escape(key), NUMBER)).ok()
    }

    /// Byte range of the numeric literal for `key`: block first, then the whole text.
    fn find_literal(&self, text: &str, key: &str) -> Option<Range<usize>> {
        let re = Self::key_regex(key)?;
        let literal_in = |scope: &str, offset: usize| {
            re.captures(scope)
                .and_then(|c| c.get(2))
                .map(|m| m.start() + offset..m.end() + offset)
        };

        self.block_span(text)
            .and_then(|span| literal_in(&text[span.clone()], span.start))
            .or_else(|| literal_in(text, 0))
    }

    /// Value of the first literal for `key`, or `None` if the key is absent.
    pub fn extract(&self, text: &str, key: &str) -> Option<f64> {
        let span = self.find_literal(text, key)?;
        text[span].parse().ok()
    }

    /// Every `"KEY": <number>` pair. Block values take precedence over
    /// occurrences elsewhere; within a scope the first occurrence wins.
    pub fn extract_all(&self, text: &str) -> BTreeMap<String, f64> {
        let mut values = BTreeMap::new();
        let mut collect = |scope: &str| {
            for caps in self.pair.captures_iter(scope) {
                if let Ok(v) = caps[2].parse::<f64>() {
                    values.entry(caps[1].to_string()).or_insert(v);
                }
            }
        };

        if let Some(span) = self.block_span(text) {
            collect(&text[span]);
        }
        collect(text);
        values
    }

    /// Replace the literal for `key` with `value`, leaving every other byte
    /// unchanged. Returns the new text and whether a replacement happened.
    ///
    /// Non-finite values are never written.
    pub fn replace(&self, text: &str, key: &str, value: f64) -> (String, bool) {
        let (Some(formatted), Some(span)) = (format_number(value), self.find_literal(text, key))
        else {
            return (text.to_string(), false);
        };

        let mut patched = String::with_capacity(text.len() + formatted.len());
        patched.push_str(&text[..span.start]);
        patched.push_str(&formatted);
        patched.push_str(&text[span.end..]);
        (patched, true)
    }
}

/// Bare integer when `value` is integral (within 1e-9), else two decimals.
pub fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if (value - truncated).abs() < INTEGER_EPSILON {
        Some(format!("{}", truncated as i64))
    } else {
        Some(format!("{:.2}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"from .base import BaseConfig

TOTAL_WORDS_NOTE = {"TOTAL_WORDS": 42}

DEFAULT_CONFIG: BaseConfig = {
    "RETRIEVER": "tavily",
    "FAST_TOKEN_LIMIT": 3000,
    "TEMPERATURE": 0.4,
    "TOTAL_WORDS": 1200,  # words
    "EMBEDDING": "openai:text-embedding-3-small",
}
"#;

    fn patcher() -> LiteralPatcher {
        LiteralPatcher::new(DEFAULT_BLOCK_MARKER).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0).as_deref(), Some("5"));
        assert_eq!(format_number(0.75).as_deref(), Some("0.75"));
        assert_eq!(format_number(0.4).as_deref(), Some("0.40"));
        assert_eq!(format_number(-3.0).as_deref(), Some("-3"));
        assert_eq!(format_number(2.0 + 1e-12).as_deref(), Some("2"));
        assert_eq!(format_number(f64::NAN), None);
    }

    #[test]
    fn test_replace_changes_only_the_literal() {
        let text = "x = {\n    \"TEMPERATURE\": 0.4,\n}\n";
        let (patched, replaced) = patcher().replace(text, "TEMPERATURE", 0.75);
        assert!(replaced);
        assert_eq!(patched, "x = {\n    \"TEMPERATURE\": 0.75,\n}\n");
    }

    #[test]
    fn test_integral_value_written_bare() {
        let text = "\"TOTAL_WORDS\": 1200,";
        let (patched, replaced) = patcher().replace(text, "TOTAL_WORDS", 5.0);
        assert!(replaced);
        assert_eq!(patched, "\"TOTAL_WORDS\": 5,");
    }

    #[test]
    fn test_absent_key_leaves_text_unchanged() {
        let (patched, replaced) = patcher().replace(SOURCE, "MAX_SUBTOPICS", 4.0);
        assert!(!replaced);
        assert_eq!(patched, SOURCE);
        assert_eq!(patcher().extract(SOURCE, "MAX_SUBTOPICS"), None);
    }

    #[test]
    fn test_block_occurrence_wins_over_earlier_one() {
        let p = patcher();
        assert_eq!(p.extract(SOURCE, "TOTAL_WORDS"), Some(1200.0));

        let (patched, replaced) = p.replace(SOURCE, "TOTAL_WORDS", 2500.0);
        assert!(replaced);
        assert!(patched.contains(r#"TOTAL_WORDS_NOTE = {"TOTAL_WORDS": 42}"#));
        assert!(patched.contains(r#""TOTAL_WORDS": 2500,  # words"#));
    }

    #[test]
    fn test_falls_back_to_whole_text_without_block() {
        let text = "SETTINGS = dict(\n    \"MAX_ITERATIONS\": 3,\n)\n";
        let p = patcher();
        assert_eq!(p.extract(text, "MAX_ITERATIONS"), Some(3.0));
        let (patched, replaced) = p.replace(text, "MAX_ITERATIONS", 6.0);
        assert!(replaced);
        assert!(patched.contains("\"MAX_ITERATIONS\": 6,"));
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let text = "\"DEPTH\": 1, \"DEPTH\": 1";
        let (patched, _) = patcher().replace(text, "DEPTH", 3.0);
        assert_eq!(patched, "\"DEPTH\": 3, \"DEPTH\": 1");
    }

    #[test]
    fn test_extract_all_prefers_block() {
        let values = patcher().extract_all(SOURCE);
        assert_eq!(values.get("TOTAL_WORDS"), Some(&1200.0));
        assert_eq!(values.get("TEMPERATURE"), Some(&0.4));
        assert_eq!(values.get("FAST_TOKEN_LIMIT"), Some(&3000.0));
        assert!(!values.contains_key("RETRIEVER"));
    }

    #[test]
    fn test_custom_marker() {
        let text = "CONFIG = {\n  \"A\": 1,\n}\n\"A\": 9\n";
        let p = LiteralPatcher::new("CONFIG").unwrap();
        assert_eq!(p.extract(text, "A"), Some(1.0));
    }
}
