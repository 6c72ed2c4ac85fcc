//! Control range overrides from TOML (`[ranges.<FIELD>]` sections)

use knobpanel_domain::{ConfigIssue, ConfigIssueCode, Field, FieldRanges, Range};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw `min`/`max` override for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRangeConfig {
    pub min: i64,
    pub max: i64,
}

/// Convert overrides keyed by field name into [`FieldRanges`].
///
/// Unknown fields and inverted ranges are skipped and reported.
pub fn to_field_ranges(
    ranges: &BTreeMap<String, FileRangeConfig>,
) -> (FieldRanges, Vec<ConfigIssue>) {
    let mut result = FieldRanges::new();
    let mut issues = Vec::new();

    for (name, raw) in ranges {
        let field: Field = match name.parse() {
            Ok(f) => f,
            Err(_) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownField {
                        field: name.clone(),
                    },
                    format!("ranges.{}: unknown field, override ignored", name),
                ));
                continue;
            }
        };
        match Range::new(raw.min, raw.max) {
            Ok(range) => result = result.with_override(field, range),
            Err(_) => issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvertedRange {
                    field: name.clone(),
                    min: raw.min,
                    max: raw.max,
                },
                format!(
                    "ranges.{}: min {} is greater than max {}, override ignored",
                    name, raw.min, raw.max
                ),
            )),
        }
    }

    (result, issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_override_applied() {
        let mut raw = BTreeMap::new();
        raw.insert("total_words".to_string(), FileRangeConfig { min: 500, max: 9000 });
        let (ranges, issues) = to_field_ranges(&raw);
        assert!(issues.is_empty());
        assert_eq!(ranges.range(Field::TotalWords), Range { min: 500, max: 9000 });
        assert_eq!(ranges.range(Field::MaxSections), Field::MaxSections.spec().range);
    }

    #[test]
    fn test_invalid_overrides_reported() {
        let mut raw = BTreeMap::new();
        raw.insert("TOTAL_WORDS".to_string(), FileRangeConfig { min: 10, max: 1 });
        raw.insert("VOLUME".to_string(), FileRangeConfig { min: 0, max: 11 });
        let (ranges, issues) = to_field_ranges(&raw);
        assert_eq!(issues.len(), 2);
        assert_eq!(ranges.range(Field::TotalWords), Field::TotalWords.spec().range);
    }
}
