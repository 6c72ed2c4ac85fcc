//! The settings model: explicit state of every control of the panel.
//!
//! The model is passed by reference into whichever use case needs it; it
//! converts itself into a [`ValueBag`] for writing and absorbs a bag (a
//! preset snapshot) for loading.

use super::field::{Field, Range, Scale};
use super::report::{Enables, ReportType, Toggle};
use crate::scaling::{fraction_to_percent, master_scale_value, percent_to_fraction, position_in_range};
use crate::value::config_value::ConfigValue;
use crate::value::value_bag::ValueBag;
use std::collections::BTreeMap;

/// Range of the master quality control.
pub const MASTER_RANGE: Range = Range { min: 0, max: 100 };

/// Value-bag keys of the path settings.
pub const INPUT_FOLDER: &str = "input_folder";
pub const OUTPUT_FOLDER: &str = "output_folder";
pub const INSTRUCTIONS_FILE: &str = "instructions_file";

/// Provider/model choice for a report type.
///
/// Kept in presets only; never written to the primary settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Folder and file locations handed to the generation script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSettings {
    pub input_folder: Option<String>,
    pub output_folder: Option<String>,
    pub instructions_file: Option<String>,
}

impl PathSettings {
    pub fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (INPUT_FOLDER, self.input_folder.as_deref()),
            (OUTPUT_FOLDER, self.output_folder.as_deref()),
            (INSTRUCTIONS_FILE, self.instructions_file.as_deref()),
        ]
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            INPUT_FOLDER => Some(&mut self.input_folder),
            OUTPUT_FOLDER => Some(&mut self.output_folder),
            INSTRUCTIONS_FILE => Some(&mut self.instructions_file),
            _ => None,
        }
    }

    /// Copy every path that is set in `other`.
    pub fn merge(&mut self, other: &PathSettings) {
        for (key, value) in other.entries() {
            if let (Some(value), Some(slot)) = (value, self.slot_mut(key)) {
                *slot = Some(value.to_string());
            }
        }
    }
}

/// Per-field range overrides on top of the built-in ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRanges {
    overrides: BTreeMap<Field, Range>,
}

impl FieldRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, field: Field, range: Range) -> Self {
        self.overrides.insert(field, range);
        self
    }

    pub fn range(&self, field: Field) -> Range {
        self.overrides
            .get(&field)
            .copied()
            .unwrap_or(field.spec().range)
    }
}

/// Current state of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsModel {
    ranges: FieldRanges,
    values: BTreeMap<Field, i64>,
    pub enables: Enables,
    pub paths: PathSettings,
    pub providers: BTreeMap<ReportType, ProviderSelection>,
}

impl Default for SettingsModel {
    fn default() -> Self {
        Self::with_ranges(FieldRanges::default())
    }
}

impl SettingsModel {
    /// Model with every control at its default position.
    pub fn with_ranges(ranges: FieldRanges) -> Self {
        let values = Field::ALL
            .into_iter()
            .map(|f| (f, ranges.range(f).clamp(f.spec().default)))
            .collect();
        Self {
            ranges,
            values,
            enables: Enables::default(),
            paths: PathSettings::default(),
            providers: BTreeMap::new(),
        }
    }

    pub fn range(&self, field: Field) -> Range {
        self.ranges.range(field)
    }

    /// Current control position.
    pub fn get(&self, field: Field) -> i64 {
        self.values
            .get(&field)
            .copied()
            .unwrap_or_else(|| self.range(field).clamp(field.spec().default))
    }

    /// Set a control position, clamped to the field's range. Returns the stored position.
    pub fn set(&mut self, field: Field, position: i64) -> i64 {
        let clamped = self.range(field).clamp(position);
        self.values.insert(field, clamped);
        clamped
    }

    /// Set a control from its persisted representation.
    ///
    /// Percent fields take a fraction (`0.4` → position 40); integer fields
    /// are rounded to the nearest position.
    pub fn set_stored(&mut self, field: Field, stored: f64) -> i64 {
        let position = match field.spec().scale {
            Scale::Percent => fraction_to_percent(stored),
            Scale::Integer if stored.is_finite() => stored.round_ties_even() as i64,
            Scale::Integer => field.spec().default,
        };
        self.set(field, position)
    }

    /// The value written to the field's artifact.
    pub fn stored_value(&self, field: Field) -> ConfigValue {
        let position = self.get(field);
        match field.spec().scale {
            Scale::Integer => ConfigValue::Int(position),
            Scale::Percent => ConfigValue::Float(percent_to_fraction(position)),
        }
    }

    pub fn set_enabled(&mut self, toggle: Toggle, enabled: bool) {
        self.enables.set(toggle, enabled);
    }

    pub fn provider_mut(&mut self, report: ReportType) -> &mut ProviderSelection {
        self.providers.entry(report).or_default()
    }

    /// Fan a master quality position (0–100) out to every bounded field.
    pub fn apply_master_quality(&mut self, position: i64) {
        let percent = position_in_range(position, MASTER_RANGE.min, MASTER_RANGE.max);
        self.apply_master_percent(percent);
    }

    /// Set every field to `min + round(percent * (max - min))` of its own range.
    ///
    /// Fields with a degenerate range keep their position.
    pub fn apply_master_percent(&mut self, percent: f64) {
        for field in Field::ALL {
            let range = self.range(field);
            if let Some(target) = master_scale_value(percent, range.min, range.max) {
                self.values.insert(field, target);
            }
        }
    }

    /// Snapshot the model as a value bag.
    pub fn gather(&self) -> ValueBag {
        let mut bag = ValueBag::new();

        for field in Field::ALL {
            bag.insert(field.key(), self.stored_value(field));
        }

        for (key, value) in self.paths.entries() {
            if let Some(value) = value {
                bag.insert(key, value);
            }
        }

        for toggle in Toggle::ALL {
            bag.insert(format!("enable.{}", toggle), self.enables.get(toggle));
        }

        for (report, selection) in &self.providers {
            if let Some(provider) = &selection.provider {
                bag.insert(format!("providers.{}.provider", report), provider.as_str());
            }
            if let Some(model) = &selection.model {
                bag.insert(format!("providers.{}.model", report), model.as_str());
            }
        }

        bag
    }

    /// Best-effort application of a snapshot. Known keys are applied (and
    /// clamped); the keys that could not be applied are returned.
    pub fn apply_bag(&mut self, bag: &ValueBag) -> Vec<String> {
        let mut ignored = Vec::new();

        for (key, value) in bag.iter() {
            let applied = if let Some(field) = Field::from_key(key) {
                value.as_f64().map(|v| self.set_stored(field, v)).is_some()
            } else if let Some(name) = key.strip_prefix("enable.") {
                match (name.parse::<Toggle>(), value.as_bool()) {
                    (Ok(toggle), Some(enabled)) => {
                        self.set_enabled(toggle, enabled);
                        true
                    }
                    _ => false,
                }
            } else if let Some(rest) = key.strip_prefix("providers.") {
                self.apply_provider_entry(rest, value)
            } else if let Some(slot) = self.paths.slot_mut(key) {
                match value.as_str() {
                    Some(s) => {
                        *slot = Some(s.to_string());
                        true
                    }
                    None => false,
                }
            } else {
                false
            };

            if !applied {
                ignored.push(key.clone());
            }
        }

        ignored
    }

    fn apply_provider_entry(&mut self, rest: &str, value: &ConfigValue) -> bool {
        let Some((report, attr)) = rest.split_once('.') else {
            return false;
        };
        let (Ok(report), Some(text)) = (report.parse::<ReportType>(), value.as_str()) else {
            return false;
        };
        let selection = self.provider_mut(report);
        match attr {
            "provider" => selection.provider = Some(text.to_string()),
            "model" => selection.model = Some(text.to_string()),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let model = SettingsModel::default();
        for field in Field::ALL {
            let range = model.range(field);
            let v = model.get(field);
            assert!(v >= range.min && v <= range.max, "{}", field);
        }
        assert_eq!(model.get(Field::Temperature), 40);
    }

    #[test]
    fn test_set_clamps() {
        let mut model = SettingsModel::default();
        assert_eq!(model.set(Field::MaxSections, 99), 10);
        assert_eq!(model.set(Field::MaxSections, -3), 1);
    }

    #[test]
    fn test_temperature_stored_as_fraction() {
        let mut model = SettingsModel::default();
        model.set(Field::Temperature, 75);
        assert_eq!(model.stored_value(Field::Temperature), ConfigValue::Float(0.75));

        model.set_stored(Field::Temperature, 0.4);
        assert_eq!(model.get(Field::Temperature), 40);
    }

    #[test]
    fn test_master_quality_endpoints() {
        let mut model = SettingsModel::default();

        model.apply_master_quality(0);
        for field in Field::ALL {
            assert_eq!(model.get(field), model.range(field).min, "{}", field);
        }

        model.apply_master_quality(100);
        for field in Field::ALL {
            assert_eq!(model.get(field), model.range(field).max, "{}", field);
        }
    }

    #[test]
    fn test_master_quality_midpoint_per_field_range() {
        let mut model = SettingsModel::default();
        model.apply_master_percent(0.5);
        let expected = [
            (Field::IterationsDefault, 5),
            (Field::GroundingMaxResults, 11),
            (Field::GoogleMaxTokens, 4224),
            (Field::FastTokenLimit, 5250),
            (Field::SmartTokenLimit, 10500),
            (Field::StrategicTokenLimit, 10500),
            (Field::BrowseChunkMaxLength, 10500),
            (Field::SummaryTokenLimit, 1050),
            (Field::Temperature, 50),
            (Field::MaxSearchResultsPerQuery, 11),
            (Field::TotalWords, 2550),
            (Field::MaxIterations, 5),
            (Field::MaxSubtopics, 5),
            (Field::DeepResearchBreadth, 5),
            (Field::DeepResearchDepth, 5),
            (Field::MaxSections, 5),
        ];
        assert_eq!(expected.len(), Field::ALL.len());
        for (field, value) in expected {
            assert_eq!(model.get(field), value, "{}", field);
        }
    }

    #[test]
    fn test_master_skips_degenerate_range() {
        let ranges = FieldRanges::new().with_override(Field::MaxSections, Range::new(4, 4).unwrap());
        let mut model = SettingsModel::with_ranges(ranges);
        model.apply_master_percent(1.0);
        assert_eq!(model.get(Field::MaxSections), 4);
    }

    #[test]
    fn test_gather_contains_flat_keys() {
        let mut model = SettingsModel::default();
        model.set_enabled(Toggle::Report(ReportType::Ma), false);
        model.paths.input_folder = Some("/data/in".into());
        model.provider_mut(ReportType::Fpf).model = Some("gpt-4o".into());

        let bag = model.gather();
        assert_eq!(bag.get_i64("fpf.grounding.max_results"), Some(5));
        assert_eq!(bag.get_f64("TEMPERATURE"), Some(0.4));
        assert_eq!(bag.get_bool("enable.ma"), Some(false));
        assert_eq!(bag.get_bool("enable.pairwise"), Some(true));
        assert_eq!(bag.get_str("input_folder"), Some("/data/in"));
        assert_eq!(bag.get_str("providers.fpf.model"), Some("gpt-4o"));
        assert!(!bag.contains("output_folder"));
    }

    #[test]
    fn test_apply_bag_round_trips_gather() {
        let mut source = SettingsModel::default();
        source.set(Field::TotalWords, 2500);
        source.set(Field::Temperature, 65);
        source.set_enabled(Toggle::Evaluation, false);
        source.paths.output_folder = Some("out".into());
        source.provider_mut(ReportType::Dr).provider = Some("openai".into());

        let mut target = SettingsModel::default();
        let ignored = target.apply_bag(&source.gather());
        assert!(ignored.is_empty(), "ignored: {:?}", ignored);
        assert_eq!(target, source);
    }

    #[test]
    fn test_apply_bag_reports_unknown_keys_and_clamps() {
        let mut bag = ValueBag::new();
        bag.insert("TOTAL_WORDS", 999_999i64);
        bag.insert("volume", 11i64);
        bag.insert("enable.fpf", "yes");

        let mut model = SettingsModel::default();
        let ignored = model.apply_bag(&bag);
        assert_eq!(model.get(Field::TotalWords), 5000);
        assert_eq!(ignored, vec!["enable.fpf".to_string(), "volume".to_string()]);
    }
}
