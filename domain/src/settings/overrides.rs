//! Control changes requested from outside the model (command line, scripts).

use super::field::Field;
use super::model::{PathSettings, SettingsModel};
use super::report::{ReportType, Toggle};
use crate::core::error::DomainError;

/// New value for a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetValue {
    /// Control position (`TEMPERATURE=75`).
    Position(i64),
    /// Persisted representation (`TEMPERATURE=0.75`).
    Stored(f64),
}

/// A batch of control changes, applied in a fixed order:
/// master quality, explicit values, toggles, paths, providers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub master: Option<i64>,
    pub values: Vec<(Field, SetValue)>,
    pub enable: Vec<Toggle>,
    pub disable: Vec<Toggle>,
    pub paths: PathSettings,
    pub providers: Vec<(ReportType, Option<String>, Option<String>)>,
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, model: &mut SettingsModel) {
        if let Some(master) = self.master {
            model.apply_master_quality(master);
        }

        for (field, value) in &self.values {
            match *value {
                SetValue::Position(p) => model.set(*field, p),
                SetValue::Stored(v) => model.set_stored(*field, v),
            };
        }

        for toggle in &self.enable {
            model.set_enabled(*toggle, true);
        }
        for toggle in &self.disable {
            model.set_enabled(*toggle, false);
        }

        model.paths.merge(&self.paths);

        for (report, provider, model_name) in &self.providers {
            let selection = model.provider_mut(*report);
            if let Some(p) = provider {
                selection.provider = Some(p.clone());
            }
            if let Some(m) = model_name {
                selection.model = Some(m.clone());
            }
        }
    }
}

/// Parse `FIELD=VALUE`. A value containing `.` is the persisted form,
/// anything else is a control position.
pub fn parse_assignment(s: &str) -> Result<(Field, SetValue), DomainError> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| DomainError::InvalidValue(format!("expected FIELD=VALUE, got '{}'", s)))?;
    let field: Field = key.parse()?;
    let raw = raw.trim();

    let value = if raw.contains('.') {
        raw.parse::<f64>()
            .map(SetValue::Stored)
            .map_err(|_| DomainError::InvalidValue(format!("{}: '{}' is not a number", field, raw)))?
    } else {
        raw.parse::<i64>()
            .map(SetValue::Position)
            .map_err(|_| DomainError::InvalidValue(format!("{}: '{}' is not an integer", field, raw)))?
    };
    Ok((field, value))
}

/// Parse `REPORT=PROVIDER[:MODEL]`. Either side of `:` may be empty.
pub fn parse_provider(s: &str) -> Result<(ReportType, Option<String>, Option<String>), DomainError> {
    let (report, spec) = s.split_once('=').ok_or_else(|| {
        DomainError::InvalidValue(format!("expected REPORT=PROVIDER[:MODEL], got '{}'", s))
    })?;
    let report: ReportType = report.parse()?;

    let non_empty = |v: &str| {
        let v = v.trim();
        (!v.is_empty()).then(|| v.to_string())
    };
    let (provider, model) = match spec.split_once(':') {
        Some((p, m)) => (non_empty(p), non_empty(m)),
        None => (non_empty(spec), None),
    };
    Ok((report, provider, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment_position_and_stored() {
        assert_eq!(
            parse_assignment("TOTAL_WORDS=1500").unwrap(),
            (Field::TotalWords, SetValue::Position(1500))
        );
        assert_eq!(
            parse_assignment("temperature=0.75").unwrap(),
            (Field::Temperature, SetValue::Stored(0.75))
        );
        assert!(parse_assignment("TOTAL_WORDS").is_err());
        assert!(parse_assignment("TOTAL_WORDS=lots").is_err());
        assert!(parse_assignment("NOPE=1").is_err());
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!(
            parse_provider("fpf=openai:gpt-4o").unwrap(),
            (ReportType::Fpf, Some("openai".into()), Some("gpt-4o".into()))
        );
        assert_eq!(
            parse_provider("ma=:o3").unwrap(),
            (ReportType::Ma, None, Some("o3".into()))
        );
        assert_eq!(
            parse_provider("dr=google").unwrap(),
            (ReportType::Dr, Some("google".into()), None)
        );
    }

    #[test]
    fn test_explicit_values_win_over_master() {
        let overrides = SettingsOverrides {
            master: Some(100),
            values: vec![(Field::MaxSections, SetValue::Position(2))],
            disable: vec![Toggle::Report(ReportType::Gptr)],
            ..Default::default()
        };
        let mut model = SettingsModel::default();
        overrides.apply(&mut model);

        assert_eq!(model.get(Field::MaxSections), 2);
        assert_eq!(model.get(Field::TotalWords), 5000);
        assert!(!model.enables.gptr);
    }

    #[test]
    fn test_is_empty() {
        assert!(SettingsOverrides::default().is_empty());
        let o = SettingsOverrides {
            master: Some(1),
            ..Default::default()
        };
        assert!(!o.is_empty());
    }
}
