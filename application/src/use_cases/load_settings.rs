//! Load Settings use case.
//!
//! Reads all four artifacts and positions every control of a
//! [`SettingsModel`] accordingly. Each artifact is read independently; a
//! failure on one is a warning and leaves the affected controls at their
//! current (default) positions.

use crate::use_cases::shared::ArtifactStores;
use knobpanel_domain::{
    Artifact, ConfigDocument, DocumentPath, Field, PathSettings, ReportType, SettingsModel, Toggle,
};
use tracing::{debug, warn};

/// Fallbacks used when a key is missing from its artifact.
const DEFAULT_ITERATIONS: i64 = 1;
const DEFAULT_GROUNDING_MAX_RESULTS: i64 = 5;
const DEFAULT_GOOGLE_MAX_TOKENS: i64 = 1500;
const DEFAULT_MAX_SECTIONS: i64 = 1;

/// Non-fatal problems found while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub warnings: Vec<String>,
}

impl LoadReport {
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Use case for positioning the controls from the persisted artifacts.
pub struct LoadSettingsUseCase {
    stores: ArtifactStores,
}

impl LoadSettingsUseCase {
    pub fn new(stores: ArtifactStores) -> Self {
        Self { stores }
    }

    /// Load every artifact into `model`. Never fails.
    pub fn execute(&self, model: &mut SettingsModel) -> LoadReport {
        let mut report = LoadReport::default();
        self.load_primary(model, &mut report);
        self.load_secondary(model, &mut report);
        self.load_source(model, &mut report);
        self.load_task(model, &mut report);
        report
    }

    fn load_primary(&self, model: &mut SettingsModel, report: &mut LoadReport) {
        let doc = match self.stores.primary.read() {
            Ok(doc) => doc,
            Err(e) => return report.warn(format!("Could not load {}: {}", Artifact::Primary, e)),
        };

        let iterations = doc.get_i64_or("iterations_default", DEFAULT_ITERATIONS);
        model.set(Field::IterationsDefault, iterations);

        model.paths.merge(&PathSettings {
            input_folder: doc.get_str("input_folder").map(str::to_string),
            output_folder: doc.get_str("output_folder").map(str::to_string),
            instructions_file: doc.get_str("instructions_file").map(str::to_string),
        });

        for report_type in ReportType::ALL {
            let key = format!("iterations.{}", report_type);
            if let Some(count) = doc.get_path(&key).and_then(|v| v.as_i64()) {
                model.set_enabled(Toggle::Report(report_type), count != 0);
            }
        }

        debug!("Loaded primary settings from {}", self.stores.primary.path().display());
    }

    fn load_secondary(&self, model: &mut SettingsModel, report: &mut LoadReport) {
        let doc = match self.stores.secondary.read() {
            Ok(doc) => doc,
            Err(e) => {
                return report.warn(format!("Could not load {}: {}", Artifact::Secondary, e));
            }
        };

        model.set(
            Field::GroundingMaxResults,
            doc.get_i64_or("grounding.max_results", DEFAULT_GROUNDING_MAX_RESULTS),
        );
        model.set(
            Field::GoogleMaxTokens,
            doc.get_i64_or("google.max_tokens", DEFAULT_GOOGLE_MAX_TOKENS),
        );

        debug!("Loaded secondary settings from {}", self.stores.secondary.path().display());
    }

    fn load_source(&self, model: &mut SettingsModel, report: &mut LoadReport) {
        let values = match self.stores.source.read() {
            Ok(values) => values,
            Err(e) => return report.warn(format!("Could not load {}: {}", Artifact::Source, e)),
        };

        for field in Field::for_artifact(Artifact::Source) {
            // Keys absent from the source keep their current position
            if let Some(stored) = values.get(field.key()) {
                model.set_stored(field, *stored);
            }
        }

        debug!(
            "Loaded {} literal(s) from {}",
            values.len(),
            self.stores.source.path().display()
        );
    }

    fn load_task(&self, model: &mut SettingsModel, report: &mut LoadReport) {
        let doc: ConfigDocument = match self.stores.task.read() {
            Ok(doc) => doc,
            Err(e) => return report.warn(format!("Could not load {}: {}", Artifact::Task, e)),
        };

        model.set(
            Field::MaxSections,
            doc.get_i64_or("max_sections", DEFAULT_MAX_SECTIONS),
        );
    }
}
