//! Write Configs use case.
//!
//! Persists a [`ValueBag`] into all four artifacts. Each artifact is a
//! read-modify-write of the whole file, attempted independently: a failure
//! on one does not stop the others, and the first failure (in artifact
//! order) is returned once every artifact has been attempted.

use crate::ports::document_store::StoreError;
use crate::use_cases::shared::ArtifactStores;
use knobpanel_domain::{
    Artifact, ConfigValue, DocumentPath, Field, ReportType, ValueBag, derive_iterations,
    settings::model::{INPUT_FOLDER, INSTRUCTIONS_FILE, OUTPUT_FOLDER},
};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

const DEFAULT_ITERATIONS: i64 = 1;

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactReport {
    pub artifact: Artifact,
    pub path: PathBuf,
    /// Keys written, with the value written.
    pub written: Vec<(String, ConfigValue)>,
    /// Keys that could not be located (source artifact only).
    pub missing: Vec<String>,
}

/// Per-artifact results of one write cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteSummary {
    pub reports: Vec<ArtifactReport>,
}

/// The first artifact that failed, plus everything that was written anyway.
#[derive(Error, Debug)]
#[error("Failed to write {artifact} settings: {source}")]
pub struct WriteConfigsError {
    pub artifact: Artifact,
    #[source]
    pub source: StoreError,
    /// Artifacts that were written successfully.
    pub summary: WriteSummary,
    /// Failures after the first one.
    pub others: Vec<(Artifact, StoreError)>,
}

/// Use case for writing a value bag to every artifact.
#[derive(Clone)]
pub struct WriteConfigsUseCase {
    stores: ArtifactStores,
}

impl WriteConfigsUseCase {
    pub fn new(stores: ArtifactStores) -> Self {
        Self { stores }
    }

    pub fn execute(&self, bag: &ValueBag) -> Result<WriteSummary, WriteConfigsError> {
        let attempts = [
            (Artifact::Primary, self.write_primary(bag)),
            (Artifact::Secondary, self.write_secondary(bag)),
            (Artifact::Source, self.write_source(bag)),
            (Artifact::Task, self.write_task(bag)),
        ];

        let mut summary = WriteSummary::default();
        let mut failures = Vec::new();
        for (artifact, result) in attempts {
            match result {
                Ok(report) => {
                    info!(
                        "Wrote {} key(s) to {}",
                        report.written.len(),
                        report.path.display()
                    );
                    for (key, value) in &report.written {
                        debug!("  - {} = {} -> {}", key, value, report.path.display());
                    }
                    summary.reports.push(report);
                }
                Err(e) => {
                    warn!("Failed to write {} settings: {}", artifact, e);
                    failures.push((artifact, e));
                }
            }
        }

        let mut failures = failures.into_iter();
        match failures.next() {
            None => Ok(summary),
            Some((artifact, source)) => Err(WriteConfigsError {
                artifact,
                source,
                summary,
                others: failures.collect(),
            }),
        }
    }

    /// Paths, `iterations_default`, and per-report iteration counts.
    ///
    /// Provider/model selections are never written here.
    fn write_primary(&self, bag: &ValueBag) -> Result<ArtifactReport, StoreError> {
        let store = &self.stores.primary;
        let mut doc = store.read()?;
        let mut written = Vec::new();

        for key in [INPUT_FOLDER, OUTPUT_FOLDER, INSTRUCTIONS_FILE] {
            if let Some(value) = bag.get_str(key) {
                doc.insert(key.to_string(), ConfigValue::from(value));
                written.push((key.to_string(), ConfigValue::from(value)));
            }
        }

        let iterations_default = bag
            .get_i64(Field::IterationsDefault.key())
            .unwrap_or_else(|| doc.get_i64_or("iterations_default", DEFAULT_ITERATIONS));
        doc.insert(
            "iterations_default".to_string(),
            ConfigValue::Int(iterations_default),
        );
        written.push((
            "iterations_default".to_string(),
            ConfigValue::Int(iterations_default),
        ));

        let iterations = doc.ensure_map("iterations");
        for report in ReportType::ALL {
            let enabled = bag.get_bool(&format!("enable.{}", report));
            let count = derive_iterations(enabled, iterations_default);
            iterations.insert(report.to_string(), ConfigValue::Int(count));
            written.push((format!("iterations.{}", report), ConfigValue::Int(count)));
        }

        store.write(&doc)?;
        Ok(ArtifactReport {
            artifact: Artifact::Primary,
            path: store.path().to_path_buf(),
            written,
            missing: Vec::new(),
        })
    }

    /// Grounding and Google limits. Zero or absent values leave the file's value alone.
    fn write_secondary(&self, bag: &ValueBag) -> Result<ArtifactReport, StoreError> {
        let store = &self.stores.secondary;
        let mut doc = store.read()?;
        let mut written = Vec::new();

        doc.ensure_map("grounding");
        doc.ensure_map("google");

        for field in Field::for_artifact(Artifact::Secondary) {
            let Some(value) = bag.get_i64(field.key()).filter(|v| *v != 0) else {
                continue;
            };
            let path = field.key().trim_start_matches("fpf.");
            doc.set_path(path, ConfigValue::Int(value));
            written.push((path.to_string(), ConfigValue::Int(value)));
        }

        store.write(&doc)?;
        Ok(ArtifactReport {
            artifact: Artifact::Secondary,
            path: store.path().to_path_buf(),
            written,
            missing: Vec::new(),
        })
    }

    /// Numeric literals of the source artifact, patched in place.
    fn write_source(&self, bag: &ValueBag) -> Result<ArtifactReport, StoreError> {
        let store = &self.stores.source;
        let values: Vec<(String, f64)> = Field::for_artifact(Artifact::Source)
            .filter_map(|f| bag.get_f64(f.key()).map(|v| (f.key().to_string(), v)))
            .collect();

        let report = store.write(&values)?;
        if !report.missing.is_empty() {
            warn!(
                "Some keys were not found for update in {}: {}",
                store.path().display(),
                report.missing.join(", ")
            );
        }

        let written = report
            .updated
            .iter()
            .filter_map(|key| bag.get(key).map(|v| (key.clone(), v.clone())))
            .collect();
        Ok(ArtifactReport {
            artifact: Artifact::Source,
            path: store.path().to_path_buf(),
            written,
            missing: report.missing,
        })
    }

    /// `max_sections` of the task descriptor.
    fn write_task(&self, bag: &ValueBag) -> Result<ArtifactReport, StoreError> {
        let store = &self.stores.task;
        let mut doc = store.read()?;
        let mut written = Vec::new();

        if let Some(sections) = bag.get_i64(Field::MaxSections.key()) {
            doc.insert("max_sections".to_string(), ConfigValue::Int(sections));
            written.push(("max_sections".to_string(), ConfigValue::Int(sections)));
        }

        store.write(&doc)?;
        Ok(ArtifactReport {
            artifact: Artifact::Task,
            path: store.path().to_path_buf(),
            written,
            missing: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::shared::testing::{MemoryDocumentStore, MemoryLiteralStore, doc};
    use knobpanel_domain::{ConfigDocument, SettingsModel, Toggle};
    use std::sync::Arc;

    struct Fixture {
        primary: Arc<MemoryDocumentStore>,
        secondary: Arc<MemoryDocumentStore>,
        source: Arc<MemoryLiteralStore>,
        task: Arc<MemoryDocumentStore>,
    }

    impl Fixture {
        fn new(primary: MemoryDocumentStore) -> Self {
            Self {
                primary: Arc::new(primary),
                secondary: Arc::new(MemoryDocumentStore::new("fpf.yaml", ConfigDocument::new())),
                source: Arc::new(MemoryLiteralStore::new(
                    "default.py",
                    &[("TEMPERATURE", 0.4), ("TOTAL_WORDS", 1000.0)],
                )),
                task: Arc::new(MemoryDocumentStore::new(
                    "task.json",
                    doc(&[("query", "q".into()), ("max_sections", ConfigValue::Int(3))]),
                )),
            }
        }

        fn use_case(&self) -> WriteConfigsUseCase {
            WriteConfigsUseCase::new(ArtifactStores {
                primary: self.primary.clone(),
                secondary: self.secondary.clone(),
                source: self.source.clone(),
                task: self.task.clone(),
            })
        }
    }

    #[test]
    fn test_writes_every_artifact() {
        let fixture = Fixture::new(MemoryDocumentStore::new(
            "config.yaml",
            doc(&[("models", "keep-me".into())]),
        ));
        let mut model = SettingsModel::default();
        model.set(Field::IterationsDefault, 2);
        model.set(Field::Temperature, 75);
        model.set(Field::MaxSections, 6);
        model.set_enabled(Toggle::Report(ReportType::Dr), false);

        let summary = fixture.use_case().execute(&model.gather()).unwrap();
        assert_eq!(summary.reports.len(), 4);

        let primary = fixture.primary.snapshot();
        assert_eq!(primary.get_str("models"), Some("keep-me"));
        assert_eq!(primary.get_i64_or("iterations_default", 0), 2);
        assert_eq!(primary.get_i64_or("iterations.fpf", -1), 2);
        assert_eq!(primary.get_i64_or("iterations.dr", -1), 0);
        assert!(primary.get_path("providers").is_none());

        let secondary = fixture.secondary.snapshot();
        assert_eq!(secondary.get_i64_or("grounding.max_results", 0), 5);
        assert_eq!(secondary.get_i64_or("google.max_tokens", 0), 1500);

        let source = fixture.source.values.lock().unwrap().clone();
        assert_eq!(source["TEMPERATURE"], 0.75);
        assert_eq!(source["TOTAL_WORDS"], 1200.0);

        let task = fixture.task.snapshot();
        assert_eq!(task.get_i64_or("max_sections", 0), 6);
        assert_eq!(task.get_str("query"), Some("q"));
    }

    #[test]
    fn test_enable_overwrites_customized_iteration_count() {
        let fixture = Fixture::new(MemoryDocumentStore::new(
            "config.yaml",
            doc(&[
                ("iterations_default", ConfigValue::Int(3)),
                ("iterations.gptr", ConfigValue::Int(9)),
            ]),
        ));
        let mut model = SettingsModel::default();
        model.set(Field::IterationsDefault, 3);

        fixture.use_case().execute(&model.gather()).unwrap();
        assert_eq!(fixture.primary.snapshot().get_i64_or("iterations.gptr", -1), 3);
    }

    #[test]
    fn test_missing_source_keys_are_reported_not_fatal() {
        let fixture = Fixture::new(MemoryDocumentStore::new("config.yaml", ConfigDocument::new()));
        let summary = fixture
            .use_case()
            .execute(&SettingsModel::default().gather())
            .unwrap();

        let source = summary
            .reports
            .iter()
            .find(|r| r.artifact == Artifact::Source)
            .unwrap();
        assert_eq!(source.written.len(), 2);
        assert_eq!(source.missing.len(), 10);
        assert!(source.missing.contains(&"MAX_SUBTOPICS".to_string()));
    }

    #[test]
    fn test_failure_on_one_artifact_does_not_stop_the_others() {
        let fixture = Fixture::new(MemoryDocumentStore::failing("config.yaml"));
        let err = fixture
            .use_case()
            .execute(&SettingsModel::default().gather())
            .unwrap_err();

        assert_eq!(err.artifact, Artifact::Primary);
        assert!(err.others.is_empty());
        assert_eq!(err.summary.reports.len(), 3);
        assert_eq!(fixture.task.write_count(), 1);
        assert_eq!(fixture.secondary.write_count(), 1);
    }

    #[test]
    fn test_first_error_in_artifact_order() {
        let mut fixture = Fixture::new(MemoryDocumentStore::failing("config.yaml"));
        fixture.source = Arc::new(MemoryLiteralStore::new("default.py", &[]));

        let err = fixture
            .use_case()
            .execute(&SettingsModel::default().gather())
            .unwrap_err();
        assert_eq!(err.artifact, Artifact::Primary);
        assert_eq!(err.others.len(), 1);
        assert_eq!(err.others[0].0, Artifact::Source);
    }
}
