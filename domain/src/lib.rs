//! Domain layer for knobpanel
//!
//! This crate contains the settings model, value types and the pure rules
//! that connect control positions to persisted configuration. It performs
//! no I/O.
//!
//! # Core Concepts
//!
//! - **ValueBag**: transient flat snapshot of every setting, rebuilt on each
//!   write cycle and consumed by every store
//! - **SettingsModel**: explicit state of every control, passed by reference
//!   into the use cases that read or mutate it
//! - **Master quality**: one percentage that proportionally sets every
//!   bounded field within its own range

pub mod core;
pub mod run;
pub mod scaling;
pub mod settings;
pub mod value;

// Re-export commonly used types
pub use crate::core::error::DomainError;
pub use run::outcome::{RunKind, RunOutcome, SPAWN_FAILURE_EXIT_CODE};
pub use settings::{
    field::{Artifact, Field, FieldSpec, Range, Scale},
    model::{FieldRanges, PathSettings, ProviderSelection, SettingsModel, MASTER_RANGE},
    overrides::{SetValue, SettingsOverrides, parse_assignment, parse_provider},
    report::{Enables, ReportType, Toggle, derive_iterations},
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use value::{
    config_value::{ConfigDocument, ConfigValue},
    document::DocumentPath,
    value_bag::ValueBag,
};
