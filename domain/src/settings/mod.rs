//! The panel's controls and the rules that tie them to persisted settings.
//!
//! - [`field::Field`] — statically declared bounded controls
//! - [`report::Enables`] — report/evaluation enable flags
//! - [`model::SettingsModel`] — explicit state of every control
//! - [`overrides::SettingsOverrides`] — batched control changes

pub mod field;
pub mod model;
pub mod overrides;
pub mod report;
pub mod validation;
