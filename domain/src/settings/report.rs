//! Report types, enable flags and the iteration-count derivation.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A report-generating subsystem driven by the generation script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// FilePromptForge
    Fpf,
    /// GPT Researcher
    Gptr,
    /// Deep research
    Dr,
    /// Multi-agent
    Ma,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Fpf,
        ReportType::Gptr,
        ReportType::Dr,
        ReportType::Ma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Fpf => "fpf",
            ReportType::Gptr => "gptr",
            ReportType::Dr => "dr",
            ReportType::Ma => "ma",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fpf" => Ok(ReportType::Fpf),
            "gptr" => Ok(ReportType::Gptr),
            "dr" => Ok(ReportType::Dr),
            "ma" => Ok(ReportType::Ma),
            other => Err(DomainError::UnknownToggle(other.to_string())),
        }
    }
}

/// Anything that can be switched on or off from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Report(ReportType),
    Evaluation,
    Pairwise,
}

impl Toggle {
    pub const ALL: [Toggle; 6] = [
        Toggle::Report(ReportType::Fpf),
        Toggle::Report(ReportType::Gptr),
        Toggle::Report(ReportType::Dr),
        Toggle::Report(ReportType::Ma),
        Toggle::Evaluation,
        Toggle::Pairwise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Report(r) => r.as_str(),
            Toggle::Evaluation => "evaluation",
            Toggle::Pairwise => "pairwise",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Toggle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "evaluation" => Ok(Toggle::Evaluation),
            "pairwise" => Ok(Toggle::Pairwise),
            other => other.parse().map(Toggle::Report),
        }
    }
}

/// Enable flags of the panel. Everything starts enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enables {
    pub fpf: bool,
    pub gptr: bool,
    pub dr: bool,
    pub ma: bool,
    pub evaluation: bool,
    pub pairwise: bool,
}

impl Default for Enables {
    fn default() -> Self {
        Self {
            fpf: true,
            gptr: true,
            dr: true,
            ma: true,
            evaluation: true,
            pairwise: true,
        }
    }
}

impl Enables {
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Report(ReportType::Fpf) => self.fpf,
            Toggle::Report(ReportType::Gptr) => self.gptr,
            Toggle::Report(ReportType::Dr) => self.dr,
            Toggle::Report(ReportType::Ma) => self.ma,
            Toggle::Evaluation => self.evaluation,
            Toggle::Pairwise => self.pairwise,
        }
    }

    pub fn set(&mut self, toggle: Toggle, enabled: bool) {
        let slot = match toggle {
            Toggle::Report(ReportType::Fpf) => &mut self.fpf,
            Toggle::Report(ReportType::Gptr) => &mut self.gptr,
            Toggle::Report(ReportType::Dr) => &mut self.dr,
            Toggle::Report(ReportType::Ma) => &mut self.ma,
            Toggle::Evaluation => &mut self.evaluation,
            Toggle::Pairwise => &mut self.pairwise,
        };
        *slot = enabled;
    }
}

/// Explicit iteration count for a subsystem.
///
/// Disabled is always `0`; enabled is always the iteration default active at
/// write time. Any previously customized count is discarded.
pub fn derive_iterations(enabled: Option<bool>, iterations_default: i64) -> i64 {
    match enabled {
        Some(false) => 0,
        _ => iterations_default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_iterations_disabled_is_zero() {
        assert_eq!(derive_iterations(Some(false), 3), 0);
    }

    #[test]
    fn test_derive_iterations_enabled_tracks_default() {
        assert_eq!(derive_iterations(Some(true), 3), 3);
        assert_eq!(derive_iterations(Some(true), 7), 7);
    }

    #[test]
    fn test_derive_iterations_unknown_flag_counts_as_enabled() {
        assert_eq!(derive_iterations(None, 2), 2);
    }

    #[test]
    fn test_toggle_parse() {
        assert_eq!("GPTR".parse::<Toggle>().unwrap(), Toggle::Report(ReportType::Gptr));
        assert_eq!("pairwise".parse::<Toggle>().unwrap(), Toggle::Pairwise);
        assert!("bogus".parse::<Toggle>().is_err());
    }

    #[test]
    fn test_enables_set_and_get() {
        let mut enables = Enables::default();
        enables.set(Toggle::Report(ReportType::Dr), false);
        assert!(!enables.get(Toggle::Report(ReportType::Dr)));
        assert!(enables.get(Toggle::Report(ReportType::Ma)));
    }
}
