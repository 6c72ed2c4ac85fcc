//! Statically declared bounded controls.
//!
//! Every slider of the panel is a [`Field`] variant bound at compile time to
//! its value-bag key, the artifact that persists it, its default range and
//! its default position. Nothing is looked up by widget name at runtime.

use crate::core::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// The settings artifact a field is persisted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Primary settings document (YAML).
    Primary,
    /// Secondary settings document of the prompt subsystem (YAML).
    Secondary,
    /// Source-text artifact edited by the literal patcher.
    Source,
    /// JSON task descriptor.
    Task,
}

impl Artifact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Artifact::Primary => "primary",
            Artifact::Secondary => "secondary",
            Artifact::Source => "source",
            Artifact::Task => "task",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a control position maps to the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Stored as the integer position.
    Integer,
    /// Position 0–100 stored as a two-decimal fraction.
    Percent,
}

/// Closed integer range of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    /// Build a range, rejecting `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn clamp(&self, value: i64) -> i64 {
        crate::scaling::clamp_int(value, self.min, self.max)
    }
}

/// Static metadata for a [`Field`].
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Value-bag key (and, for source fields, the quoted literal name).
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub artifact: Artifact,
    pub scale: Scale,
    pub range: Range,
    pub default: i64,
}

/// A bounded control of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    IterationsDefault,
    GroundingMaxResults,
    GoogleMaxTokens,
    FastTokenLimit,
    SmartTokenLimit,
    StrategicTokenLimit,
    BrowseChunkMaxLength,
    SummaryTokenLimit,
    Temperature,
    MaxSearchResultsPerQuery,
    TotalWords,
    MaxIterations,
    MaxSubtopics,
    DeepResearchBreadth,
    DeepResearchDepth,
    MaxSections,
}

const fn spec(
    key: &'static str,
    label: &'static str,
    artifact: Artifact,
    scale: Scale,
    min: i64,
    max: i64,
    default: i64,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        artifact,
        scale,
        range: Range { min, max },
        default,
    }
}

impl Field {
    /// All fields, in display order.
    pub const ALL: [Field; 16] = [
        Field::IterationsDefault,
        Field::GroundingMaxResults,
        Field::GoogleMaxTokens,
        Field::FastTokenLimit,
        Field::SmartTokenLimit,
        Field::StrategicTokenLimit,
        Field::BrowseChunkMaxLength,
        Field::SummaryTokenLimit,
        Field::Temperature,
        Field::MaxSearchResultsPerQuery,
        Field::TotalWords,
        Field::MaxIterations,
        Field::MaxSubtopics,
        Field::DeepResearchBreadth,
        Field::DeepResearchDepth,
        Field::MaxSections,
    ];

    pub const fn spec(&self) -> FieldSpec {
        use Artifact::*;
        use Scale::*;
        match self {
            Field::IterationsDefault => spec("iterations_default", "Iterations", Primary, Integer, 1, 10, 1),
            Field::GroundingMaxResults => spec("fpf.grounding.max_results", "Grounding max results", Secondary, Integer, 1, 20, 5),
            Field::GoogleMaxTokens => spec("fpf.google.max_tokens", "Google max tokens", Secondary, Integer, 256, 8192, 1500),
            Field::FastTokenLimit => spec("FAST_TOKEN_LIMIT", "Fast token limit", Source, Integer, 500, 10000, 3000),
            Field::SmartTokenLimit => spec("SMART_TOKEN_LIMIT", "Smart token limit", Source, Integer, 1000, 20000, 6000),
            Field::StrategicTokenLimit => spec("STRATEGIC_TOKEN_LIMIT", "Strategic token limit", Source, Integer, 1000, 20000, 4000),
            Field::BrowseChunkMaxLength => spec("BROWSE_CHUNK_MAX_LENGTH", "Browse chunk max length", Source, Integer, 1000, 20000, 8192),
            Field::SummaryTokenLimit => spec("SUMMARY_TOKEN_LIMIT", "Summary token limit", Source, Integer, 100, 2000, 700),
            Field::Temperature => spec("TEMPERATURE", "Temperature", Source, Percent, 0, 100, 40),
            Field::MaxSearchResultsPerQuery => spec("MAX_SEARCH_RESULTS_PER_QUERY", "Max search results per query", Source, Integer, 1, 20, 5),
            Field::TotalWords => spec("TOTAL_WORDS", "Total words", Source, Integer, 100, 5000, 1200),
            Field::MaxIterations => spec("MAX_ITERATIONS", "Max iterations", Source, Integer, 1, 10, 3),
            Field::MaxSubtopics => spec("MAX_SUBTOPICS", "Max subtopics", Source, Integer, 1, 10, 3),
            Field::DeepResearchBreadth => spec("DEEP_RESEARCH_BREADTH", "Deep research breadth", Source, Integer, 1, 10, 4),
            Field::DeepResearchDepth => spec("DEEP_RESEARCH_DEPTH", "Deep research depth", Source, Integer, 1, 10, 2),
            Field::MaxSections => spec("ma.max_sections", "Max sections", Task, Integer, 1, 10, 1),
        }
    }

    pub fn key(&self) -> &'static str {
        self.spec().key
    }

    /// Fields persisted to the given artifact, in display order.
    pub fn for_artifact(artifact: Artifact) -> impl Iterator<Item = Field> {
        Self::ALL
            .into_iter()
            .filter(move |f| f.spec().artifact == artifact)
    }

    /// Look up a field by value-bag key.
    pub fn from_key(key: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    /// Accepts the value-bag key, case-insensitively (`total_words`, `TOTAL_WORDS`,
    /// `fpf.google.max_tokens`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), Field::ALL.len());
    }

    #[test]
    fn test_defaults_lie_inside_ranges() {
        for field in Field::ALL {
            let spec = field.spec();
            assert!(spec.range.min <= spec.range.max, "{}", field);
            assert_eq!(spec.range.clamp(spec.default), spec.default, "{}", field);
        }
    }

    #[test]
    fn test_source_fields() {
        let source: Vec<_> = Field::for_artifact(Artifact::Source).collect();
        assert_eq!(source.len(), 12);
        assert!(source.contains(&Field::Temperature));
        assert_eq!(Field::Temperature.spec().scale, Scale::Percent);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("total_words".parse::<Field>().unwrap(), Field::TotalWords);
        assert_eq!(
            "fpf.google.max_tokens".parse::<Field>().unwrap(),
            Field::GoogleMaxTokens
        );
        assert!("volume".parse::<Field>().is_err());
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(Range::new(5, 1).is_err());
        assert!(Range::new(1, 1).is_ok());
    }
}
