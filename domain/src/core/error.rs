//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown toggle: {0} (expected fpf, gptr, dr, ma, evaluation or pairwise)")]
    UnknownToggle(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let error = DomainError::InvalidRange { min: 5, max: 1 };
        assert_eq!(
            error.to_string(),
            "Invalid range: min 5 is greater than max 1"
        );
    }

    #[test]
    fn test_unknown_field_display() {
        let error = DomainError::UnknownField("volume".to_string());
        assert_eq!(error.to_string(), "Unknown field: volume");
    }
}
