//! Error types.
//!
//! Simulations never fail: they normalize their input and always produce a
//! result. The errors here cover the surfaces around them: parsing an
//! algorithm identifier and strict configuration checks.

use thiserror::Error;

/// An algorithm identifier did not match any variant of its family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {family} algorithm: '{name}'")]
pub struct ParseAlgorithmError {
    /// Algorithm family ("disk", "cpu" or "memory").
    pub family: &'static str,
    /// The rejected identifier.
    pub name: String,
}

impl ParseAlgorithmError {
    pub(crate) fn new(family: &'static str, name: impl Into<String>) -> Self {
        Self {
            family,
            name: name.into(),
        }
    }
}

/// Strict configuration check failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("time quantum must be at least 1, got {0}")]
    InvalidTimeQuantum(i64),

    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ParseAlgorithmError::new("disk", "ELEVATOR");
        assert_eq!(err.to_string(), "unknown disk algorithm: 'ELEVATOR'");
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            ConfigError::InvalidPageSize(0).to_string(),
            "page size must be at least 1, got 0"
        );
    }
}
