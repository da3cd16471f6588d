//! Unified error types for the domain layer
//!
//! Provides a common error type for parsing and validating rules data,
//! so adapters never have to fall back to `String` errors.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty reference name)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A raw record could not be turned into a typed entity
    #[error("Invalid {kind} record '{name}': {reason}")]
    InvalidRecord {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

impl DomainError {
    /// Creates a validation error for rule violations on lookups and keys.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format:
    /// - Unknown entity kind names
    /// - Malformed selectors or tags
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for EntityKind {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "spell" => Ok(Self::Spell),
    ///             _ => Err(DomainError::parse(format!("Unknown entity kind: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid record error
    pub fn invalid_record(
        kind: &'static str,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }
}
