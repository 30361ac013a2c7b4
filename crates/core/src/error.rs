//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers construction-time failures (validation) and broken invariants.
/// Expected lending outcomes such as "already borrowed" are modelled by the
/// lending crate, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an empty title).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

/// Reject blank (empty or whitespace-only) text fields.
pub fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        let err = ensure_not_blank("title", "   ").unwrap_err();
        assert_eq!(err, DomainError::Validation("title cannot be empty".to_string()));
        assert_eq!(err.to_string(), "validation failed: title cannot be empty");
    }

    #[test]
    fn non_blank_values_pass() {
        assert!(ensure_not_blank("name", "Sofia").is_ok());
    }
}
