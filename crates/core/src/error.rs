//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is terminal for the invocation that produced it: nothing in
/// the domain layer retries. Expected business outcomes (a duplicate role, an
/// unknown role offered for assignment) are *not* errors and are reported as
/// `Ok(false)` by the operations that define them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier or name was empty or malformed. Always caller-fixable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced user or role does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The acting principal lacks the privilege the operation requires.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A domain invariant would be (or was) violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Stable, lowercase kind name (useful as a structured log field).
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InvalidArgument(_) => "invalid_argument",
            DomainError::NotFound(_) => "not_found",
            DomainError::Unauthorized(_) => "unauthorized",
            DomainError::InvariantViolation(_) => "invariant_violation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = DomainError::invariant("cannot demote the last remaining admin");
        assert_eq!(
            err.to_string(),
            "invariant violated: cannot demote the last remaining admin"
        );
        assert_eq!(err.kind(), "invariant_violation");
    }

    #[test]
    fn constructors_map_to_variants() {
        assert!(matches!(DomainError::invalid_argument("x"), DomainError::InvalidArgument(_)));
        assert!(matches!(DomainError::not_found("x"), DomainError::NotFound(_)));
        assert!(matches!(DomainError::unauthorized("x"), DomainError::Unauthorized(_)));
    }
}
