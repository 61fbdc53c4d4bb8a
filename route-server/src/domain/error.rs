//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider and IO errors.

use super::InvalidCoordinate;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A coordinate failed validation
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Plan has no legs
    #[error("plan must have at least one leg")]
    EmptyPlan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyPlan;
        assert_eq!(err.to_string(), "plan must have at least one leg");

        let err: DomainError = Coordinate::new(95.0, 0.0).unwrap_err().into();
        assert!(err.to_string().contains("latitude"));
    }
}
