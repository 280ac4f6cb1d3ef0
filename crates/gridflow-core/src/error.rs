//! Errors raised while building and validating networks.
//!
//! Every mutation on [`crate::Network`] returns [`GridResult`], so a
//! network that was assembled without an error satisfies the structural
//! invariants (known endpoints, no self-loops, no duplicate arcs, finite
//! non-negative capacities).

use thiserror::Error;

/// Error type for network construction and validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Structural defects: unknown node ids, self-loops, duplicate arcs,
    /// or terminals that are not part of the node set.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid element data, such as a negative or non-finite capacity.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for Results using GridError.
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridError::Network("duplicate arc A -> B".into());
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("duplicate arc A -> B"));

        let err = GridError::Validation("arc A -> B has invalid capacity -1".into());
        assert!(err.to_string().contains("Validation error"));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> GridResult<()> {
            Err(GridError::Validation("bad capacity".into()))
        }

        fn outer() -> GridResult<i32> {
            inner()?;
            Ok(42)
        }

        assert!(matches!(outer(), Err(GridError::Validation(_))));
    }
}
