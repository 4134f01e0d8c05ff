use crate::diag::format_shape;
use thiserror::Error;

/// Errors raised by tensor operations.
///
/// Data errors (mismatched operand shapes, empty reductions) are ordinary failures the caller may handle.
/// Contract violations (bad coordinates, unsupported ranks) indicate a programming error; the panicking
/// accessors turn them into a fatal diagnostic, see [`TensorError::is_contract_violation`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TensorError {
    #[error("Cast Error: {0}")]
    CastError(String),

    #[error("Empty Tensor: {0} requires at least one element")]
    Empty(&'static str),

    #[error("Index Arity Mismatch: expected {expected} coordinates, got {actual}")]
    IndexArity { expected: usize, actual: usize },

    #[error("Index Out of Bounds: {0}")]
    IndexOutOfBounds(String),

    #[error("Invalid Shape: {0}")]
    InvalidShape(String),

    #[error("Shape Mismatch: {} vs {}", format_shape(.lhs), format_shape(.rhs))]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    #[error("Unsupported Rank: {op} is not defined for rank {rank}")]
    UnsupportedRank { op: &'static str, rank: usize },
}

impl TensorError {
    pub(crate) fn shape_mismatch(lhs: &[usize], rhs: &[usize]) -> Self {
        TensorError::ShapeMismatch {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Returns true when the error signals misuse of the API rather than bad data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            TensorError::IndexArity { .. }
                | TensorError::IndexOutOfBounds(_)
                | TensorError::UnsupportedRank { .. }
        )
    }
}
