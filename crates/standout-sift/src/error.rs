//! Error types for the sift crate.

use thiserror::Error;

/// Errors that can occur when building or evaluating filters, or when
/// stepping a chain wrapper.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Operator name is not in the registry, or a scalar filter was given
    /// the wrong number of operator keywords.
    #[error("unknown operator '{name}'")]
    UnknownOperator { name: String },

    /// Operand has the wrong shape for its operator.
    #[error("invalid operand for '{op}': {reason}")]
    InvalidOperand { op: &'static str, reason: String },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The reserved missing-key entry held something other than a bool or null.
    #[error("invalid missing-key policy value: {value}")]
    InvalidPolicy { value: String },

    /// A criterion was built from a bundle with no field tests.
    #[error("criterion has no field tests")]
    EmptyCriterion,

    /// A record filter was built without any criterion.
    #[error("record filter has no criteria")]
    EmptyFilter,

    /// A tested field is absent and the criterion asked for strict lookups.
    #[error("missing key '{field}'")]
    MissingKey { field: String },

    /// The expected operand could not be converted to the field's type.
    #[error("cannot coerce {value} to {target}")]
    Coercion { value: String, target: &'static str },

    /// The operator does not apply to the field value's type.
    #[error("operator '{op}' cannot test {actual} values")]
    TypeMismatch { op: &'static str, actual: &'static str },

    /// `backward()` was called with only the initial value left.
    #[error("history is already at its initial value")]
    HistoryExhausted,
}

impl SiftError {
    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        SiftError::UnknownOperator { name: name.into() }
    }

    /// Returns `true` for errors raised while building a filter, as opposed
    /// to errors raised while evaluating one.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            SiftError::UnknownOperator { .. }
                | SiftError::InvalidOperand { .. }
                | SiftError::InvalidRegex(_)
                | SiftError::InvalidPolicy { .. }
                | SiftError::EmptyCriterion
                | SiftError::EmptyFilter
        )
    }
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
