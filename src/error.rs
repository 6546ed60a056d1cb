use thiserror::Error;

/// Errors raised by the evaluation, specialization and polynomial APIs.
///
/// Numeric degeneracies (division by zero, `log` of a negative number, ...)
/// are never reported here: they propagate as IEEE infinities and NaNs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgebraError {
    /// A named parameter was read during evaluation but has no binding
    #[error("no value has been assigned to parameter '{name}'")]
    UnboundParameter { name: String },

    /// A node shape was reached where a ray polynomial was expected
    #[error("unsupported specialization: {0}")]
    UnsupportedSpecialization(String),

    /// A polynomial needs at least one coefficient
    #[error("a polynomial needs at least one coefficient")]
    EmptyPolynomial,

    /// Power nodes only carry non-negative integer exponents
    #[error("negative exponent {0} is not allowed in a polynomial power")]
    NegativeExponent(i64),

    /// Expression nesting is deeper than the configured limit
    #[error("expression nesting depth {depth} exceeds maximum limit {limit}")]
    MaxDepthExceeded { depth: usize, limit: usize },
}

impl AlgebraError {
    pub(crate) fn unbound(name: impl Into<String>) -> Self {
        AlgebraError::UnboundParameter { name: name.into() }
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        AlgebraError::UnsupportedSpecialization(msg.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AlgebraError>;
