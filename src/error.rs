//! Error types for fraction construction and arithmetic.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FractionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    /// Text that is not one to three slash separated integers
    #[error("invalid fraction literal {input:?}: {reason}")]
    Format { input: String, reason: String },

    #[error("denominator must not be zero")]
    ZeroDenominator,

    #[error("division by zero")]
    DivisionByZero,

    /// A value left the range of the fixed width magnitudes
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl FractionError {
    pub fn format(input: &str, reason: impl Into<String>) -> Self {
        FractionError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
