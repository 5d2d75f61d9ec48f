//! Error types for shopbridge core.

/// Result type for shopbridge core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when validating payment input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Amount is not a non-negative decimal with at most two fraction digits.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Currency is not a three-letter uppercase code.
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),

    /// A required field was empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}
