use thiserror::Error;

/// Errors raised while constructing or parsing model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid production date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("station identifier must not be empty")]
    EmptyStation,
    #[error("operator identifier must not be empty")]
    EmptyOperator,
    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
