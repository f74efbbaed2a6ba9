//! Error types for the exchange-rate service.

use std::fmt;

/// Which side of a currency pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyRole {
    Source,
    Destination,
}

impl fmt::Display for CurrencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyRole::Source => write!(f, "source"),
            CurrencyRole::Destination => write!(f, "destination"),
        }
    }
}

/// Request-validation errors (client input violations).
///
/// All variants map to HTTP 400; validation runs before any storage call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing {0} currency")]
    MissingField(&'static str),

    #[error("source and destination currency are the same")]
    SameCurrency,

    #[error("unknown {code} {role} currency")]
    UnknownCurrency { code: String, role: CurrencyRole },

    #[error("{field} {value} is in incorrect format")]
    InvalidDate { field: &'static str, value: String },

    #[error("from must be before till")]
    RangeOrder,
}

/// Storage-level outcomes (data access failures).
///
/// Adapters translate driver-specific error internals into these tags so the
/// core never inspects database error codes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate key violation")]
    DuplicateKey,

    #[error("database error: {0}")]
    Database(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("exchange rate not found".into()),
            StoreError::DuplicateKey => {
                AppError::Conflict("Record exists for given currencies and date".into())
            }
            StoreError::Database(detail) => AppError::Internal(detail),
        }
    }
}
