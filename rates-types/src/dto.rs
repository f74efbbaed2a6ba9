//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─────────────────────────────────────────────────────────────────────────────
// Query parameter DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for the latest-rate endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LastRateParams {
    /// Source currency code (required)
    pub source: Option<String>,
    /// Destination currency code, defaults to USD
    pub destination: Option<String>,
}

/// Query parameters for the range endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeParams {
    /// Source currency code (required)
    pub source: Option<String>,
    /// Destination currency code, defaults to USD
    pub destination: Option<String>,
    /// From date, inclusive, formatted YYYY-MM-DD
    pub from: Option<String>,
    /// Till date, exclusive, formatted YYYY-MM-DD
    pub till: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Error response body shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "missing source currency")]
    pub error: String,
}
