//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::domain::ExchangeRate;
use rates_types::dto::{ErrorResponse, LastRateParams, RangeParams};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/check",
    tag = "healthcheck",
    responses(
        (status = 200, description = "Service is up", body = inline(serde_json::Value), example = json!({"check": "ok"}))
    )
)]
async fn check() {}

/// List all known currency codes
#[utoipa::path(
    get,
    path = "/api/v1/currencies/",
    tag = "currencies",
    responses(
        (status = 200, description = "List of currency codes", body = Vec<String>)
    )
)]
async fn list_currencies() {}

/// Most recent non-null exchange rate for a currency pair
#[utoipa::path(
    get,
    path = "/api/v1/exchange-rate/last",
    tag = "exchange-rate",
    params(LastRateParams),
    responses(
        (status = 200, description = "Latest exchange rate", body = ExchangeRate),
        (status = 400, description = "Missing, equal or unknown currency codes", body = ErrorResponse),
        (status = 404, description = "No rate recorded for the pair", body = ErrorResponse)
    )
)]
async fn last_exchange_rate() {}

/// All exchange rates recorded on a date
#[utoipa::path(
    get,
    path = "/api/v1/exchange-rate/all-from-date/{date}",
    tag = "exchange-rate",
    params(
        ("date" = String, Path, description = "Date formatted YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "All rates on the date, across all pairs", body = Vec<ExchangeRate>),
        (status = 400, description = "Date is in an incorrect format", body = ErrorResponse)
    )
)]
async fn all_rates_from_date() {}

/// Insert a new exchange rate
#[utoipa::path(
    post,
    path = "/api/v1/exchange-rate/",
    tag = "exchange-rate",
    request_body = ExchangeRate,
    responses(
        (status = 202, description = "Rate accepted; date echoed truncated to midnight UTC", body = ExchangeRate),
        (status = 400, description = "Malformed body, unknown or equal currency codes", body = ErrorResponse),
        (status = 409, description = "Record exists for given currencies and date", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn insert_exchange_rate() {}

/// Exchange rates for a pair over a date window
#[utoipa::path(
    get,
    path = "/api/v1/exchange-rate/range/",
    tag = "exchange-rate",
    params(RangeParams),
    responses(
        (status = 200, description = "Rates within [from, till), date descending", body = Vec<ExchangeRate>),
        (status = 400, description = "Validation failure", body = ErrorResponse)
    )
)]
async fn range_exchange_rate() {}

/// OpenAPI documentation for the Exchange Rate API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rate Exchange API",
        version = "1.0.0",
        description = "Provides basic functionality for checking currency exchange rates.",
        license(name = "MIT"),
    ),
    paths(
        check,
        list_currencies,
        last_exchange_rate,
        all_rates_from_date,
        insert_exchange_rate,
        range_exchange_rate,
    ),
    components(
        schemas(
            ExchangeRate,
            ErrorResponse,
        )
    ),
    tags(
        (name = "healthcheck", description = "Health check endpoints"),
        (name = "currencies", description = "Currency code listing"),
        (name = "exchange-rate", description = "Exchange rate queries and inserts"),
    )
)]
pub struct ApiDoc;
