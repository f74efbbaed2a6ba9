//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use rates_types::{AppError, ExchangeRate, ExchangeRateStore, LastRateParams, RangeParams};

use crate::RateService;

/// Application state shared across handlers.
pub struct AppState<S: ExchangeRateStore> {
    pub service: RateService<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(detail) => {
                // Storage detail is logged server-side, never echoed to the caller
                tracing::error!(detail = %detail, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn check() -> impl IntoResponse {
    Json(serde_json::json!({ "check": "ok" }))
}

/// List all known currency codes.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<S: ExchangeRateStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    let codes = state.service.currency_codes().await;
    Json(codes)
}

/// Most recent non-null rate for the source/destination pair.
#[tracing::instrument(skip(state))]
pub async fn last_exchange_rate<S: ExchangeRateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<LastRateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state
        .service
        .last_rate(params.source.as_deref(), params.destination.as_deref())
        .await?;
    Ok(Json(rate))
}

/// All rates recorded on the given date, across all currency pairs.
#[tracing::instrument(skip(state), fields(date = %date))]
pub async fn all_rates_from_date<S: ExchangeRateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state.service.rates_on_date(&date).await?;
    Ok(Json(rates))
}

/// Rates for a pair over a half-open date window.
#[tracing::instrument(skip(state))]
pub async fn range_exchange_rate<S: ExchangeRateStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state
        .service
        .rates_in_range(
            params.source.as_deref(),
            params.destination.as_deref(),
            params.from.as_deref().unwrap_or(""),
            params.till.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(Json(rates))
}

/// Insert a new exchange-rate record.
///
/// The body is extracted as a `Result` so a malformed payload goes through
/// the same `{"error": ...}` shape as every other client error instead of
/// axum's plain-text rejection.
#[tracing::instrument(skip(state, body))]
pub async fn insert_exchange_rate<S: ExchangeRateStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<ExchangeRate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(rate) = body.map_err(|rejection| {
        AppError::BadRequest(format!(
            "incorrect exchange rate in body: {}",
            rejection.body_text()
        ))
    })?;

    let inserted = state.service.insert_rate(rate).await?;
    Ok((StatusCode::ACCEPTED, Json(inserted)))
}
