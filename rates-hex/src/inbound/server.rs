//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use rates_types::ExchangeRateStore;

use super::handlers::{self, AppState};
use crate::RateService;
use crate::openapi::ApiDoc;
use utoipa::OpenApi;

/// HTTP Server for the Exchange Rate API.
pub struct HttpServer<S: ExchangeRateStore> {
    state: Arc<AppState<S>>,
}

impl<S: ExchangeRateStore> HttpServer<S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RateService<S>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/api/v1/check", get(handlers::check))
            .route("/api/v1/currencies/", get(handlers::list_currencies::<S>))
            .route(
                "/api/v1/exchange-rate/last",
                get(handlers::last_exchange_rate::<S>),
            )
            .route(
                "/api/v1/exchange-rate/all-from-date/{date}",
                get(handlers::all_rates_from_date::<S>),
            )
            .route(
                "/api/v1/exchange-rate/",
                post(handlers::insert_exchange_rate::<S>),
            )
            .route(
                "/api/v1/exchange-rate/range/",
                get(handlers::range_exchange_rate::<S>),
            )
            .with_state(self.state.clone());

        Router::new()
            .merge(api)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
