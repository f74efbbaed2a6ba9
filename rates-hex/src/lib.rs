//! # Rates Hex
//!
//! Application service layer and HTTP adapter for the exchange-rate service.
//!
//! ## Architecture
//!
//! - `service` - Application service (resolution, registry, orchestration)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - Interactive API documentation
//!
//! The service is generic over `S: ExchangeRateStore`, allowing
//! different storage implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::RateService;
