//! # Rates Types
//!
//! Domain types and port traits for the exchange-rate query service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Currency, CurrencyRegistry, ExchangeRate)
//! - `resolver/` - Turns raw request input into validated, typed values
//! - `ports/` - Trait definitions that storage adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Validation, storage and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod resolver;

// Re-export commonly used types
pub use domain::{Currency, CurrencyPair, CurrencyRegistry, DateRange, ExchangeRate};
pub use dto::*;
pub use error::{AppError, CurrencyRole, StoreError, ValidationError};
pub use ports::ExchangeRateStore;
