//! Storage port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, mocks) implement this trait.

use chrono::{DateTime, Utc};

use crate::domain::{Currency, CurrencyPair, DateRange, ExchangeRate};
use crate::error::StoreError;

/// The storage abstraction consumed by the application core.
///
/// All queries are parameterized by internal integer currency identifiers;
/// resolution from codes happens before the store is called. Adapters must
/// translate driver-specific error conditions into [`StoreError`] tags - the
/// core never inspects database error codes.
#[async_trait::async_trait]
pub trait ExchangeRateStore: Send + Sync + 'static {
    /// Lists all known currencies. Order only needs to be stable within one
    /// load; the registry is built from a single call.
    async fn list_currencies(&self) -> Result<Vec<Currency>, StoreError>;

    /// Most recent record with a non-null rate for the exact pair.
    /// `StoreError::NotFound` when no such record exists.
    async fn latest_rate(&self, pair: CurrencyPair) -> Result<ExchangeRate, StoreError>;

    /// All exchange rates recorded on the given date, for ALL currency
    /// pairs - this query is intentionally not filtered by pair.
    async fn rates_on_date(&self, date: DateTime<Utc>) -> Result<Vec<ExchangeRate>, StoreError>;

    /// Rates for the pair within the window, ordered by date descending.
    /// `from` is inclusive, `till` exclusive.
    async fn rates_in_range(
        &self,
        pair: CurrencyPair,
        range: DateRange,
    ) -> Result<Vec<ExchangeRate>, StoreError>;

    /// Inserts a single rate record. The caller supplies the date already
    /// truncated to midnight UTC. A uniqueness violation on
    /// (source, destination, date) surfaces as `StoreError::DuplicateKey`.
    async fn insert_rate(
        &self,
        pair: CurrencyPair,
        date: DateTime<Utc>,
        rate: Option<f64>,
    ) -> Result<(), StoreError>;
}
