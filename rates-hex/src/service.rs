//! Exchange-Rate Application Service
//!
//! Orchestrates request resolution and storage access through the store port.
//! Contains NO infrastructure logic - validation runs first, so invalid input
//! never reaches storage.

use tokio::sync::OnceCell;

use rates_types::{
    AppError, CurrencyRegistry, ExchangeRate, ExchangeRateStore, domain::truncate_to_day, resolver,
};

/// Application service for exchange-rate operations.
///
/// Generic over `S: ExchangeRateStore` - the adapter is injected at compile
/// time. The currency registry is owned here and loaded from the store at
/// most once per service instance; the binary holds a single instance, which
/// gives the registry its process-lifetime semantics while tests construct a
/// fresh service per case.
pub struct RateService<S: ExchangeRateStore> {
    store: S,
    registry: OnceCell<CurrencyRegistry>,
}

impl<S: ExchangeRateStore> RateService<S> {
    /// Creates a new service with the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The code-to-identifier registry, loaded on first access.
    ///
    /// Concurrent first-time callers race to trigger exactly one load and all
    /// block until it completes; nobody observes a partial mapping. A failed
    /// load yields the empty registry, so every code resolves as unknown
    /// until the process restarts - fail closed rather than treating all
    /// input as valid while metadata is unavailable.
    async fn registry(&self) -> &CurrencyRegistry {
        self.registry
            .get_or_init(|| async {
                match self.store.list_currencies().await {
                    Ok(currencies) => CurrencyRegistry::from_currencies(currencies),
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            "failed to load currency registry; all codes will resolve as unknown until restart"
                        );
                        CurrencyRegistry::empty()
                    }
                }
            })
            .await
    }

    /// All known currency codes.
    pub async fn currency_codes(&self) -> Vec<String> {
        self.registry().await.codes()
    }

    /// Most recent non-null rate for the resolved pair.
    pub async fn last_rate(
        &self,
        source: Option<&str>,
        destination: Option<&str>,
    ) -> Result<ExchangeRate, AppError> {
        let pair = resolver::resolve_pair(source, destination, self.registry().await)?;
        Ok(self.store.latest_rate(pair).await?)
    }

    /// All rates recorded on the given `YYYY-MM-DD` date, for all pairs.
    pub async fn rates_on_date(&self, raw_date: &str) -> Result<Vec<ExchangeRate>, AppError> {
        let date = resolver::resolve_date(raw_date)?;
        Ok(self.store.rates_on_date(date).await?)
    }

    /// Rates for the resolved pair within [`from`, `till`).
    pub async fn rates_in_range(
        &self,
        source: Option<&str>,
        destination: Option<&str>,
        raw_from: &str,
        raw_till: &str,
    ) -> Result<Vec<ExchangeRate>, AppError> {
        let pair = resolver::resolve_pair(source, destination, self.registry().await)?;
        let range = resolver::resolve_range(raw_from, raw_till)?;
        Ok(self.store.rates_in_range(pair, range).await?)
    }

    /// Inserts a new rate record and echoes it with the truncated date.
    pub async fn insert_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, AppError> {
        let pair =
            resolver::resolve_insert_pair(&rate.source, &rate.destination, self.registry().await)?;

        // One rate per calendar day: drop the time-of-day component
        let date = truncate_to_day(rate.date);
        self.store.insert_rate(pair, date, rate.rate).await?;

        Ok(ExchangeRate { date, ..rate })
    }
}
