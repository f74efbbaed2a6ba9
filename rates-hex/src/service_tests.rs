//! RateService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    use rates_types::{
        AppError, Currency, CurrencyPair, DateRange, ExchangeRate, ExchangeRateStore, StoreError,
    };

    use crate::RateService;

    /// Simple in-memory store for testing the service layer.
    pub struct MockStore {
        currencies: Vec<Currency>,
        rows: Mutex<Vec<(CurrencyPair, DateTime<Utc>, Option<f64>)>>,
        /// When set, the currency listing fails; cleared after the first
        /// attempt so tests can simulate a store that recovers too late.
        fail_next_listing: AtomicBool,
        load_count: AtomicUsize,
        query_count: AtomicUsize,
    }

    impl MockStore {
        pub fn new(currencies: &[(&str, i32)]) -> Self {
            Self {
                currencies: currencies
                    .iter()
                    .map(|(code, id)| Currency {
                        id: *id,
                        code: code.to_string(),
                    })
                    .collect(),
                rows: Mutex::new(Vec::new()),
                fail_next_listing: AtomicBool::new(false),
                load_count: AtomicUsize::new(0),
                query_count: AtomicUsize::new(0),
            }
        }

        pub fn failing_first_listing(currencies: &[(&str, i32)]) -> Self {
            let store = Self::new(currencies);
            store.fail_next_listing.store(true, Ordering::SeqCst);
            store
        }

        pub fn loads(&self) -> usize {
            self.load_count.load(Ordering::SeqCst)
        }

        pub fn queries(&self) -> usize {
            self.query_count.load(Ordering::SeqCst)
        }

        fn code_of(&self, id: i32) -> String {
            self.currencies
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.code.clone())
                .unwrap_or_default()
        }

        fn to_rate(&self, row: &(CurrencyPair, DateTime<Utc>, Option<f64>)) -> ExchangeRate {
            ExchangeRate {
                source: self.code_of(row.0.source_id),
                destination: self.code_of(row.0.destination_id),
                date: row.1,
                rate: row.2,
            }
        }
    }

    #[async_trait]
    impl ExchangeRateStore for MockStore {
        async fn list_currencies(&self) -> Result<Vec<Currency>, StoreError> {
            // Widen the race window for concurrent first-touch tests
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.load_count.fetch_add(1, Ordering::SeqCst);

            if self.fail_next_listing.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Database("connection refused".to_string()));
            }
            Ok(self.currencies.clone())
        }

        async fn latest_rate(&self, pair: CurrencyPair) -> Result<ExchangeRate, StoreError> {
            self.query_count.fetch_add(1, Ordering::SeqCst);
            let rows = self.rows.lock().unwrap();
            rows.iter()
                .filter(|(p, _, rate)| *p == pair && rate.is_some())
                .max_by_key(|(_, date, _)| *date)
                .map(|row| self.to_rate(row))
                .ok_or(StoreError::NotFound)
        }

        async fn rates_on_date(
            &self,
            date: DateTime<Utc>,
        ) -> Result<Vec<ExchangeRate>, StoreError> {
            self.query_count.fetch_add(1, Ordering::SeqCst);
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|(_, d, _)| *d == date)
                .map(|row| self.to_rate(row))
                .collect())
        }

        async fn rates_in_range(
            &self,
            pair: CurrencyPair,
            range: DateRange,
        ) -> Result<Vec<ExchangeRate>, StoreError> {
            self.query_count.fetch_add(1, Ordering::SeqCst);
            let rows = self.rows.lock().unwrap();
            let mut rates: Vec<ExchangeRate> = rows
                .iter()
                .filter(|(p, d, _)| *p == pair && *d >= range.from && *d < range.till)
                .map(|row| self.to_rate(row))
                .collect();
            rates.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(rates)
        }

        async fn insert_rate(
            &self,
            pair: CurrencyPair,
            date: DateTime<Utc>,
            rate: Option<f64>,
        ) -> Result<(), StoreError> {
            self.query_count.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|(p, d, _)| *p == pair && *d == date) {
                return Err(StoreError::DuplicateKey);
            }
            rows.push((pair, date, rate));
            Ok(())
        }
    }

    fn usd_chf_store() -> MockStore {
        MockStore::new(&[("USD", 1), ("CHF", 2)])
    }

    fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, date, 0, 0, 0).unwrap()
    }

    fn chf_usd() -> CurrencyPair {
        CurrencyPair {
            source_id: 2,
            destination_id: 1,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pair resolution through the service
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_last_rate_defaults_destination_to_usd() {
        let store = usd_chf_store();
        store
            .insert_rate(chf_usd(), day(2022, 4, 30), Some(1.05))
            .await
            .unwrap();
        let service = RateService::new(store);

        let rate = service.last_rate(Some("CHF"), None).await.unwrap();

        assert_eq!(rate.source, "CHF");
        assert_eq!(rate.destination, "USD");
        assert_eq!(rate.rate, Some(1.05));
    }

    #[tokio::test]
    async fn test_last_rate_missing_source() {
        let service = RateService::new(usd_chf_store());

        let err = service.last_rate(None, Some("USD")).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Bad request: missing source currency");
    }

    #[tokio::test]
    async fn test_last_rate_same_currency() {
        let service = RateService::new(usd_chf_store());

        let err = service.last_rate(Some("USD"), Some("USD")).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_source_reported_even_when_destination_unknown() {
        let service = RateService::new(usd_chf_store());

        let err = service.last_rate(Some("PLN"), Some("NOK")).await.unwrap_err();

        assert_eq!(err.to_string(), "Bad request: unknown PLN source currency");
    }

    #[tokio::test]
    async fn test_last_rate_not_found() {
        let service = RateService::new(usd_chf_store());

        let err = service.last_rate(Some("CHF"), Some("USD")).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_validation_precedes_storage_calls() {
        let service = RateService::new(usd_chf_store());

        let _ = service.last_rate(Some("USD"), Some("USD")).await;
        let _ = service
            .rates_in_range(Some("CHF"), None, "bad-date", "2017-05-06")
            .await;
        let _ = service.rates_on_date("2017-13-40").await;

        assert_eq!(service.store().queries(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registry lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_registry_loads_exactly_once_under_concurrent_first_access() {
        let service = Arc::new(RateService::new(usd_chf_store()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(
                async move { service.currency_codes().await },
            ));
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(service.store().loads(), 1);
        let expected = vec!["CHF".to_string(), "USD".to_string()];
        assert!(results.iter().all(|codes| *codes == expected));
    }

    #[tokio::test]
    async fn test_registry_load_failure_fails_closed() {
        let service = RateService::new(MockStore::failing_first_listing(&[("USD", 1), ("CHF", 2)]));

        // First touch hits the failing listing and caches the empty registry
        assert!(service.currency_codes().await.is_empty());

        // The store has recovered, but the registry is never reloaded:
        // every code stays unknown until process restart
        let err = service.last_rate(Some("CHF"), Some("USD")).await.unwrap_err();
        assert_eq!(err.to_string(), "Bad request: unknown CHF source currency");
        assert!(service.currency_codes().await.is_empty());
        assert_eq!(service.store().loads(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inserts
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_insert_truncates_date_and_round_trips() {
        let service = RateService::new(usd_chf_store());

        let inserted = service
            .insert_rate(ExchangeRate {
                source: "CHF".to_string(),
                destination: "USD".to_string(),
                date: Utc.with_ymd_and_hms(2022, 4, 30, 10, 0, 0).unwrap(),
                rate: Some(1.05),
            })
            .await
            .unwrap();

        assert_eq!(inserted.date, day(2022, 4, 30));

        let latest = service.last_rate(Some("CHF"), Some("USD")).await.unwrap();
        assert_eq!(latest.date, day(2022, 4, 30));
        assert_eq!(latest.rate, Some(1.05));
    }

    #[tokio::test]
    async fn test_insert_duplicate_maps_to_conflict() {
        let service = RateService::new(usd_chf_store());
        let rate = ExchangeRate {
            source: "CHF".to_string(),
            destination: "USD".to_string(),
            date: day(2022, 4, 30),
            rate: Some(1.05),
        };

        service.insert_rate(rate.clone()).await.unwrap();
        let err = service.insert_rate(rate).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Conflict: Record exists for given currencies and date"
        );
    }

    #[tokio::test]
    async fn test_insert_unknown_currency_rejected() {
        let service = RateService::new(usd_chf_store());

        let err = service
            .insert_rate(ExchangeRate {
                source: "CHF".to_string(),
                destination: "NOK".to_string(),
                date: day(2022, 4, 30),
                rate: Some(1.05),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Bad request: unknown NOK destination currency"
        );
        assert_eq!(service.store().queries(), 0);
    }

    #[tokio::test]
    async fn test_insert_same_currency_rejected() {
        let service = RateService::new(usd_chf_store());

        let err = service
            .insert_rate(ExchangeRate {
                source: "USD".to_string(),
                destination: "USD".to_string(),
                date: day(2022, 4, 30),
                rate: Some(1.0),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Range queries
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_range_returns_seeded_window() {
        let store = usd_chf_store();
        for offset in 0..5 {
            store
                .insert_rate(
                    chf_usd(),
                    day(2017, 5, 1) + chrono::Duration::days(offset),
                    Some(1.0 + offset as f64 / 100.0),
                )
                .await
                .unwrap();
        }
        let service = RateService::new(store);

        let rates = service
            .rates_in_range(Some("CHF"), Some("USD"), "2017-05-01", "2017-05-06")
            .await
            .unwrap();

        assert_eq!(rates.len(), 5);
        assert!(
            rates
                .iter()
                .all(|r| r.source == "CHF" && r.destination == "USD")
        );
    }

    #[tokio::test]
    async fn test_range_equal_bounds_is_empty() {
        let store = usd_chf_store();
        store
            .insert_rate(chf_usd(), day(2017, 5, 1), Some(1.05))
            .await
            .unwrap();
        let service = RateService::new(store);

        let rates = service
            .rates_in_range(Some("CHF"), None, "2017-05-01", "2017-05-01")
            .await
            .unwrap();

        assert!(rates.is_empty());
    }

    #[tokio::test]
    async fn test_range_order_violation() {
        let service = RateService::new(usd_chf_store());

        let err = service
            .rates_in_range(Some("CHF"), None, "2017-05-06", "2017-05-01")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Bad request: from must be before till");
    }

    #[tokio::test]
    async fn test_rates_on_date_invalid_format() {
        let service = RateService::new(usd_chf_store());

        let err = service.rates_on_date("30-04-2022").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Bad request: date 30-04-2022 is in incorrect format"
        );
    }
}
