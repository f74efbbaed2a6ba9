//! SQLite storage adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use rates_types::{Currency, CurrencyPair, DateRange, ExchangeRate, ExchangeRateStore, StoreError};

use crate::types::{DbCurrency, DbExchangeRate, map_sqlx_err};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts currency codes, returning them with their assigned ids.
    /// Intended for tests and development seeding; production currencies are
    /// seeded by an external process.
    pub async fn seed_currencies(&self, codes: &[&str]) -> Result<Vec<Currency>, StoreError> {
        for code in codes {
            sqlx::query(r#"INSERT INTO currencies_codes (code) VALUES (?)"#)
                .bind(code)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        }
        self.list_currencies().await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ExchangeRateStore for SqliteStore {
    async fn list_currencies(&self) -> Result<Vec<Currency>, StoreError> {
        let rows: Vec<DbCurrency> =
            sqlx::query_as(r#"SELECT id, code FROM currencies_codes ORDER BY id"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_err)?;

        Ok(rows.into_iter().map(DbCurrency::into_domain).collect())
    }

    async fn latest_rate(&self, pair: CurrencyPair) -> Result<ExchangeRate, StoreError> {
        let row: Option<DbExchangeRate> = sqlx::query_as(
            r#"SELECT source_code.code AS source, destination_code.code AS destination,
                      rates.date, rates.rate
               FROM exchange_rates rates
               JOIN currencies_codes source_code
                 ON rates.source_currency_id = source_code.id
               JOIN currencies_codes destination_code
                 ON rates.destination_currency_id = destination_code.id
               WHERE rates.source_currency_id = ?
                 AND rates.destination_currency_id = ?
                 AND rates.rate IS NOT NULL
               ORDER BY rates.date DESC
               LIMIT 1"#,
        )
        .bind(pair.source_id)
        .bind(pair.destination_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.ok_or(StoreError::NotFound)?.into_domain()
    }

    async fn rates_on_date(&self, date: DateTime<Utc>) -> Result<Vec<ExchangeRate>, StoreError> {
        let rows: Vec<DbExchangeRate> = sqlx::query_as(
            r#"SELECT source_code.code AS source, destination_code.code AS destination,
                      rates.date, rates.rate
               FROM exchange_rates rates
               JOIN currencies_codes source_code
                 ON rates.source_currency_id = source_code.id
               JOIN currencies_codes destination_code
                 ON rates.destination_currency_id = destination_code.id
               WHERE rates.date = ?
               ORDER BY rates.date DESC"#,
        )
        .bind(date.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.into_iter().map(DbExchangeRate::into_domain).collect()
    }

    async fn rates_in_range(
        &self,
        pair: CurrencyPair,
        range: DateRange,
    ) -> Result<Vec<ExchangeRate>, StoreError> {
        let rows: Vec<DbExchangeRate> = sqlx::query_as(
            r#"SELECT source_code.code AS source, destination_code.code AS destination,
                      rates.date, rates.rate
               FROM exchange_rates rates
               JOIN currencies_codes source_code
                 ON rates.source_currency_id = source_code.id
               JOIN currencies_codes destination_code
                 ON rates.destination_currency_id = destination_code.id
               WHERE rates.source_currency_id = ?
                 AND rates.destination_currency_id = ?
                 AND rates.date >= ?
                 AND rates.date < ?
               ORDER BY rates.date DESC"#,
        )
        .bind(pair.source_id)
        .bind(pair.destination_id)
        .bind(range.from.to_rfc3339())
        .bind(range.till.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.into_iter().map(DbExchangeRate::into_domain).collect()
    }

    async fn insert_rate(
        &self,
        pair: CurrencyPair,
        date: DateTime<Utc>,
        rate: Option<f64>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO exchange_rates (source_currency_id, destination_currency_id, date, rate)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(pair.source_id)
        .bind(pair.destination_id)
        .bind(date.to_rfc3339())
        .bind(rate)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(())
    }
}
