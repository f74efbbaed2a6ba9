//! PostgreSQL storage adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use rates_types::{Currency, CurrencyPair, DateRange, ExchangeRate, ExchangeRateStore, StoreError};

use crate::types::{DbCurrency, DbExchangeRate, map_sqlx_err};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Store
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL store implementation.
pub struct PostgresStore {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresStore {
    /// Creates a new PostgreSQL store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_tables_pg.sql"),
            "0001",
        )
        .await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts currency codes, returning them with their assigned ids.
    /// Intended for tests and development seeding; production currencies are
    /// seeded by an external process.
    pub async fn seed_currencies(&self, codes: &[&str]) -> Result<Vec<Currency>, StoreError> {
        for code in codes {
            sqlx::query(r#"INSERT INTO currencies_codes (code) VALUES ($1)"#)
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
impl ExchangeRateStore for PostgresStore {
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
               WHERE rates.source_currency_id = $1
                 AND rates.destination_currency_id = $2
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
               WHERE rates.date = $1
               ORDER BY rates.date DESC"#,
        )
        .bind(date)
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
               WHERE rates.source_currency_id = $1
                 AND rates.destination_currency_id = $2
                 AND rates.date >= $3
                 AND rates.date < $4
               ORDER BY rates.date DESC"#,
        )
        .bind(pair.source_id)
        .bind(pair.destination_id)
        .bind(range.from)
        .bind(range.till)
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
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(pair.source_id)
        .bind(pair.destination_id)
        .bind(date)
        .bind(rate)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(())
    }
}
