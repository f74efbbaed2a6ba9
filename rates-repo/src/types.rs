//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use rates_types::{Currency, ExchangeRate, StoreError};

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from the codes table.
#[derive(FromRow)]
pub struct DbCurrency {
    pub id: i32,
    pub code: String,
}

impl DbCurrency {
    pub fn into_domain(self) -> Currency {
        Currency {
            id: self.id,
            code: self.code,
        }
    }
}

/// Exchange-rate row joined with both currency codes.
///
/// SQLite stores timestamps as RFC 3339 text; Postgres uses TIMESTAMPTZ.
#[derive(FromRow)]
pub struct DbExchangeRate {
    pub source: String,
    pub destination: String,
    #[cfg(feature = "sqlite")]
    pub date: String,
    #[cfg(not(feature = "sqlite"))]
    pub date: DateTime<Utc>,
    pub rate: Option<f64>,
}

impl DbExchangeRate {
    #[cfg(feature = "sqlite")]
    pub fn into_domain(self) -> Result<ExchangeRate, StoreError> {
        let date = chrono::DateTime::parse_from_rfc3339(&self.date)
            .map_err(|e| StoreError::Database(format!("invalid stored date: {}", e)))?
            .with_timezone(&chrono::Utc);

        Ok(ExchangeRate {
            source: self.source,
            destination: self.destination,
            date,
            rate: self.rate,
        })
    }

    #[cfg(not(feature = "sqlite"))]
    pub fn into_domain(self) -> Result<ExchangeRate, StoreError> {
        Ok(ExchangeRate {
            source: self.source,
            destination: self.destination,
            date: self.date,
            rate: self.rate,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Translates a driver error into the tagged store outcome. The unique
/// constraint on (source, destination, date) is the only violation the core
/// distinguishes; everything else carries its detail for server-side logging.
pub fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateKey,
        other => StoreError::Database(other.to_string()),
    }
}
