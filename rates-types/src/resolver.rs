//! Request resolution: turns raw, string-based request input into validated,
//! typed values.
//!
//! Two independent procedures live here: currency-pair resolution against the
//! [`CurrencyRegistry`] and date/date-range parsing. Both run before any
//! storage call, so invalid input never produces partial side effects.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::{CurrencyPair, CurrencyRegistry, DateRange};
use crate::error::{CurrencyRole, ValidationError};

/// Query dates arrive in this fixed format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Destination currency used when the query omits one.
pub const DEFAULT_DESTINATION: &str = "USD";

/// Resolves a query currency pair.
///
/// Policy: source is required, destination is optional and defaults to USD.
/// The equality check runs after defaulting and before registry lookups, so
/// `source == destination` is rejected even when neither code is known.
/// Source is looked up before destination; when both are unknown the reported
/// error names the source.
pub fn resolve_pair(
    source: Option<&str>,
    destination: Option<&str>,
    registry: &CurrencyRegistry,
) -> Result<CurrencyPair, ValidationError> {
    let source = source
        .filter(|code| !code.is_empty())
        .ok_or(ValidationError::MissingField("source"))?;

    let destination = destination
        .filter(|code| !code.is_empty())
        .unwrap_or(DEFAULT_DESTINATION);

    if source == destination {
        return Err(ValidationError::SameCurrency);
    }

    Ok(CurrencyPair {
        source_id: lookup(source, CurrencyRole::Source, registry)?,
        destination_id: lookup(destination, CurrencyRole::Destination, registry)?,
    })
}

/// Resolves the currency pair of an insert body.
///
/// Same rules as [`resolve_pair`], except the destination is required: the
/// body carries both codes explicitly, so nothing is defaultable.
pub fn resolve_insert_pair(
    source: &str,
    destination: &str,
    registry: &CurrencyRegistry,
) -> Result<CurrencyPair, ValidationError> {
    if source.is_empty() {
        return Err(ValidationError::MissingField("source"));
    }
    if destination.is_empty() {
        return Err(ValidationError::MissingField("destination"));
    }
    if source == destination {
        return Err(ValidationError::SameCurrency);
    }

    Ok(CurrencyPair {
        source_id: lookup(source, CurrencyRole::Source, registry)?,
        destination_id: lookup(destination, CurrencyRole::Destination, registry)?,
    })
}

/// Resolves a date-range query. `from` is parsed first, then `till`; a range
/// where `from` is strictly after `till` is rejected, equality is the empty
/// window and allowed.
pub fn resolve_range(raw_from: &str, raw_till: &str) -> Result<DateRange, ValidationError> {
    let from = parse_date("from", raw_from)?;
    let till = parse_date("till", raw_till)?;

    if from > till {
        return Err(ValidationError::RangeOrder);
    }

    Ok(DateRange { from, till })
}

/// Resolves a single `YYYY-MM-DD` date parameter.
pub fn resolve_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_date("date", raw)
}

fn lookup(
    code: &str,
    role: CurrencyRole,
    registry: &CurrencyRegistry,
) -> Result<i32, ValidationError> {
    registry
        .identifier_for(code)
        .ok_or_else(|| ValidationError::UnknownCurrency {
            code: code.to_string(),
            role,
        })
}

fn parse_date(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}
