//! Exchange-rate records and date-range values.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An exchange-rate observation as it travels over the wire.
///
/// The rate is nullable to represent known-missing observations (e.g.
/// holidays). At most one record exists per (source, destination, day);
/// storage enforces this with a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    /// Source currency code
    #[schema(example = "CHF")]
    pub source: String,
    /// Destination currency code
    #[schema(example = "USD")]
    pub destination: String,
    /// Observation date; the time component is truncated to midnight UTC
    #[schema(value_type = String, example = "2022-04-30T00:00:00Z")]
    pub date: DateTime<Utc>,
    /// Exchange rate, null for known-missing observations
    #[schema(example = 1.0456)]
    pub rate: Option<f64>,
}

/// A half-open date window: `from` inclusive, `till` exclusive.
///
/// `from == till` is the degenerate empty window, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub till: DateTime<Utc>,
}

/// Truncates a timestamp to midnight UTC of the same calendar day.
///
/// Truncation, not rounding: 23:59 stays on its own day. Preserves the
/// one-rate-per-calendar-day invariant without date arithmetic in storage.
pub fn truncate_to_day(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_drops_time_component() {
        let date = Utc.with_ymd_and_hms(2022, 4, 30, 10, 15, 42).unwrap();
        let truncated = truncate_to_day(date);
        assert_eq!(truncated, Utc.with_ymd_and_hms(2022, 4, 30, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let midnight = Utc.with_ymd_and_hms(2022, 4, 30, 0, 0, 0).unwrap();
        assert_eq!(truncate_to_day(midnight), midnight);
    }

    #[test]
    fn test_truncate_late_evening_stays_on_same_day() {
        let date = Utc.with_ymd_and_hms(2022, 4, 30, 23, 59, 59).unwrap();
        let truncated = truncate_to_day(date);
        assert_eq!(truncated, Utc.with_ymd_and_hms(2022, 4, 30, 0, 0, 0).unwrap());
    }
}
