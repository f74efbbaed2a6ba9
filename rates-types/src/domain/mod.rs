//! Pure domain types for the exchange-rate service.

mod currency;
mod rate;

pub use currency::{Currency, CurrencyPair, CurrencyRegistry};
pub use rate::{DateRange, ExchangeRate, truncate_to_day};
