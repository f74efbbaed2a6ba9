//! Port traits implemented by storage adapters.

mod store;

pub use store::ExchangeRateStore;
