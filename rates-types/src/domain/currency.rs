//! Currency codes, internal identifiers and the code lookup registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A currency known to the system.
///
/// The code is a short uppercase symbol (e.g. "USD"); the identifier is a
/// storage-assigned integer, opaque to callers. Currencies are seeded by an
/// external process and read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: i32,
    pub code: String,
}

/// A resolved currency pair, ready for a storage query.
///
/// Produced by the resolver, consumed by the store, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyPair {
    pub source_id: i32,
    pub destination_id: i32,
}

/// The code-to-identifier mapping, loaded once per process lifetime.
///
/// There is no invalidation path: if currencies change at the data source the
/// process must restart to observe them. A failed load yields an empty
/// registry, so every lookup fails closed until restart.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    ids_by_code: HashMap<String, i32>,
}

impl CurrencyRegistry {
    /// Builds a registry from a currency listing. Codes are unique within one
    /// snapshot; a duplicate code keeps the last identifier seen.
    pub fn from_currencies(currencies: Vec<Currency>) -> Self {
        let ids_by_code = currencies.into_iter().map(|c| (c.code, c.id)).collect();
        Self { ids_by_code }
    }

    /// The fail-closed registry: every code resolves as unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All known currency codes, sorted for stable output.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.ids_by_code.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Looks up the internal identifier for a code.
    pub fn identifier_for(&self, code: &str) -> Option<i32> {
        self.ids_by_code.get(code).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_code.is_empty()
    }
}
