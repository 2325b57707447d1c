//! Run-scoped accumulator of out-of-stock and low-stock entries.

use crate::stock::StockStatus;

/// A shortage observed for one product at one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortageEntry {
    pub product_title: String,
    pub sku: String,
    pub store_name: String,
    pub region: String,
    pub status: StockStatus,
}

/// Append-only ledger owned by one batch run.
///
/// Entries can only be added while the run is in progress; [`Self::finish`]
/// consumes the ledger, so the contents are read exactly once. A new run
/// starts from a fresh `ShortageLedger::new()`.
#[derive(Debug, Default)]
pub struct ShortageLedger {
    entries: Vec<ShortageEntry>,
}

impl ShortageLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: ShortageEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closes the ledger and returns its entries in insertion order.
    #[must_use]
    pub fn finish(self) -> Vec<ShortageEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(store: &str, status: StockStatus) -> ShortageEntry {
        ShortageEntry {
            product_title: "Example Widget".to_string(),
            sku: "widget-9".to_string(),
            store_name: store.to_string(),
            region: "Kowloon".to_string(),
            status,
        }
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = ShortageLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.finish().is_empty());
    }

    #[test]
    fn finish_preserves_insertion_order() {
        let mut ledger = ShortageLedger::new();
        ledger.record(entry("B", StockStatus::LowStock));
        ledger.record(entry("A", StockStatus::OutOfStock));
        assert_eq!(ledger.len(), 2);

        let stores: Vec<String> = ledger.finish().into_iter().map(|e| e.store_name).collect();
        assert_eq!(stores, vec!["B", "A"]);
    }
}
