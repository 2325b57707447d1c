//! Stock status normalization and shortage recording.

use stockcheck_core::{
    NormalizedStockEntry, ProductReference, ShortageEntry, ShortageLedger, StockStatus,
    StoreStockRecord,
};

/// Labels a single store record with its [`StockStatus`].
#[must_use]
pub fn normalize_record(record: StoreStockRecord) -> NormalizedStockEntry {
    let status = StockStatus::from_code(record.raw_status);
    NormalizedStockEntry { record, status }
}

/// Normalizes every record for `product`, in input order.
///
/// Each out-of-stock or low-stock entry is also appended to `ledger` with
/// the product's title and SKU, in the same pass and the same order as the
/// returned rows.
pub fn normalize_stock(
    product: &ProductReference,
    records: Vec<StoreStockRecord>,
    ledger: &mut ShortageLedger,
) -> Vec<NormalizedStockEntry> {
    records
        .into_iter()
        .map(|record| {
            let entry = normalize_record(record);
            if entry.status.is_shortage() {
                ledger.record(ShortageEntry {
                    product_title: product.title.clone(),
                    sku: product.sku.clone(),
                    store_name: entry.record.store_name.clone(),
                    region: entry.record.region.clone(),
                    status: entry.status,
                });
            }
            entry
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
