//! Per-product status counts and the end-of-run shortage summary.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDateTime;

use stockcheck_core::{NormalizedStockEntry, ShortageEntry, ShortageLedger, StockStatus};

use crate::error::ReportError;
use crate::writer::ReportWriter;

/// Counts entries per status, most frequent first.
///
/// Ties keep the order in which each status first appeared.
#[must_use]
pub fn status_counts(entries: &[NormalizedStockEntry]) -> Vec<(StockStatus, usize)> {
    let mut counts: Vec<(StockStatus, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(status, _)| *status == entry.status) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.status, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Aggregate figures printed after the summary is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortageStats {
    /// Distinct products with at least one out-of-stock store.
    pub out_of_stock_products: usize,
    /// Distinct products with at least one low-stock store.
    pub low_stock_products: usize,
    pub total_rows: usize,
}

impl ShortageStats {
    #[must_use]
    pub fn from_entries(entries: &[ShortageEntry]) -> Self {
        let mut out_of_stock: HashSet<(&str, &str)> = HashSet::new();
        let mut low_stock: HashSet<(&str, &str)> = HashSet::new();
        for entry in entries {
            let key = (entry.product_title.as_str(), entry.sku.as_str());
            match entry.status {
                StockStatus::OutOfStock => {
                    out_of_stock.insert(key);
                }
                StockStatus::LowStock => {
                    low_stock.insert(key);
                }
                StockStatus::InStock | StockStatus::Unknown => {}
            }
        }
        Self {
            out_of_stock_products: out_of_stock.len(),
            low_stock_products: low_stock.len(),
            total_rows: entries.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortageReport {
    pub path: PathBuf,
    pub stats: ShortageStats,
}

/// Consumes the run's ledger and writes the shortage summary.
///
/// Returns `Ok(None)` without touching the filesystem when the ledger is empty.
///
/// # Errors
///
/// Returns [`ReportError`] if the summary cannot be written.
pub fn finalize_shortage_report(
    writer: &ReportWriter,
    ledger: ShortageLedger,
    completed_at: NaiveDateTime,
) -> Result<Option<ShortageReport>, ReportError> {
    let entries = ledger.finish();
    if entries.is_empty() {
        tracing::info!("no shortages recorded; skipping summary");
        return Ok(None);
    }

    let path = writer.write_shortage_summary(&entries, completed_at)?;
    let stats = ShortageStats::from_entries(&entries);
    tracing::info!(
        path = %path.display(),
        rows = stats.total_rows,
        out_of_stock_products = stats.out_of_stock_products,
        low_stock_products = stats.low_stock_products,
        "shortage summary written"
    );
    Ok(Some(ShortageReport { path, stats }))
}

#[cfg(test)]
mod tests {
    use stockcheck_core::StoreStockRecord;

    use super::*;

    fn normalized(status: StockStatus) -> NormalizedStockEntry {
        NormalizedStockEntry {
            record: StoreStockRecord {
                region: "Hong Kong".to_string(),
                store_name: "Central".to_string(),
                address: String::new(),
                phone: String::new(),
                opening_hours: String::new(),
                raw_status: None,
            },
            status,
        }
    }

    fn shortage(title: &str, sku: &str, store: &str, status: StockStatus) -> ShortageEntry {
        ShortageEntry {
            product_title: title.to_string(),
            sku: sku.to_string(),
            store_name: store.to_string(),
            region: "Hong Kong".to_string(),
            status,
        }
    }

    fn completed_at() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap()
    }

    #[test]
    fn counts_are_sorted_most_frequent_first() {
        let entries = vec![
            normalized(StockStatus::OutOfStock),
            normalized(StockStatus::InStock),
            normalized(StockStatus::InStock),
            normalized(StockStatus::InStock),
            normalized(StockStatus::OutOfStock),
            normalized(StockStatus::Unknown),
        ];
        assert_eq!(
            status_counts(&entries),
            vec![
                (StockStatus::InStock, 3),
                (StockStatus::OutOfStock, 2),
                (StockStatus::Unknown, 1),
            ]
        );
    }

    #[test]
    fn counts_ties_keep_first_seen_order() {
        let entries = vec![
            normalized(StockStatus::LowStock),
            normalized(StockStatus::InStock),
        ];
        assert_eq!(
            status_counts(&entries),
            vec![(StockStatus::LowStock, 1), (StockStatus::InStock, 1)]
        );
        assert!(status_counts(&[]).is_empty());
    }

    #[test]
    fn stats_count_distinct_products() {
        let entries = vec![
            shortage("Widget", "w-1", "Central", StockStatus::OutOfStock),
            shortage("Widget", "w-1", "Mong Kok", StockStatus::OutOfStock),
            shortage("Widget", "w-1", "Sha Tin", StockStatus::LowStock),
            shortage("Gadget", "g-1", "Central", StockStatus::LowStock),
        ];
        let stats = ShortageStats::from_entries(&entries);
        assert_eq!(stats.out_of_stock_products, 1);
        assert_eq!(stats.low_stock_products, 2);
        assert_eq!(stats.total_rows, 4);
    }

    #[test]
    fn empty_ledger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let writer = ReportWriter::new(&out);

        let report = finalize_shortage_report(&writer, ShortageLedger::new(), completed_at())
            .expect("finalize should succeed");
        assert!(report.is_none());
        assert!(!out.exists(), "no directory should be created");
    }

    #[test]
    fn non_empty_ledger_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let mut ledger = ShortageLedger::new();
        ledger.record(shortage("Widget", "w-1", "Central", StockStatus::OutOfStock));
        ledger.record(shortage("Widget", "w-1", "Mong Kok", StockStatus::LowStock));

        let report = finalize_shortage_report(&writer, ledger, completed_at())
            .expect("finalize should succeed")
            .expect("summary should be written");

        assert!(report.path.is_file());
        assert!(report
            .path
            .ends_with("shortage_summary_20260102_030405.csv"));
        assert_eq!(
            report.stats,
            ShortageStats {
                out_of_stock_products: 1,
                low_stock_products: 1,
                total_rows: 2,
            }
        );
    }
}
