//! CSV spreadsheet output for per-product reports and the shortage summary.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use stockcheck_core::{NormalizedStockEntry, ProductReference, ShortageEntry};

use crate::error::ReportError;
use crate::filename::{product_report_filename, shortage_summary_filename};

/// UTF-8 byte order mark; spreadsheet apps need it to read CJK text correctly.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Product Title")]
    product_title: &'a str,
    #[serde(rename = "SKU")]
    sku: &'a str,
    #[serde(rename = "Store Name")]
    store_name: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Phone")]
    phone: &'a str,
    #[serde(rename = "Opening Hours")]
    opening_hours: &'a str,
    #[serde(rename = "Stock Status")]
    stock_status: &'a str,
}

#[derive(Debug, Serialize)]
struct ShortageRow<'a> {
    #[serde(rename = "Product Title")]
    product_title: &'a str,
    #[serde(rename = "SKU")]
    sku: &'a str,
    #[serde(rename = "Store Name")]
    store_name: &'a str,
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Stock Status")]
    stock_status: &'a str,
}

/// Writes spreadsheets under a single output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Creates the output directory (and parents) if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::CreateDir`] if the directory cannot be created.
    pub fn ensure_output_dir(&self) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Writes one row per store for `product` and returns the file path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the directory or file cannot be written.
    pub fn write_product_report(
        &self,
        product: &ProductReference,
        entries: &[NormalizedStockEntry],
    ) -> Result<PathBuf, ReportError> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join(product_report_filename(product));
        let file = File::create(&path).map_err(|e| write_error(&path, e.into()))?;

        let rows = entries.iter().map(|entry| ProductRow {
            region: &entry.record.region,
            product_title: &product.title,
            sku: &product.sku,
            store_name: &entry.record.store_name,
            address: &entry.record.address,
            phone: &entry.record.phone,
            opening_hours: &entry.record.opening_hours,
            stock_status: entry.status.label(),
        });
        write_rows(&path, file, rows)?;

        tracing::debug!(path = %path.display(), rows = entries.len(), "wrote product report");
        Ok(path)
    }

    /// Writes every shortage entry to a summary stamped with `completed_at`.
    ///
    /// An existing summary is never overwritten: when the timestamped name is
    /// taken, `_1`, `_2`, ... is appended before the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the directory or file cannot be written.
    pub fn write_shortage_summary(
        &self,
        entries: &[ShortageEntry],
        completed_at: NaiveDateTime,
    ) -> Result<PathBuf, ReportError> {
        self.ensure_output_dir()?;
        let (path, file) = self.create_unique(&shortage_summary_filename(completed_at))?;

        let rows = entries.iter().map(|entry| ShortageRow {
            product_title: &entry.product_title,
            sku: &entry.sku,
            store_name: &entry.store_name,
            region: &entry.region,
            stock_status: entry.status.label(),
        });
        write_rows(&path, file, rows)?;

        tracing::debug!(path = %path.display(), rows = entries.len(), "wrote shortage summary");
        Ok(path)
    }

    fn create_unique(&self, file_name: &str) -> Result<(PathBuf, File), ReportError> {
        let (stem, extension) = file_name.rsplit_once('.').unwrap_or((file_name, "csv"));
        let mut suffix = 0u32;
        loop {
            let candidate = if suffix == 0 {
                file_name.to_owned()
            } else {
                format!("{stem}_{suffix}.{extension}")
            };
            let path = self.output_dir.join(candidate);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists && suffix < u32::MAX => {
                    suffix += 1;
                }
                Err(e) => return Err(write_error(&path, e.into())),
            }
        }
    }
}

fn write_error(path: &Path, source: csv::Error) -> ReportError {
    ReportError::Write {
        path: path.to_path_buf(),
        source,
    }
}

fn write_rows<I, R>(path: &Path, mut file: File, rows: I) -> Result<(), ReportError>
where
    I: IntoIterator<Item = R>,
    R: Serialize,
{
    let wrap = |source: csv::Error| write_error(path, source);

    file.write_all(UTF8_BOM).map_err(|e| wrap(e.into()))?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
