//! Product and store-stock domain types shared by the scraper and report crates.

use serde::{Deserialize, Serialize};

/// A product page whose identifier and title have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReference {
    pub url: String,
    /// Trailing path segment of `url`, without a `.html` suffix.
    pub sku: String,
    pub product_id: i64,
    /// Catalog name of the product.
    pub title: String,
}

impl ProductReference {
    #[must_use]
    pub fn new(url: &str, product_id: i64, title: String) -> Self {
        Self {
            url: url.to_owned(),
            sku: sku_from_url(url),
            product_id,
            title,
        }
    }
}

/// Derives the SKU from a product URL's trailing path segment.
///
/// Query strings, fragments, and trailing slashes are ignored, and a `.html`
/// suffix is stripped: `https://shop.example/p/ab-123.html?x=1` gives `ab-123`.
#[must_use]
pub fn sku_from_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let path = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment)
        .trim_end_matches('/');
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.strip_suffix(".html").unwrap_or(segment).to_owned()
}

/// Semantic stock level derived from the upstream numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
    Unknown,
}

impl StockStatus {
    /// Maps `0`, `1`, `2` to out/low/in stock; anything else, including a
    /// missing code, is `Unknown`.
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::OutOfStock,
            Some(1) => Self::LowStock,
            Some(2) => Self::InStock,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
            Self::Unknown => "Unknown",
        }
    }

    /// Out-of-stock and low-stock entries are recorded in the shortage ledger.
    #[must_use]
    pub fn is_shortage(self) -> bool {
        matches!(self, Self::OutOfStock | Self::LowStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One store's stock for one product, as returned by a single region query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStockRecord {
    /// Display name of the region that returned this store.
    pub region: String,
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub opening_hours: String,
    /// Upstream `stock_status`; `None` when absent or not an integer.
    pub raw_status: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStockEntry {
    pub record: StoreStockRecord,
    pub status: StockStatus,
}
