//! Output file naming.

use chrono::NaiveDateTime;

use stockcheck_core::ProductReference;

/// Maximum number of title characters kept in a product report filename.
pub const TITLE_FILENAME_CHARS: usize = 20;

/// Keeps only alphanumeric characters of `title`, truncated to `max_chars`.
///
/// Unicode letters and digits are kept, so CJK titles survive; spaces,
/// slashes, dots and all other punctuation are dropped.
#[must_use]
pub fn sanitize_title(title: &str, max_chars: usize) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(max_chars)
        .collect()
}

/// Keeps alphanumerics plus `-` and `_`.
fn sanitize_sku(sku: &str) -> String {
    sku.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// `<title>_<sku>.csv` for a product's stock report.
///
/// Falls back to `product` for a title with no usable characters and to the
/// numeric product id for an unusable SKU.
#[must_use]
pub fn product_report_filename(product: &ProductReference) -> String {
    let title = sanitize_title(&product.title, TITLE_FILENAME_CHARS);
    let title = if title.is_empty() {
        "product".to_string()
    } else {
        title
    };

    let sku = sanitize_sku(&product.sku);
    let sku = if sku.is_empty() {
        product.product_id.to_string()
    } else {
        sku
    };

    format!("{title}_{sku}.csv")
}

/// `shortage_summary_YYYYMMDD_HHMMSS.csv`, stamped with run completion time.
#[must_use]
pub fn shortage_summary_filename(completed_at: NaiveDateTime) -> String {
    format!(
        "shortage_summary_{}.csv",
        completed_at.format("%Y%m%d_%H%M%S")
    )
}
