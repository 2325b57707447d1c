//! Product identifier extraction from storefront HTML.
//!
//! Product pages inline their page-type payload as
//! `JSON.parse("{&quot;id&quot;:&quot;173874&quot;,...}".replace(...))`
//! inside a `<script>` block that also mentions `INLINED_PAGE_TYPE`.
//! Callers depend only on [`ProductIdExtractor`], so the regex strategy
//! below can be replaced by a structured parser without touching them.

use regex::Regex;
use thiserror::Error;

/// Token identifying the script block that carries the page-type payload.
pub const PAGE_TYPE_MARKER: &str = "INLINED_PAGE_TYPE";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no script block contains the INLINED_PAGE_TYPE marker")]
    MarkerNotFound,

    #[error("script block has the INLINED_PAGE_TYPE marker but no JSON.parse(...).replace payload")]
    PatternNotFound,

    #[error("embedded page JSON is invalid: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("embedded page JSON has no \"id\" field")]
    MissingId,

    #[error("embedded page JSON \"id\" is not an integer: {0}")]
    InvalidId(String),
}

/// Pulls the numeric product identifier out of a product page.
pub trait ProductIdExtractor {
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] describing why no identifier was found.
    fn extract_product_id(&self, html: &str) -> Result<i64, ExtractionError>;
}

/// Regex-based extractor for the `INLINED_PAGE_TYPE` payload.
pub struct InlinedPageTypeExtractor {
    script_re: Regex,
    payload_re: Regex,
}

impl Default for InlinedPageTypeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl InlinedPageTypeExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            script_re: Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"),
            payload_re: Regex::new(r#"JSON\.parse\(['"](\{.*?\})['"]\.replace"#)
                .expect("valid regex"),
        }
    }

    /// Returns the escaped JSON object literal from the first script block
    /// that has both the marker and the payload pattern.
    fn find_payload<'a>(&self, html: &'a str) -> Result<&'a str, ExtractionError> {
        let mut saw_marker = false;

        for cap in self.script_re.captures_iter(html) {
            let Some(content) = cap.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !content.contains(PAGE_TYPE_MARKER) {
                continue;
            }
            saw_marker = true;

            if let Some(payload) = self.payload_re.captures(content).and_then(|c| c.get(1)) {
                return Ok(payload.as_str());
            }
        }

        if saw_marker {
            Err(ExtractionError::PatternNotFound)
        } else {
            Err(ExtractionError::MarkerNotFound)
        }
    }
}

impl ProductIdExtractor for InlinedPageTypeExtractor {
    fn extract_product_id(&self, html: &str) -> Result<i64, ExtractionError> {
        let payload = self.find_payload(html)?;
        let json_str = unescape_quotes(payload);
        tracing::debug!(payload = %json_str, "extracted inlined page JSON");

        let data: serde_json::Value =
            serde_json::from_str(&json_str).map_err(ExtractionError::InvalidJson)?;
        let id = data.get("id").ok_or(ExtractionError::MissingId)?;
        id_to_i64(id)
    }
}

/// Replaces HTML-entity double quotes with literal quotes.
fn unescape_quotes(s: &str) -> String {
    s.replace("&quot;", "\"").replace("&#34;", "\"")
}

/// Accepts integers, integral floats, and numeric strings.
fn id_to_i64(value: &serde_json::Value) -> Result<i64, ExtractionError> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64_to_i64))
            .ok_or_else(|| ExtractionError::InvalidId(n.to_string())),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ExtractionError::InvalidId(s.clone())),
        other => Err(ExtractionError::InvalidId(other.to_string())),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral_f64_to_i64(f: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; stay strictly below 2^63.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && f >= -LIMIT && f < LIMIT).then(|| f as i64)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
