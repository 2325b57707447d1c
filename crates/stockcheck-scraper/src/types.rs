//! GraphQL response shapes for the storefront endpoint.
//!
//! ### Envelope
//! Every response is `{"data": ..., "errors": [...]}`. `errors` is omitted on
//! success. A failed operation may return `"data": null` with errors, or
//! (observed on bad variables) a `data` object whose fields are `null`.
//!
//! ### `storeStockStatus`
//! A list of store objects; an empty list when the region has no stores
//! carrying the product. `null` is treated the same as an empty list.
//!
//! ### `stock_status`
//! Integer `0` (out of stock), `1` (low stock) or `2` (in stock). Anything
//! else, including a missing field or a string, is kept as "no code" and
//! normalized to `Unknown`.

use serde::Deserialize;

use stockcheck_core::StoreStockRecord;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the `getProductDetailForProductById` operation.
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Option<ProductItems>,
}

#[derive(Debug, Deserialize)]
pub struct ProductItems {
    #[serde(default)]
    pub items: Vec<ProductItem>,
}

#[derive(Debug, Deserialize)]
pub struct ProductItem {
    pub name: Option<String>,
}

/// `data` of the `GetStoreStockStatus` operation.
#[derive(Debug, Deserialize)]
pub struct StoreStockData {
    #[serde(rename = "storeStockStatus")]
    pub store_stock_status: Option<Vec<RawStoreStock>>,
}

/// One store entry as returned by `storeStockStatus`.
#[derive(Debug, Deserialize)]
pub struct RawStoreStock {
    #[serde(default)]
    pub stock_status: Option<serde_json::Value>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub store_address_street: Option<String>,
    #[serde(default)]
    pub store_tel_1: Option<String>,
    #[serde(default)]
    pub opening_hour_1: Option<String>,
}

impl RawStoreStock {
    /// Converts the raw entry into a [`StoreStockRecord`] tagged with `region`.
    #[must_use]
    pub fn into_record(self, region: &str) -> StoreStockRecord {
        StoreStockRecord {
            region: region.to_owned(),
            store_name: self.store_name.unwrap_or_default(),
            address: self.store_address_street.unwrap_or_default(),
            phone: self.store_tel_1.unwrap_or_default(),
            opening_hours: self.opening_hour_1.unwrap_or_default(),
            raw_status: self.stock_status.as_ref().and_then(serde_json::Value::as_i64),
        }
    }
}
