//! Product title lookup through the catalog GraphQL operation.

use crate::client::StoreClient;
use crate::error::ScraperError;
use crate::types::ProductsData;

const PRODUCT_BY_ID_OPERATION: &str = "getProductDetailForProductById";

const PRODUCT_BY_ID_QUERY: &str = r"
query getProductDetailForProductById($id: String!) {
    products(filter: { product_id: { eq: $id } }) {
        items {
            name
        }
    }
}
";

impl StoreClient {
    /// Resolves the catalog name of `product_id`.
    ///
    /// Sends a single query (never retried) filtered by product id and
    /// returns the first item's name.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::ProductNotFound`]: the catalog returned no items, or
    ///   the first item has no name.
    /// - Any transport, status, or GraphQL error from the request.
    pub async fn resolve_product_title(&self, product_id: i64) -> Result<String, ScraperError> {
        let variables = serde_json::json!({ "id": product_id.to_string() });
        let data: ProductsData = self
            .send_graphql(PRODUCT_BY_ID_OPERATION, PRODUCT_BY_ID_QUERY, &variables)
            .await?;

        data.products
            .and_then(|p| p.items.into_iter().next())
            .and_then(|item| item.name)
            .filter(|name| !name.trim().is_empty())
            .ok_or(ScraperError::ProductNotFound { product_id })
    }
}
