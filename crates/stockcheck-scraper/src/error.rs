use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL operation {operation} failed: {message}")]
    GraphQl { operation: String, message: String },

    #[error("catalog has no product with id {product_id}")]
    ProductNotFound { product_id: i64 },

    #[error(
        "no stock data available for product {product_id} \
         ({failed_regions} of {total_regions} region queries failed)"
    )]
    NoStockDataAvailable {
        product_id: i64,
        failed_regions: usize,
        total_regions: usize,
    },
}
