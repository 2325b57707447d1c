pub mod catalog;
pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
mod rate_limit;
pub mod stock;
pub mod types;

pub use client::StoreClient;
pub use error::ScraperError;
pub use extract::{ExtractionError, InlinedPageTypeExtractor, ProductIdExtractor};
pub use normalize::{normalize_record, normalize_stock};
pub use stock::{RegionFailure, RegionalStock};
