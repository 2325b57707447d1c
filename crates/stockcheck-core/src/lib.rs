pub mod app_config;
pub mod config;
pub mod ledger;
pub mod regions;
pub mod stock;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use ledger::{ShortageEntry, ShortageLedger};
pub use regions::{RegionSpec, DEFAULT_REGIONS};
pub use stock::{sku_from_url, NormalizedStockEntry, ProductReference, StockStatus, StoreStockRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
