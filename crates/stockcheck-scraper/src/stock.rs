//! Per-region store stock queries with partial-failure aggregation.

use stockcheck_core::{RegionSpec, StoreStockRecord};

use crate::client::StoreClient;
use crate::error::ScraperError;
use crate::types::StoreStockData;

const STORE_STOCK_OPERATION: &str = "GetStoreStockStatus";

const STORE_STOCK_QUERY: &str = r"
query GetStoreStockStatus($productId: Int, $countryId: String, $regionId: Int) {
    storeStockStatus(product_id: $productId, country_id: $countryId, region_id: $regionId) {
        stock_status
        store_name
        store_address_street
        store_tel_1
        opening_hour_1
    }
}
";

/// A region whose query failed and was left out of the combined result.
#[derive(Debug)]
pub struct RegionFailure {
    pub region: &'static str,
    pub error: ScraperError,
}

/// Combined stock across every region that answered.
#[derive(Debug)]
pub struct RegionalStock {
    /// Store records in region order, each tagged with its region name.
    pub stores: Vec<StoreStockRecord>,
    /// Display names of regions whose query succeeded, in query order.
    pub succeeded_regions: Vec<&'static str>,
    pub failures: Vec<RegionFailure>,
}

impl RegionalStock {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl StoreClient {
    /// Queries one region's store stock for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns any transport, status, decode, or GraphQL error for this
    /// region's request.
    pub async fn fetch_region_stock(
        &self,
        product_id: i64,
        region: &RegionSpec,
    ) -> Result<Vec<StoreStockRecord>, ScraperError> {
        let variables = serde_json::json!({
            "productId": product_id,
            "countryId": region.country_code,
            "regionId": region.region_id,
        });
        let data: StoreStockData = self
            .post_graphql(STORE_STOCK_OPERATION, STORE_STOCK_QUERY, &variables)
            .await?;

        Ok(data
            .store_stock_status
            .unwrap_or_default()
            .into_iter()
            .map(|raw| raw.into_record(region.display_name))
            .collect())
    }

    /// Queries every region in order and combines the stores that came back.
    ///
    /// A failing region is logged and recorded in
    /// [`RegionalStock::failures`]; it never stops the remaining queries.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NoStockDataAvailable`] when no region
    /// succeeded, or when the regions that did succeed returned no stores.
    pub async fn fetch_regional_stock(
        &self,
        product_id: i64,
        regions: &[RegionSpec],
    ) -> Result<RegionalStock, ScraperError> {
        let mut stores = Vec::new();
        let mut succeeded_regions = Vec::with_capacity(regions.len());
        let mut failures = Vec::new();

        for region in regions {
            match self.fetch_region_stock(product_id, region).await {
                Ok(region_stores) => {
                    tracing::info!(
                        product_id,
                        region = region.display_name,
                        stores = region_stores.len(),
                        "region stock query succeeded"
                    );
                    stores.extend(region_stores);
                    succeeded_regions.push(region.display_name);
                }
                Err(error) => {
                    tracing::warn!(
                        product_id,
                        region = region.display_name,
                        error = %error,
                        "region stock query failed"
                    );
                    failures.push(RegionFailure {
                        region: region.display_name,
                        error,
                    });
                }
            }
        }

        if stores.is_empty() {
            return Err(ScraperError::NoStockDataAvailable {
                product_id,
                failed_regions: failures.len(),
                total_regions: regions.len(),
            });
        }

        Ok(RegionalStock {
            stores,
            succeeded_regions,
            failures,
        })
    }
}
