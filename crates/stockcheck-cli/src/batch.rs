//! Sequential batch orchestration for a `check` run.
//!
//! Each URL runs through page fetch, id extraction, title resolution,
//! regional stock fetch, normalization and report emission. A failure at any
//! stage is logged with its stage name and the batch moves on to the next
//! URL. The shortage ledger lives for exactly one run and is consumed once at
//! the end.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use thiserror::Error;

use stockcheck_core::{AppConfig, ProductReference, RegionSpec, ShortageLedger, DEFAULT_REGIONS};
use stockcheck_report::{
    finalize_shortage_report, status_counts, ReportError, ReportWriter, ShortageReport,
};
use stockcheck_scraper::{
    normalize_stock, ExtractionError, InlinedPageTypeExtractor, ProductIdExtractor, RegionalStock,
    ScraperError, StoreClient,
};

use crate::input::{read_urls, InputError};

const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A per-product failure, tagged with the stage that produced it.
#[derive(Debug, Error)]
pub(crate) enum ProductError {
    #[error("fetch page: {0}")]
    FetchPage(#[source] ScraperError),

    #[error("extract id: {0}")]
    ExtractId(#[source] ExtractionError),

    #[error("resolve title: {0}")]
    ResolveTitle(#[source] ScraperError),

    #[error("fetch stock: {0}")]
    FetchStock(#[source] ScraperError),

    #[error("write report: {0}")]
    WriteReport(#[source] ReportError),
}

impl ProductError {
    pub(crate) fn stage(&self) -> &'static str {
        match self {
            Self::FetchPage(_) => "fetch page",
            Self::ExtractId(_) => "extract id",
            Self::ResolveTitle(_) => "resolve title",
            Self::FetchStock(_) => "fetch stock",
            Self::WriteReport(_) => "write report",
        }
    }
}

/// What a completed batch produced.
#[derive(Debug, Default)]
pub(crate) struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub product_reports: Vec<PathBuf>,
    pub shortage_report: Option<ShortageReport>,
}

pub(crate) struct BatchRunner<'a> {
    pub client: &'a StoreClient,
    pub extractor: &'a dyn ProductIdExtractor,
    pub regions: &'a [RegionSpec],
    pub writer: ReportWriter,
    pub delay: Duration,
}

impl BatchRunner<'_> {
    /// Processes `urls` in order, then writes the shortage summary once.
    pub(crate) async fn run(&self, urls: &[String]) -> BatchOutcome {
        let mut ledger = ShortageLedger::new();
        let mut outcome = BatchOutcome::default();
        let total = urls.len();

        for (index, url) in urls.iter().enumerate() {
            println!("\nProcessing {}/{total}: {url}", index + 1);

            match self.process_product(url, &mut ledger).await {
                Ok(path) => {
                    outcome.succeeded += 1;
                    outcome.product_reports.push(path);
                }
                Err(e) => {
                    tracing::warn!(url = %url, stage = e.stage(), error = %e, "product skipped");
                    println!("Failed at {}: {e}", e.stage());
                    outcome.failed += 1;
                }
            }

            if index + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let completed_at = Local::now().naive_local();
        match finalize_shortage_report(&self.writer, ledger, completed_at) {
            Ok(Some(report)) => {
                println!("\nShortage summary saved to: {}", report.path.display());
                println!("Products out of stock somewhere: {}", report.stats.out_of_stock_products);
                println!("Products low on stock somewhere: {}", report.stats.low_stock_products);
                println!("Total shortage records: {}", report.stats.total_rows);
                outcome.shortage_report = Some(report);
            }
            Ok(None) => println!("\nAll products have sufficient stock in all stores"),
            Err(e) => {
                tracing::error!(error = %e, "failed to write shortage summary");
                println!("\nFailed to write shortage summary: {e}");
            }
        }

        outcome
    }

    async fn process_product(
        &self,
        url: &str,
        ledger: &mut ShortageLedger,
    ) -> Result<PathBuf, ProductError> {
        let html = self
            .client
            .fetch_page(url)
            .await
            .map_err(ProductError::FetchPage)?;

        let product_id = self
            .extractor
            .extract_product_id(&html)
            .map_err(ProductError::ExtractId)?;

        let title = self
            .client
            .resolve_product_title(product_id)
            .await
            .map_err(ProductError::ResolveTitle)?;

        let product = ProductReference::new(url, product_id, title);
        tracing::info!(
            url,
            product_id,
            sku = %product.sku,
            title = %product.title,
            "resolved product"
        );
        println!(
            "Found product: id={product_id}, title={}, sku={}",
            product.title, product.sku
        );

        let stock = self
            .client
            .fetch_regional_stock(product_id, self.regions)
            .await
            .map_err(ProductError::FetchStock)?;
        self.print_region_results(&stock);

        let entries = normalize_stock(&product, stock.stores, ledger);
        let path = self
            .writer
            .write_product_report(&product, &entries)
            .map_err(|e| {
                tracing::error!(url, error = %e, "failed to write product report");
                ProductError::WriteReport(e)
            })?;

        println!("Saved to: {}", path.display());
        println!("Stock statistics:");
        for (status, count) in status_counts(&entries) {
            println!("  {status}: {count}");
        }

        Ok(path)
    }

    fn print_region_results(&self, stock: &RegionalStock) {
        for region in self.regions {
            let name = region.display_name;
            if stock.succeeded_regions.contains(&name) {
                let stores = stock.stores.iter().filter(|s| s.region == name).count();
                println!("  ✓ {name}: {stores} stores");
            } else if let Some(failure) = stock.failures.iter().find(|f| f.region == name) {
                println!("  ✗ {name}: {}", failure.error);
            }
        }
    }
}

/// Runs a full `check` batch with the given configuration.
///
/// A missing or empty input file is reported and ends the run cleanly with
/// no output written.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or the HTTP client
/// cannot be built.
pub(crate) async fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    println!("Start time: {}", Local::now().format(CLOCK_FORMAT));

    let urls = match read_urls(&config.input_path) {
        Ok(urls) => urls,
        Err(e @ (InputError::Missing { .. } | InputError::Empty { .. })) => {
            tracing::error!(error = %e, "nothing to check");
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(count = urls.len(), input = %config.input_path.display(), "loaded product URLs");

    let client = StoreClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build store client: {e}"))?;
    let extractor = InlinedPageTypeExtractor::new();
    let runner = BatchRunner {
        client: &client,
        extractor: &extractor,
        regions: &DEFAULT_REGIONS,
        writer: ReportWriter::new(&config.output_dir),
        delay: Duration::from_millis(config.inter_product_delay_ms),
    };

    let outcome = runner.run(&urls).await;
    tracing::info!(
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        reports = outcome.product_reports.len(),
        shortage_summary = outcome.shortage_report.is_some(),
        "batch complete"
    );
    println!(
        "\nProducts succeeded: {}, failed: {}",
        outcome.succeeded, outcome.failed
    );
    println!("End time: {}", Local::now().format(CLOCK_FORMAT));
    Ok(())
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
