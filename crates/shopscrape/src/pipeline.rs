//! Multi-page driver and JSON persistence.

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::record::ProductRecord;
use crate::scrape::PageScraper;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::info;

/// Scrape every page in `pages`, ascending, into one flat vector.
///
/// Records keep page order, then in-page order. The first page that fails
/// to fetch aborts the run; nothing is returned for the pages before it.
pub async fn run(scraper: &PageScraper, pages: RangeInclusive<u32>) -> Result<Vec<ProductRecord>> {
    let mut all = Vec::new();
    for page in pages {
        let mut records = scraper.scrape_page(page).await?;
        all.append(&mut records);
    }
    info!("scraped {} products", all.len());
    Ok(all)
}

/// Write `records` as a pretty-printed JSON array, replacing `path`.
pub fn persist(records: &[ProductRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|e| ScrapeError::io("failed to write", path, e))?;
    info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read a record array written by [`persist`].
pub fn load(path: &Path) -> Result<Vec<ProductRecord>> {
    let json =
        std::fs::read_to_string(path).map_err(|e| ScrapeError::io("failed to read", path, e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Scrape phase: scrape the configured page range and persist it.
pub async fn scrape_to_file(config: &ScrapeConfig) -> Result<Vec<ProductRecord>> {
    let pages = config.page_range()?;
    let scraper = PageScraper::new(config.clone())?;
    let records = run(&scraper, pages).await?;
    persist(&records, &config.output_path)?;
    Ok(records)
}
