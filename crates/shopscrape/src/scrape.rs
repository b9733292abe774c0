//! Listing-page scraping.
//!
//! One listing page fans out into one detail fetch per product, strictly in
//! document order and one request at a time.

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extract::{extract, parse_selector, ListingItem};
use crate::fetch::HttpFetcher;
use crate::record::ProductRecord;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn product_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| parse_selector("main ul.products li.product"))
}

/// Read every product card of a listing page, in document order.
pub fn parse_listing(html: &str) -> Vec<ListingItem> {
    let document = Html::parse_document(html);
    document
        .select(product_selector())
        .map(ListingItem::from_element)
        .collect()
}

/// Scrapes listing pages and their products' detail pages.
pub struct PageScraper {
    config: ScrapeConfig,
    fetcher: HttpFetcher,
}

impl PageScraper {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        Ok(Self {
            config,
            fetcher: HttpFetcher::new()?,
        })
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Scrape listing page `page` into records.
    ///
    /// A page without product cards is logged and yields an empty vector.
    /// Error statuses are parsed like any other page. A transport failure,
    /// on the listing or on a detail page, aborts the whole page.
    pub async fn scrape_page(&self, page: u32) -> Result<Vec<ProductRecord>> {
        let url = self.config.listing_url(page);
        let body = self.fetcher.get_html(&url).await?;
        let items = parse_listing(&body);

        if items.is_empty() {
            warn!("No items found on page {page}");
            return Ok(Vec::new());
        }
        info!("page {page}: {} products", items.len());

        let mut records = Vec::with_capacity(items.len());
        for item in &items {
            let detail_url = self.config.detail_url(&item.name);
            let body = self.fetcher.get_html(&detail_url).await?;

            let record = {
                let detail = Html::parse_document(&body);
                extract(item, &detail)
            };
            debug!(
                name = %record.name,
                quantity = record.quantity,
                "extracted product"
            );
            records.push(record);
        }

        Ok(records)
    }
}
