//! Run configuration.
//!
//! Every constant the pipeline depends on lives in [`ScrapeConfig`]. The
//! `Default` value targets the live storefront and writes next to the
//! current directory.

use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Storefront root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://scrapeme.live";

/// Default JSON output file.
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";

/// Settings for one scrape-and-chart run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Storefront root, without a trailing slash.
    pub base_url: String,
    /// First listing page, inclusive.
    pub first_page: u32,
    /// Last listing page, inclusive.
    pub last_page: u32,
    /// Where the record array is written and later reloaded from.
    pub output_path: PathBuf,
    /// Directory receiving the four chart PNGs.
    pub chart_dir: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            first_page: 1,
            last_page: 2,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            chart_dir: PathBuf::from("."),
        }
    }
}

impl ScrapeConfig {
    /// Config pointing at a different storefront root (e.g. a local mock).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// The inclusive page range, rejecting `first_page > last_page`.
    pub fn page_range(&self) -> Result<RangeInclusive<u32>> {
        if self.first_page > self.last_page {
            return Err(ScrapeError::InvalidPageRange {
                first: self.first_page,
                last: self.last_page,
            });
        }
        Ok(self.first_page..=self.last_page)
    }

    /// URL of listing page `page`.
    pub fn listing_url(&self, page: u32) -> String {
        format!("{}/shop/page/{page}", self.base_url)
    }

    /// URL of a product's detail page.
    ///
    /// The name is spliced in as-is, without percent-encoding.
    pub fn detail_url(&self, name: &str) -> String {
        format!("{}/shop/{name}", self.base_url)
    }
}
