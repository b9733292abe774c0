//! shopscrape: scrape a paginated WooCommerce storefront into normalized
//! product records, persist them as JSON, and render summary charts.
//!
//! The run has two phases that can be invoked independently:
//!
//! 1. [`pipeline::scrape_to_file`]: listing pages → detail pages →
//!    [`ProductRecord`]s → pretty-printed JSON array.
//! 2. [`charts::generate_charts`]: JSON array → four PNG charts.

pub mod charts;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod scrape;

pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use record::ProductRecord;
pub use scrape::PageScraper;
