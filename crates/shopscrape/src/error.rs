//! Error type shared by every stage of the pipeline.
//!
//! Only fatal conditions live here. Missing selectors, unparsable quantities,
//! empty listing pages and non-success HTTP statuses are not errors; they
//! degrade to empty values.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Fatal failures. Any of these halts the run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure, or a body that could not be decoded.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Chart rasterization or PNG encoding failed.
    #[error("failed to render chart {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid page range: first page {first} is after last page {last}")]
    InvalidPageRange { first: u32, last: u32 },
}

impl ScrapeError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
