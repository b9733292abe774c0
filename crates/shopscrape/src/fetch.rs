//! Plain HTTP GET of storefront pages.

use crate::error::{Result, ScrapeError};
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches page bodies one request at a time.
///
/// No retries and no timeout: a failure surfaces to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }

    /// GET `url` and return the decoded body, whatever the status.
    ///
    /// Error pages are parsed like any other page, so a 404 listing yields
    /// no products and a 404 detail page yields empty fields. Only transport
    /// and body decode failures are errors.
    pub async fn get_html(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {url} returned HTTP {}", status.as_u16());
        }

        response.text().await.map_err(http_err)
    }
}
