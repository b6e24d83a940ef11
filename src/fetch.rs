use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Source of page bodies. The HTTP client in production, canned pages in tests.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Bad status from {}", url))?;
        response
            .text()
            .with_context(|| format!("Failed to read body of {}", url))
    }
}
