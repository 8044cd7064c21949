//! The fetch module is the only place that talks to the network.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::trace;

use crate::constants::BROWSER_USER_AGENT;

/// Something able to download a page as text.
pub trait Fetch {
    /// Downloads `url` and returns its body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout or a non-success status.
    fn get_html(&self, url: &str, timeout: Duration) -> impl Future<Output = Result<String>>;
}

/// Fetches pages over HTTP with a browser-like User-Agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .context("Unable to build HTTP client")?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get_html(&self, url: &str, timeout: Duration) -> Result<String> {
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{url} responded with {status}");
        }

        response
            .text()
            .await
            .with_context(|| format!("Unable to read body of {url}"))
    }
}
