//! The scrape module downloads one page at a time, reduces it to plain text
//! and annotates it with statistic guesses.

use std::time::Duration;

use log::{info, warn};

use crate::Settings;
use crate::cache::PageCache;
use crate::constants::PAGE_TIMEOUT_SECS;
use crate::fetch::Fetch;
use crate::parse::extract_main_text;
use crate::stats::{Stats, extract_stats};

/// Outcome of scraping one URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    /// Collapsed main text, at most 25 000 characters. Empty when `error` is set.
    pub text: String,
    pub stats: Stats,
    pub error: Option<String>,
}

impl PageResult {
    fn failed(url: &str, error: &anyhow::Error) -> Self {
        Self {
            url: url.to_string(),
            text: String::new(),
            stats: Stats::new(),
            error: Some(format!("{error:#}")),
        }
    }
}

/// Scrapes `url`, serving it from `cache` while the cached copy is fresh.
///
/// Failures never propagate: they come back as a [`PageResult`] with an empty
/// text and `error` set, and they are not cached.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the request
/// * `cache` - Page cache consulted first and filled on success
/// * `settings` - Supplies the pause before the request and the extraction method
/// * `url` - Page to scrape
pub async fn fetch_page<F: Fetch>(
    fetcher: &F,
    cache: &mut PageCache,
    settings: &Settings,
    url: &str,
) -> PageResult {
    if let Some(page) = cache.get(url) {
        return page;
    }

    if !settings.delay.is_zero() {
        tokio::time::sleep(settings.delay).await;
    }

    let html = match fetcher
        .get_html(url, Duration::from_secs(PAGE_TIMEOUT_SECS))
        .await
    {
        Ok(html) => html,
        Err(error) => {
            warn!("Error scraping {url}: {error:#}");
            return PageResult::failed(url, &error);
        }
    };

    let text = match extract_main_text(&html, settings.extract_by) {
        Ok(text) => text,
        Err(error) => {
            warn!("Error extracting text from {url}: {error:#}");
            return PageResult::failed(url, &error);
        }
    };

    let stats = extract_stats(&text);
    info!(
        "Scraped {url}: {} characters, {} statistic guesses",
        text.chars().count(),
        stats.len()
    );

    let page = PageResult {
        url: url.to_string(),
        text,
        stats,
        error: None,
    };
    cache.put(url, page.clone());

    page
}
