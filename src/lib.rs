//! The campus_scout library answers questions about one college by routing a query
//! to a handful of its web pages, scraping them, guessing key statistics from the text
//! and aggregating everything into one payload for an LLM.

pub mod aggregate;
pub mod cache;
pub mod constants;
pub mod fetch;
pub mod parse;
pub mod route;
pub mod scrape;
pub mod search;
pub mod stats;
pub mod synthesize;

use std::time::Duration;

use constants::{
    DEFAULT_DELAY_MS, DEFAULT_MAX_PAGES, DEFAULT_SEARCH_ENDPOINT, DEFAULT_SEARCH_LIMIT,
    DEFAULT_SITE,
};

/// Enum representing the main text extraction method.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ExtractBy {
    /// Pick the first matching main-content selector, falling back to the body
    #[default]
    Selectors,
    /// Use dom_smoothie readability extraction
    DomSmoothie,
}

impl std::str::FromStr for ExtractBy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "selectors" => Ok(ExtractBy::Selectors),
            "dom_smoothie" => Ok(ExtractBy::DomSmoothie),
            _ => Err(format!("Invalid text extraction method: {}", input)),
        }
    }
}

/// Runtime knobs shared by the whole pipeline.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Domain every searched and scraped page belongs to
    pub site: String,
    /// Search engine result page queried with `q=site:<site> <query>`
    pub search_endpoint: String,
    /// Maximum number of search results added to a routed list
    pub search_limit: usize,
    /// Maximum number of routed pages scraped per query
    pub max_pages: usize,
    /// Fixed pause before every uncached page request
    pub delay: Duration,
    /// How the main text of a page is located
    pub extract_by: ExtractBy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            extract_by: ExtractBy::default(),
        }
    }
}

pub use aggregate::{AnswerPayload, answer};
pub use cache::PageCache;
pub use fetch::{Fetch, HttpFetcher};
pub use route::route;
pub use scrape::{PageResult, fetch_page};
pub use search::search_site;
pub use stats::{Stat, Stats, extract_stats};
pub use synthesize::synthesize;
