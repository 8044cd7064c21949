//! The aggregate module drives one question through routing and scraping and
//! merges the surviving pages into a single payload.

use log::{debug, info};
use serde_json::{Value, json};

use crate::Settings;
use crate::cache::PageCache;
use crate::constants::NO_DATA_FALLBACK;
use crate::fetch::Fetch;
use crate::route::route;
use crate::scrape::{PageResult, fetch_page};
use crate::stats::Stats;

/// Everything the LLM needs to answer one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerPayload {
    pub combined_text: String,
    pub stats: Stats,
    pub sources: Vec<String>,
}

impl AnswerPayload {
    fn no_data() -> Self {
        Self {
            combined_text: NO_DATA_FALLBACK.to_string(),
            stats: Stats::new(),
            sources: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Value {
        let stats: serde_json::Map<String, Value> = self
            .stats
            .iter()
            .map(|(stat, value)| (stat.key().to_string(), Value::from(value.as_str())))
            .collect();

        json!({
            "combined_text": self.combined_text,
            "stats": stats,
            "sources": self.sources,
        })
    }
}

/// Routes `query`, scrapes up to `settings.max_pages` of the routed pages in order
/// and merges them.
///
/// Failed or empty pages are left out. When nothing survives, the payload carries
/// the fixed fallback sentence with no stats and no sources.
pub async fn answer<F: Fetch>(
    fetcher: &F,
    cache: &mut PageCache,
    settings: &Settings,
    query: &str,
) -> AnswerPayload {
    let urls = route(fetcher, settings, query).await;

    let mut pages = Vec::with_capacity(settings.max_pages.min(urls.len()));
    for url in urls.iter().take(settings.max_pages) {
        pages.push(fetch_page(fetcher, cache, settings, url).await);
    }

    merge_pages(pages)
}

/// Merges pages in scrape order. The first page to report a statistic keeps it.
pub fn merge_pages(pages: Vec<PageResult>) -> AnswerPayload {
    let mut sections = Vec::new();
    let mut stats = Stats::new();
    let mut sources = Vec::new();

    for page in pages {
        if page.text.is_empty() {
            debug!("Dropping {} from the answer", page.url);
            continue;
        }

        for (stat, value) in page.stats {
            stats.entry(stat).or_insert(value);
        }
        sections.push(format!("From {}:\n{}\n", page.url, page.text));
        sources.push(page.url);
    }

    if sources.is_empty() {
        info!("No page produced any text");
        return AnswerPayload::no_data();
    }

    info!(
        "Aggregated {} pages with {} statistic guesses",
        sources.len(),
        stats.len()
    );

    AnswerPayload {
        combined_text: sections.join("\n\n"),
        stats,
        sources,
    }
}
