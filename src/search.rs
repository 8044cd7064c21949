//! The search module asks a public search engine for pages of the site that
//! match a free-text query.

use std::time::Duration;

use anyhow::Result;
use log::{debug, warn};
use scraper::{Html, Selector as ScraperSelector};
use url::Url;

use crate::Settings;
use crate::constants::SEARCH_TIMEOUT_SECS;
use crate::fetch::Fetch;

/// Builds the result page URL for `site:<site> <query>`.
///
/// # Errors
///
/// Returns an error if `endpoint` is not an absolute URL.
pub fn search_request_url(endpoint: &str, site: &str, query: &str) -> Result<Url> {
    Ok(Url::parse_with_params(
        endpoint,
        &[("q", format!("site:{site} {query}"))],
    )?)
}

/// Returns up to `limit` distinct site URLs found for `query`, in result order.
///
/// Any failure is logged and yields an empty list.
pub async fn search_site<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    query: &str,
    limit: usize,
) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }

    let request_url = match search_request_url(&settings.search_endpoint, &settings.site, query)
    {
        Ok(request_url) => request_url,
        Err(error) => {
            warn!("Invalid search endpoint {}: {error}", settings.search_endpoint);
            return Vec::new();
        }
    };

    match fetcher
        .get_html(request_url.as_str(), Duration::from_secs(SEARCH_TIMEOUT_SECS))
        .await
    {
        Ok(html) => {
            let urls = parse_result_links(&html, &request_url, &settings.site, limit);
            debug!("Search for {query:?} returned {} site links", urls.len());
            urls
        }
        Err(error) => {
            warn!("Search for {query:?} failed: {error:#}");
            Vec::new()
        }
    }
}

/// Collects site links from a result page, unwrapping redirect links on the way.
///
/// # Arguments
///
/// * `html` - Result page markup
/// * `base` - URL the page was served from, used to resolve relative links
/// * `site` - Domain the links must belong to, subdomains included
/// * `limit` - Maximum number of links returned
pub fn parse_result_links(html: &str, base: &Url, site: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchor_selector) = ScraperSelector::parse("a[href]") else {
        return Vec::new();
    };

    let mut urls: Vec<String> = Vec::new();
    let hrefs = document
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"));

    for href in hrefs {
        if urls.len() >= limit {
            break;
        }

        let Some(url) = resolve_result_link(href, base, site) else {
            continue;
        };
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    urls
}

/// Resolves one anchor `href` to a destination on `site`, if it points there.
pub fn resolve_result_link(href: &str, base: &Url, site: &str) -> Option<String> {
    let link = base.join(href).ok()?;
    let destination = match unwrap_redirect(&link) {
        Some(target) => Url::parse(&target).ok()?,
        None => link,
    };

    if !matches!(destination.scheme(), "http" | "https") {
        return None;
    }

    let host = destination.host_str()?;
    let on_site = host == site || host.ends_with(&format!(".{site}"));

    on_site.then(|| destination.to_string())
}

/// Recovers the target of a search engine redirect link.
///
/// Google wraps results as `/url?q=<target>&sa=...`, DuckDuckGo as
/// `/l/?uddg=<target>&rut=...`.
fn unwrap_redirect(link: &Url) -> Option<String> {
    let keys: &[&str] = if link.path() == "/url" {
        &["q", "url"]
    } else {
        &["uddg"]
    };

    link.query_pairs()
        .find(|(key, _)| keys.iter().any(|wanted| key == wanted))
        .map(|(_, value)| value.into_owned())
}
