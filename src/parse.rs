use crate::ExtractBy;
use crate::constants::{MAIN_CONTENT_SELECTORS, MAX_TEXT_CHARS, NOISE_SELECTOR};

use anyhow::Result;
use dom_smoothie::{Article, CandidateSelectMode, Config, Readability, TextMode};
use log::debug;
use scraper::{ElementRef, Html, Selector as ScraperSelector};

/// Extracts the visible main text of a page.
///
/// Script, style and navigation markup is removed first, whichever method is used.
/// The text has its whitespace collapsed to single spaces and is cut to
/// [`MAX_TEXT_CHARS`] characters.
///
/// # Arguments
///
/// * `html` - The raw HTML of the page.
/// * `extract_by` - The method used to locate the main content.
///
/// # Errors
///
/// This function will return an error if dom_smoothie is selected and fails to
/// parse the document. Selector extraction never fails.
pub fn extract_main_text(html: &str, extract_by: ExtractBy) -> Result<String> {
    let mut document = Html::parse_document(html);
    strip_noise(&mut document);

    let raw_text = match extract_by {
        ExtractBy::Selectors => main_content_text(&document),
        ExtractBy::DomSmoothie => {
            // Plain text: markdown emphasis and escapes would split figures from their labels.
            let config = Config {
                text_mode: TextMode::Formatted,
                candidate_select_mode: CandidateSelectMode::DomSmoothie,
                ..Default::default()
            };

            let stripped_html = document.html();
            let mut readability = Readability::new(stripped_html.as_str(), None, Some(config))?;
            let article: Article = readability.parse()?;
            article.text_content.to_string()
        }
    };

    Ok(truncate_chars(collapse_whitespace(&raw_text), MAX_TEXT_CHARS))
}

/// Detaches script, style and navigation subtrees so their text is never read.
fn strip_noise(document: &mut Html) {
    let Ok(noise_selector) = ScraperSelector::parse(NOISE_SELECTOR) else {
        return;
    };

    let noise_ids: Vec<_> = document
        .select(&noise_selector)
        .map(|element| element.id())
        .collect();

    for id in noise_ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Text of the first non-empty main content candidate, else of the body.
fn main_content_text(document: &Html) -> String {
    for query in MAIN_CONTENT_SELECTORS {
        if let Ok(selector) = ScraperSelector::parse(query)
            && let Some(element) = document.select(&selector).next()
        {
            let text = element_text(element);
            if !text.trim().is_empty() {
                debug!("Main content found with {query}");
                return text;
            }
        }
    }

    if let Ok(body_selector) = ScraperSelector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return element_text(body);
    }

    element_text(document.root_element())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_index);
    }
    text
}
