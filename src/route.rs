//! The route module turns a free-text question into an ordered list of pages worth scraping.

use log::info;

use crate::Settings;
use crate::constants::{FALLBACK_PAGES, MIN_ROUTED_URLS, STATISTICS_PAGES};
use crate::fetch::Fetch;
use crate::search::search_site;

/// Topic buckets with curated pages.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Topic {
    Admissions,
    FinancialAid,
    Academics,
    CampusLife,
    About,
    President,
}

impl Topic {
    /// Curated pages of the topic, in priority order.
    pub fn urls(self) -> &'static [&'static str] {
        match self {
            Topic::Admissions => &[
                "https://admissions.lafayette.edu/",
                "https://admissions.lafayette.edu/what-we-look-for/",
                "https://admissions.lafayette.edu/apply/",
                "https://admissions.lafayette.edu/deadlines-and-forms/",
                "https://admissions.lafayette.edu/admissions-visits/",
            ],
            Topic::FinancialAid => &[
                "https://admissions.lafayette.edu/financial-aid/",
                "https://admissions.lafayette.edu/college-costs/",
            ],
            Topic::Academics => &[
                "https://academics.lafayette.edu/",
                "https://academics.lafayette.edu/departments-programs/",
            ],
            Topic::CampusLife => &["https://campuslife.lafayette.edu/"],
            Topic::About => &[
                "https://about.lafayette.edu/",
                "https://about.lafayette.edu/lafayette-at-a-glance/",
                "https://about.lafayette.edu/mission-and-history/",
                "https://about.lafayette.edu/why-not/",
            ],
            Topic::President => &["https://president.lafayette.edu/"],
        }
    }
}

/// Topics in the order their pages are appended, with their trigger keywords.
pub const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Admissions,
        &[
            "admission",
            "apply",
            "application",
            "deadline",
            "requirement",
            "ed",
            "early decision",
            "regular decision",
        ],
    ),
    (
        Topic::FinancialAid,
        &[
            "financial",
            "aid",
            "scholarship",
            "cost",
            "tuition",
            "money",
            "grant",
        ],
    ),
    (
        Topic::Academics,
        &[
            "academic",
            "major",
            "program",
            "course",
            "department",
            "study",
            "curriculum",
        ],
    ),
    (
        Topic::CampusLife,
        &[
            "campus",
            "life",
            "student",
            "housing",
            "dining",
            "club",
            "organization",
        ],
    ),
    (
        Topic::About,
        &["about", "history", "mission", "overview", "glance", "why"],
    ),
    (Topic::President, &["president"]),
];

/// Topics triggered by `query`, each at most once, in table order.
pub fn matched_topics(query: &str) -> Vec<Topic> {
    let query_lower = query.to_lowercase();

    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| query_lower.contains(keyword))
        })
        .map(|(topic, _)| *topic)
        .collect()
}

/// Combines statistics pages, topic pages and search results into one deduplicated list.
///
/// Fallback pages are appended when fewer than three candidates were gathered.
pub fn plan_urls(query: &str, searched: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = STATISTICS_PAGES.iter().map(|url| url.to_string()).collect();

    for topic in matched_topics(query) {
        candidates.extend(topic.urls().iter().map(|url| url.to_string()));
    }

    candidates.extend(searched.iter().cloned());

    if candidates.len() < MIN_ROUTED_URLS {
        candidates.extend(FALLBACK_PAGES.iter().map(|url| url.to_string()));
    }

    dedup_preserving_order(candidates)
}

fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(urls.len());
    for url in urls {
        if !unique.contains(&url) {
            unique.push(url);
        }
    }
    unique
}

/// Produces the prioritized page list for `query`, consulting the search engine.
pub async fn route<F: Fetch>(fetcher: &F, settings: &Settings, query: &str) -> Vec<String> {
    let searched = search_site(fetcher, settings, query, settings.search_limit).await;
    let urls = plan_urls(query, &searched);

    info!("Routed {query:?} to {} pages", urls.len());
    urls
}
