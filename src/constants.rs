pub const MODEL_API_KEY_ENV_NAME: &str = "CAMPUS_SCOUT_MODEL_API_KEY";

pub const DEFAULT_SITE: &str = "lafayette.edu";

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";

pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub(crate) const PAGE_TIMEOUT_SECS: u64 = 15;

pub(crate) const SEARCH_TIMEOUT_SECS: u64 = 10;

/// Extracted page text is cut to this many characters, without an ellipsis.
pub const MAX_TEXT_CHARS: usize = 25_000;

pub const CACHE_TTL_HOURS: i64 = 24;

pub const DEFAULT_SEARCH_LIMIT: usize = 4;

pub const DEFAULT_MAX_PAGES: usize = 7;

pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Routed lists shorter than this get the fallback pages appended.
pub(crate) const MIN_ROUTED_URLS: usize = 3;

pub const NO_DATA_FALLBACK: &str =
    "No relevant information found on Lafayette College website.";

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

/// Pages with the most numeric facts; every routed list starts with them.
pub const STATISTICS_PAGES: &[&str] = &[
    "https://about.lafayette.edu/lafayette-at-a-glance/",
    "https://about.lafayette.edu/facts-and-figures/",
];

pub const FALLBACK_PAGES: &[&str] = &[
    "https://admissions.lafayette.edu/",
    "https://academics.lafayette.edu/",
    "https://about.lafayette.edu/",
];

/// Noise removed before any text is read.
pub(crate) const NOISE_SELECTOR: &str = "script, style, noscript, nav, footer";

/// Tried in order; the first one present in the page is the main content.
pub(crate) const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "#main-content",
    ".main-content",
    "#content",
    ".content",
    ".entry-content",
    "article",
];

pub(crate) const DEFAULT_PROMPT_TEMPLATE: &str = r#"
You are the official Lafayette College information assistant.
Answer only questions about Lafayette College. If the question is about something else,
politely ask for a Lafayette-related question instead.
Use the website content and the extracted figures below. Figures marked as guesses were
pulled from page text automatically and may be wrong, so prefer figures stated in the content.
If the content does not answer the question, say so and suggest visiting lafayette.edu
or contacting the admissions office.

EXTRACTED FIGURES:
{stats}

SOURCES:
{sources}

WEBSITE CONTENT:
{text}

QUESTION: {question}"#;
