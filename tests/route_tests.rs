use campus_scout::constants::{FALLBACK_PAGES, STATISTICS_PAGES};
use campus_scout::route::{Topic, matched_topics, plan_urls};
use campus_scout::{Settings, route};
use spectral::prelude::*;

use crate::support::{StubFetcher, quick_settings};

mod support;

fn owned(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|url| url.to_string()).collect()
}

#[test]
fn admissions_pages_follow_statistics_pages_in_order() {
    let urls = plan_urls("When is the application deadline?", &[]);

    let mut expected = owned(STATISTICS_PAGES);
    expected.extend(owned(Topic::Admissions.urls()));
    assert_that(&urls).is_equal_to(expected);
}

#[test]
fn topic_pages_are_added_once_per_topic() {
    let urls = plan_urls("admission application deadline requirement apply", &[]);

    assert_that(&urls.len()).is_equal_to(STATISTICS_PAGES.len() + Topic::Admissions.urls().len());
}

#[test]
fn duplicates_keep_their_first_position() {
    let searched = owned(&[
        "https://admissions.lafayette.edu/apply/",
        "https://news.lafayette.edu/story/",
        "https://news.lafayette.edu/story/",
    ]);
    let urls = plan_urls("overview of the history", &searched);

    let mut expected = owned(STATISTICS_PAGES);
    expected.extend(owned(&[
        "https://about.lafayette.edu/",
        "https://about.lafayette.edu/mission-and-history/",
        "https://about.lafayette.edu/why-not/",
        "https://admissions.lafayette.edu/apply/",
        "https://news.lafayette.edu/story/",
    ]));
    assert_that(&urls).is_equal_to(expected);
}

#[test]
fn unrelated_query_gets_fallback_pages() {
    let urls = plan_urls("xyzzy", &[]);

    let mut expected = owned(STATISTICS_PAGES);
    expected.extend(owned(FALLBACK_PAGES));
    assert_that(&urls).is_equal_to(expected);
}

#[test]
fn keywords_match_inside_words() {
    assert_that(&matched_topics("Do I need a visa?")).is_equal_to(vec![Topic::Admissions]);
    assert_that(&matched_topics("Is ED binding?")).is_equal_to(vec![Topic::Admissions]);

    let urls = plan_urls("Do I need a visa?", &[]);

    let mut expected = owned(STATISTICS_PAGES);
    expected.extend(owned(Topic::Admissions.urls()));
    assert_that(&urls).is_equal_to(expected);
}

#[test]
fn several_topics_keep_table_order() {
    let topics = matched_topics("Who is the president and what does tuition cost?");

    assert_that(&topics).is_equal_to(vec![Topic::FinancialAid, Topic::President]);
}

#[tokio::test]
async fn search_results_are_appended_up_to_the_limit() {
    let fetcher = StubFetcher::new().with_search_page(
        r#"<a href="/url?q=https://news.lafayette.edu/a/&sa=U">A</a>
           <a href="/url?q=https://news.lafayette.edu/b/&sa=U">B</a>
           <a href="/url?q=https://news.lafayette.edu/c/&sa=U">C</a>"#,
    );
    let settings = Settings {
        search_limit: 2,
        ..quick_settings()
    };

    let urls = route(&fetcher, &settings, "president").await;

    let mut expected = owned(STATISTICS_PAGES);
    expected.extend(owned(&[
        "https://president.lafayette.edu/",
        "https://news.lafayette.edu/a/",
        "https://news.lafayette.edu/b/",
    ]));
    assert_that(&urls).is_equal_to(expected);
}

#[tokio::test]
async fn failed_search_still_routes() {
    let fetcher = StubFetcher::new();

    let urls = route(&fetcher, &quick_settings(), "xyzzy").await;

    assert_that(&urls.len()).is_equal_to(STATISTICS_PAGES.len() + FALLBACK_PAGES.len());
    assert_that(&fetcher.requests().len()).is_equal_to(1);
}
