//! Request building tests: queries + options → SearchRequest → actor input JSON.

use chrono::NaiveDate;
use coverage_core::{
    CoverageError, Recency, RecencyFilter, RelativeRange, RequestBuilder, SafeSearch,
    SearchOptions,
};
use serde_json::json;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn builder() -> RequestBuilder {
    RequestBuilder::on(day(2025, 6, 15))
}

fn assert_validation<T: std::fmt::Debug>(result: Result<T, CoverageError>) {
    match result {
        Err(CoverageError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn query_count_matches_non_empty_lines() {
    let text = "  \"Action Network\" survey \n\n\t\nreport -site:actionnetwork.com\n   ";
    let request = builder().build([text], &SearchOptions::default()).unwrap();

    assert_eq!(request.queries, vec!["\"Action Network\" survey", "report -site:actionnetwork.com"]);
    assert_eq!(request.to_actor_input().query_count(), 2);
}

#[test]
fn query_order_is_preserved() {
    let request = builder()
        .build(vec!["b".to_string(), "a".to_string(), "c".to_string()], &SearchOptions::default())
        .unwrap();
    assert_eq!(request.queries, vec!["b", "a", "c"]);
}

#[test]
fn empty_query_set_is_rejected() {
    assert_validation(builder().build(["", "   ", "\n\n"], &SearchOptions::default()));
    assert_validation(builder().build(Vec::<String>::new(), &SearchOptions::default()));
}

#[test]
fn zero_pages_is_rejected() {
    let options = SearchOptions {
        max_pages_per_query: 0,
        ..Default::default()
    };
    assert_validation(builder().build(["q"], &options));
}

#[test]
fn large_page_counts_are_accepted() {
    let options = SearchOptions {
        max_pages_per_query: 40,
        ..Default::default()
    };
    assert_eq!(builder().build(["q"], &options).unwrap().max_pages_per_query, 40);
}

// ---------------------------------------------------------------------------
// Recency
// ---------------------------------------------------------------------------

#[test]
fn custom_range_with_start_after_end_is_rejected() {
    let options = SearchOptions {
        recency: Recency::Custom,
        custom_start: Some(day(2025, 6, 10)),
        custom_end: Some(day(2025, 6, 1)),
        ..Default::default()
    };
    assert_validation(builder().build(["q"], &options));
}

#[test]
fn custom_range_missing_a_bound_is_rejected() {
    let b = builder();
    assert_validation(b.recency(Recency::Custom, Some(day(2025, 6, 1)), None));
    assert_validation(b.recency(Recency::Custom, None, Some(day(2025, 6, 1))));
    assert_validation(b.recency(Recency::Custom, None, None));
}

#[test]
fn last_48h_ignores_caller_dates() {
    let options = SearchOptions {
        recency: Recency::Last48Hours,
        custom_start: Some(day(2020, 1, 1)),
        custom_end: Some(day(2019, 1, 1)),
        ..Default::default()
    };
    let request = builder().build(["q"], &options).unwrap();

    assert_eq!(
        request.recency,
        Some(RecencyFilter::Window {
            start: day(2025, 6, 13),
            end: day(2025, 6, 15),
        })
    );
}

#[test]
fn last_48h_ends_on_current_date() {
    let request = RequestBuilder::new()
        .build(["q"], &SearchOptions {
            recency: Recency::Last48Hours,
            ..Default::default()
        })
        .unwrap();
    let today = chrono::Local::now().date_naive();

    match request.recency {
        Some(RecencyFilter::Window { start, end }) => {
            // Tolerate a midnight rollover between the two clock reads.
            assert!(end == today || end.succ_opt() == Some(today));
            assert_eq!((end - start).num_days(), 2);
        }
        other => panic!("expected window, got {other:?}"),
    }
}

#[test]
fn dates_are_ignored_unless_custom() {
    let options = SearchOptions {
        recency: Recency::Last7Days,
        custom_start: Some(day(2025, 6, 10)),
        custom_end: Some(day(2025, 6, 1)),
        ..Default::default()
    };
    let request = builder().build(["q"], &options).unwrap();
    assert_eq!(request.recency, Some(RecencyFilter::Relative(RelativeRange::PastWeek)));
}

// ---------------------------------------------------------------------------
// Wire payload
// ---------------------------------------------------------------------------

#[test]
fn minimal_payload_has_only_queries_and_pages() {
    let request = builder().build(["one", "two"], &SearchOptions::default()).unwrap();
    let payload = serde_json::to_value(request.to_actor_input()).unwrap();

    assert_eq!(payload, json!({ "queries": "one\ntwo", "maxPagesPerQuery": 1 }));
}

#[test]
fn full_payload_is_normalized() {
    let options = SearchOptions {
        max_pages_per_query: 3,
        country_code: Some(" US ".into()),
        language_code: Some("EN".into()),
        safe_search: Some(SafeSearch::Off),
        recency: Recency::Last12Months,
        ..Default::default()
    };
    let request = builder().build(["q"], &options).unwrap();
    let payload = serde_json::to_value(request.to_actor_input()).unwrap();

    assert_eq!(
        payload,
        json!({
            "queries": "q",
            "maxPagesPerQuery": 3,
            "countryCode": "us",
            "languageCode": "en",
            "safeSearch": "off",
            "quickDateRange": "y1"
        })
    );
}

#[test]
fn custom_window_is_sent_as_after_and_before() {
    let options = SearchOptions {
        recency: Recency::Custom,
        custom_start: Some(day(2025, 1, 2)),
        custom_end: Some(day(2025, 2, 3)),
        ..Default::default()
    };
    let payload = serde_json::to_value(builder().build(["q"], &options).unwrap().to_actor_input()).unwrap();

    assert_eq!(payload["afterDate"], "2025-01-02");
    assert_eq!(payload["beforeDate"], "2025-02-03");
    assert!(payload.get("quickDateRange").is_none());
}

#[test]
fn blank_country_is_omitted() {
    let options = SearchOptions {
        country_code: Some("   ".into()),
        ..Default::default()
    };
    let payload = serde_json::to_value(builder().build(["q"], &options).unwrap().to_actor_input()).unwrap();
    assert!(payload.get("countryCode").is_none());
}
