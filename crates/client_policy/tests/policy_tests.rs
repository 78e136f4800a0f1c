//! Tests for the client-side query policy

use std::time::Duration;

use chrono::{TimeZone, Utc};
use client_policy::{
    DehydratedState, QueryCache, QueryState, RetryPolicy, RichValue, DEFAULT_STALE_TIME,
};
use core_kernel::ErrorKind;
use proptest::prelude::*;

#[test]
fn test_default_stale_time_is_five_minutes() {
    assert_eq!(DEFAULT_STALE_TIME, Duration::from_secs(300));
    assert_eq!(QueryCache::new().stale_time(), DEFAULT_STALE_TIME);
}

#[test]
fn test_fresh_value_within_stale_window() {
    let fetched = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut cache = QueryCache::new();
    cache.insert(
        "menus:trattoria-da-enzo",
        QueryState::Success(RichValue::from("carbonara")),
        fetched,
    );

    let just_before = fetched + chrono::Duration::seconds(299);
    assert_eq!(
        cache.fresh_value("menus:trattoria-da-enzo", just_before),
        Some(&RichValue::from("carbonara"))
    );

    let at_boundary = fetched + chrono::Duration::seconds(300);
    assert_eq!(cache.fresh_value("menus:trattoria-da-enzo", at_boundary), None);
}

#[test]
fn test_fresh_value_ignores_pending_and_failed_queries() {
    let fetched = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut cache = QueryCache::new();
    cache.insert("a", QueryState::Pending, fetched);
    cache.insert("b", QueryState::Error(ErrorKind::Engine), fetched);

    assert_eq!(cache.fresh_value("a", fetched), None);
    assert_eq!(cache.fresh_value("b", fetched), None);
}

#[test]
fn test_dehydrate_keeps_success_and_pending_only() {
    let fetched = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut cache = QueryCache::new();
    cache.insert(
        "menus",
        QueryState::Success(RichValue::from(vec!["antipasti", "primi"])),
        fetched,
    );
    cache.insert("reservations", QueryState::Pending, fetched);
    cache.insert("feedback", QueryState::Error(ErrorKind::PoolTimeout), fetched);

    let dehydrated = cache.dehydrate();

    let keys: Vec<&str> = dehydrated.queries.iter().map(|q| q.key.as_str()).collect();
    assert_eq!(keys, vec!["menus", "reservations"]);
}

#[test]
fn test_dehydrated_state_round_trips_rich_types() {
    let fetched = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let opens_at = Utc.with_ymd_and_hms(2026, 5, 1, 18, 0, 0).unwrap();

    let mut cache = QueryCache::new();
    cache.insert(
        "restaurant:hours",
        QueryState::Success(RichValue::map([
            ("opens_at", RichValue::from(opens_at)),
            ("covers", RichValue::from(42i64)),
        ])),
        fetched,
    );
    cache.insert("restaurant:tables", QueryState::Pending, fetched);

    let json = serde_json::to_string(&cache.dehydrate()).unwrap();
    let shipped: DehydratedState = serde_json::from_str(&json).unwrap();

    let hydrated_at = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 30).unwrap();
    let hydrated = QueryCache::hydrate(shipped, hydrated_at);

    assert_eq!(
        hydrated.fresh_value("restaurant:hours", hydrated_at),
        Some(&RichValue::map([
            ("opens_at", RichValue::from(opens_at)),
            ("covers", RichValue::from(42i64)),
        ]))
    );
    assert_eq!(
        hydrated.get("restaurant:tables").map(|q| &q.state),
        Some(&QueryState::Pending)
    );
}

#[test]
fn test_read_path_retry_rules() {
    let reads = RetryPolicy::reads();

    // pool timeouts: up to 2 re-issues
    assert!(reads.should_retry(1, ErrorKind::PoolTimeout));
    assert!(!reads.should_retry(2, ErrorKind::PoolTimeout));
    // statement conflicts: at most once
    assert!(reads.should_retry(0, ErrorKind::StatementConflict));
    assert!(!reads.should_retry(1, ErrorKind::StatementConflict));
    // everything else: up to 3
    assert!(reads.should_retry(2, ErrorKind::Unclassified));
    assert!(!reads.should_retry(3, ErrorKind::Unclassified));
}

#[test]
fn test_write_path_retry_rules() {
    let writes = RetryPolicy::writes();

    assert!(!writes.should_retry(0, ErrorKind::PoolTimeout));
    assert!(!writes.should_retry(0, ErrorKind::StatementConflict));
    assert!(writes.should_retry(0, ErrorKind::Driver));
    assert!(!writes.should_retry(1, ErrorKind::Driver));
}

proptest! {
    /// The backoff never exceeds its 30s ceiling and never shrinks as the
    /// attempt index grows.
    #[test]
    fn prop_delay_capped_and_monotonic(attempt in 0u32..64) {
        let delay = RetryPolicy::delay(attempt);
        prop_assert!(delay <= Duration::from_secs(30));
        prop_assert!(delay >= Duration::from_millis(1000));
        prop_assert!(RetryPolicy::delay(attempt + 1) >= delay);
    }
}
