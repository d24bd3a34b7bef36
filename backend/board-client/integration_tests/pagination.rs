use crate::helpers::{ITEMS_PATH, TestBackend, item_ids};

use board_client::catalog;
use board_client::error::FailureKind;
use board_client::{PageLoad, PageStatus, PaginatedFetcher};

use common::HttpStatusCode;
use models::PageLimit;
use models::employer::{CostCenterFilter, CostCenterState};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const ITEMS_ROUTE: &str = "/hub/list-items";

async fn mount_page(
    backend: &TestBackend,
    request: serde_json::Value,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path(ITEMS_ROUTE))
        .and(body_json(request))
        .respond_with(response)
        .expect(expected_calls)
        .mount(&backend.server)
        .await;
}

// ============================================
// HAPPY PATH
// ============================================

/// **VALUE**: Walking a list to the end fetches each page once, in order, and stops.
///
/// **WHY THIS MATTERS**: This is the whole point of the fetcher. The screen calls
/// `load_next` on scroll and must end with every item exactly once.
///
/// **BUG THIS CATCHES**: Would catch a continuation key not being sent, pages appended out of
/// order, or a request issued after the final page.
#[tokio::test]
async fn given_two_pages_when_loaded_to_end_then_items_in_order_and_no_more() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "1"}],
            "pagination_key": "k1"
        })),
        1,
    )
    .await;
    mount_page(
        &backend,
        json!({"pagination_key": "k1", "limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "2"}],
            "pagination_key": null
        })),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);

    let first = fetcher.load_next().await;
    assert!(matches!(first, PageLoad::Loaded(_)));
    assert_eq!(first.state().continuation_key(), Some("k1"));
    assert!(first.state().has_more());

    let second = fetcher.load_next().await;
    assert!(matches!(second, PageLoad::Loaded(_)));

    let third = fetcher.load_next().await;
    assert!(matches!(third, PageLoad::Skipped(_)));

    let state = fetcher.state();
    assert_eq!(item_ids(state.items()), vec!["1", "2"]);
    assert!(!state.has_more());
    assert_eq!(state.continuation_key(), None);
    assert_eq!(state.status(), PageStatus::Idle);
}

/// **VALUE**: Bare-array pages resume from the last item and stop on a short batch.
///
/// **BUG THIS CATCHES**: Would catch the key being taken from the first item, or a full final
/// batch being mistaken for the end.
#[tokio::test]
async fn given_keyed_array_pages_when_loaded_to_end_then_items_concatenate() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}, {"id": "b"}])),
        1,
    )
    .await;
    mount_page(
        &backend,
        json!({"pagination_key": "b", "limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!([{"id": "c"}, {"id": "d"}])),
        1,
    )
    .await;
    mount_page(
        &backend,
        json!({"pagination_key": "d", "limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!([{"id": "e"}])),
        1,
    )
    .await;
    let fetcher = backend.keyed_fetcher(2);

    for _ in 0..3 {
        assert!(matches!(fetcher.load_next().await, PageLoad::Loaded(_)));
    }
    assert!(matches!(fetcher.load_next().await, PageLoad::Skipped(_)));

    let state = fetcher.state();
    assert_eq!(item_ids(state.items()), vec!["a", "b", "c", "d", "e"]);
    assert!(!state.has_more());
}

#[tokio::test]
async fn given_filter_when_loading_then_filter_fields_sent_with_pagination() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/employer/get-cost-centers"))
        .and(body_json(json!({"states": ["ACTIVE_CC"], "limit": 5})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "Ops", "state": "ACTIVE_CC"}])),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    let fetcher = PaginatedFetcher::new(
        backend.guard.clone(),
        catalog::cost_centers(),
        PageLimit::new(5).expect("valid page size"),
        CostCenterFilter {
            states: vec![CostCenterState::Active],
        },
    );

    let load = fetcher.load_next().await;

    assert!(matches!(load, PageLoad::Loaded(_)));
    assert_eq!(load.state().items()[0].name, "Ops");
    assert!(!load.state().has_more());
}

// ============================================
// FAILURES
// ============================================

/// **VALUE**: A failed page leaves the items and key exactly as they were.
///
/// **WHY THIS MATTERS**: The user has already scrolled through the loaded items. A transient
/// 500 must show an error, not blank the list or skip a page on retry.
///
/// **BUG THIS CATCHES**: Would catch items being cleared, or the key advanced, on failure.
#[tokio::test]
async fn given_loaded_page_when_next_page_fails_then_items_kept_and_error_set() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "a"}, {"id": "b"}],
            "pagination_key": "k1"
        })),
        1,
    )
    .await;
    mount_page(
        &backend,
        json!({"pagination_key": "k1", "limit": 2}),
        ResponseTemplate::new(500),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);
    assert!(matches!(fetcher.load_next().await, PageLoad::Loaded(_)));

    let load = fetcher.load_next().await;

    assert!(matches!(load, PageLoad::Failed(_)));
    let state = load.state();
    assert_eq!(item_ids(state.items()), vec!["a", "b"]);
    assert_eq!(state.continuation_key(), Some("k1"));
    assert!(state.has_more());
    assert!(!state.is_loading());
    assert_eq!(state.status(), PageStatus::Errored);
    assert_eq!(
        state.last_error().map(|e| e.kind()),
        Some(FailureKind::HttpError(HttpStatusCode(500)))
    );
    assert!(backend.session.is_authenticated().await);
}

#[tokio::test]
async fn given_failed_page_when_load_next_again_then_same_key_retried() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path(ITEMS_ROUTE))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path(ITEMS_ROUTE))
        .and(body_json(json!({"limit": 2})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": "a"}]})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    let fetcher = backend.envelope_fetcher(2);

    assert!(matches!(fetcher.load_next().await, PageLoad::Failed(_)));
    let retried = fetcher.load_next().await;

    assert!(matches!(retried, PageLoad::Loaded(_)));
    assert_eq!(item_ids(retried.state().items()), vec!["a"]);
    assert!(retried.state().last_error().is_none());
}

#[tokio::test]
async fn given_malformed_page_when_loaded_then_parse_error_and_items_untouched() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!({"posts": []})),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);

    let load = fetcher.load_next().await;

    assert!(matches!(load, PageLoad::Failed(_)));
    assert!(load.state().is_empty());
    assert_eq!(
        load.state().last_error().map(|e| e.kind()),
        Some(FailureKind::ParseError)
    );
}

/// **VALUE**: A 401 mid-list redirects to login and leaves the list as it was.
///
/// **BUG THIS CATCHES**: Would catch the fetcher recording the expiry as an ordinary error
/// (showing a banner instead of navigating) or discarding the loaded items.
#[tokio::test]
async fn given_expired_session_when_loading_then_unauthenticated_and_redirected() {
    let backend = TestBackend::signed_in().await;
    mount_page(&backend, json!({"limit": 2}), ResponseTemplate::new(401), 1).await;
    let fetcher = backend.envelope_fetcher(2);

    let load = fetcher.load_next().await;

    assert!(load.is_unauthenticated());
    assert!(load.state().last_error().is_none());
    assert!(!load.state().is_loading());
    assert!(backend.session.is_expired().await);
    assert_eq!(backend.navigator.redirects(), vec!["/login".to_string()]);
}

// ============================================
// GUARDS
// ============================================

/// **VALUE**: Two overlapping `load_next` calls issue exactly one request.
///
/// **WHY THIS MATTERS**: Scroll handlers fire repeatedly while a page is in flight. Two
/// requests with the same key would append the same page twice.
///
/// **BUG THIS CATCHES**: Would catch `is_loading` being set after the first await.
#[tokio::test]
async fn given_load_in_flight_when_load_next_called_again_then_second_call_skipped() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200)
            .set_body_json(json!({"items": [{"id": "a"}], "pagination_key": "k1"}))
            .set_delay(Duration::from_millis(300)),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);
    let scroll_handler = fetcher.clone();

    let (first, second) = tokio::join!(fetcher.load_next(), scroll_handler.load_next());

    let (loaded, skipped) = match (first, second) {
        (PageLoad::Loaded(loaded), PageLoad::Skipped(skipped))
        | (PageLoad::Skipped(skipped), PageLoad::Loaded(loaded)) => (loaded, skipped),
        other => panic!("expected one load and one skip, got {other:?}"),
    };
    assert!(skipped.is_loading());
    assert!(skipped.is_empty());
    assert_eq!(item_ids(loaded.items()), vec!["a"]);
    assert_eq!(item_ids(fetcher.state().items()), vec!["a"]);
}

#[tokio::test]
async fn given_exhausted_list_when_load_next_then_no_request() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!({"items": [], "pagination_key": null})),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);
    assert!(matches!(fetcher.load_next().await, PageLoad::Loaded(_)));

    let before = fetcher.state();
    let load = fetcher.load_next().await;

    assert!(matches!(load, PageLoad::Skipped(_)));
    assert_eq!(load.into_state(), before);
}

// ============================================
// RESET AND DETACH
// ============================================

#[tokio::test]
async fn given_loaded_list_when_reset_then_starts_over_from_first_page() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": "a"}]})),
        2,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);
    assert!(matches!(fetcher.load_next().await, PageLoad::Loaded(_)));
    assert!(!fetcher.state().has_more());

    fetcher.reset(Default::default());
    let fresh = fetcher.state();
    assert!(fresh.is_empty());
    assert!(fresh.has_more());

    let reloaded = fetcher.load_next().await;
    assert_eq!(item_ids(reloaded.state().items()), vec!["a"]);
}

/// **VALUE**: A page that lands after `reset` is dropped instead of appended.
///
/// **WHY THIS MATTERS**: Changing a filter resets the list while the old page is in flight.
/// Appending it would mix results for two different filters.
///
/// **BUG THIS CATCHES**: Would catch the generation check being skipped.
#[tokio::test]
async fn given_load_in_flight_when_reset_then_stale_page_discarded() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200)
            .set_body_json(json!({"items": [{"id": "stale"}], "pagination_key": "k1"}))
            .set_delay(Duration::from_millis(300)),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);
    let in_flight = fetcher.clone();
    let handle = tokio::spawn(async move { in_flight.load_next().await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    fetcher.reset(Default::default());
    let load = handle.await.expect("load task");

    assert!(matches!(load, PageLoad::Discarded(_)));
    let state = fetcher.state();
    assert!(state.is_empty());
    assert!(state.has_more());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn given_detached_fetcher_when_load_next_then_skipped_without_request() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path(ITEMS_ROUTE))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;
    let fetcher = backend.envelope_fetcher(2);

    fetcher.detach();

    assert!(matches!(fetcher.load_next().await, PageLoad::Skipped(_)));
}

#[tokio::test]
async fn given_load_in_flight_when_detached_then_result_discarded() {
    let backend = TestBackend::signed_in().await;
    mount_page(
        &backend,
        json!({"limit": 2}),
        ResponseTemplate::new(200)
            .set_body_json(json!({"items": [{"id": "late"}]}))
            .set_delay(Duration::from_millis(300)),
        1,
    )
    .await;
    let fetcher = backend.envelope_fetcher(2);
    let in_flight = fetcher.clone();
    let handle = tokio::spawn(async move { in_flight.load_next().await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    fetcher.detach();
    let load = handle.await.expect("load task");

    assert!(matches!(load, PageLoad::Discarded(_)));
    assert!(fetcher.state().is_empty());
}

/// **VALUE**: Dropping an in-flight load clears `is_loading`.
///
/// **BUG THIS CATCHES**: Would catch a cancelled future (screen navigated away mid-request)
/// leaving the list stuck in `Loading`, so every later `load_next` is skipped.
#[tokio::test]
async fn given_load_cancelled_mid_flight_when_state_checked_then_not_loading() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path(ITEMS_ROUTE))
        .and(body_partial_json(json!({"limit": 2})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [{"id": "a"}]}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&backend.server)
        .await;
    let fetcher = backend.envelope_fetcher(2);

    let cancelled =
        tokio::time::timeout(Duration::from_millis(100), fetcher.load_next()).await;

    assert!(cancelled.is_err());
    assert_eq!(fetcher.status(), PageStatus::Idle);
    assert!(fetcher.state().has_more());
    assert!(fetcher.state().is_empty());
}

#[tokio::test]
async fn given_catalog_endpoint_when_fetcher_built_then_exposes_path() {
    let backend = TestBackend::signed_in().await;

    let fetcher = backend.envelope_fetcher(2);

    assert_eq!(fetcher.endpoint().path(), ITEMS_PATH);
}
