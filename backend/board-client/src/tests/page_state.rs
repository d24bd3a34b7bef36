use crate::error::RequestError;
use crate::pagination::{PageState, PageStatus};

#[test]
fn given_new_state_when_inspected_then_empty_and_optimistic() {
    let state: PageState<u8> = PageState::new();

    assert!(state.is_empty());
    assert!(state.has_more());
    assert!(!state.is_loading());
    assert_eq!(state.continuation_key(), None);
    assert_eq!(state.status(), PageStatus::Idle);
}

/// **VALUE**: Pages append in arrival order and the key tracks the latest page.
///
/// **BUG THIS CATCHES**: Would catch `apply_page` replacing items instead of extending, or
/// keeping a stale key after the final page.
#[test]
fn given_two_pages_when_applied_then_items_concatenate_and_key_clears() {
    let mut state = PageState::new();

    state.apply_page(vec!["a", "b"], Some("k1".to_string()));
    state.apply_page(vec!["c"], None);

    assert_eq!(state.items(), &["a", "b", "c"]);
    assert!(!state.has_more());
    assert_eq!(state.continuation_key(), None);
}

/// **VALUE**: A successful page clears the previous error.
///
/// **WHY THIS MATTERS**: The screen shows an error banner while `last_error` is set. A retry
/// that succeeds must remove the banner.
#[test]
fn given_errored_state_when_page_applied_then_status_returns_to_idle() {
    let mut state = PageState::new();
    state.last_error = Some(RequestError::parse("bad"));
    assert_eq!(state.status(), PageStatus::Errored);

    state.apply_page(vec![1], Some("k".to_string()));

    assert_eq!(state.status(), PageStatus::Idle);
    assert!(state.last_error().is_none());
}

#[test]
fn given_loading_state_with_error_when_status_then_loading_wins() {
    let mut state: PageState<u8> = PageState::new();
    state.last_error = Some(RequestError::parse("bad"));
    state.is_loading = true;

    assert_eq!(state.status(), PageStatus::Loading);
}
