use crate::helpers::TestBackend;

use board_client::GuardedOutcome;
use board_client::retry::{RetryPolicy, retry_transient};

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const PROFILE_PATH: &str = "hub/get-my-profile";

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        max_elapsed: Duration::from_secs(5),
    }
}

/// **VALUE**: Transient 503s are retried until the backend recovers.
///
/// **BUG THIS CATCHES**: Would catch retryable statuses being returned on the first attempt.
#[tokio::test]
async fn given_transient_503_when_retried_then_eventually_succeeds() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handle": "ada"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    let body = json!({});

    let outcome: GuardedOutcome<Value> = retry_transient(&fast_policy(3), || {
        backend.guard.post::<_, Value>(PROFILE_PATH, &body)
    })
    .await;

    assert_eq!(outcome, GuardedOutcome::Success(json!({"handle": "ada"})));
}

#[tokio::test]
async fn given_persistent_503_when_retries_exhausted_then_last_failure_returned() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&backend.server)
        .await;
    let body = json!({});

    let outcome: GuardedOutcome<Value> = retry_transient(&fast_policy(2), || {
        backend.guard.post::<_, Value>(PROFILE_PATH, &body)
    })
    .await;

    assert_eq!(outcome.failure().and_then(|e| e.status_code()), Some(503));
}

/// **VALUE**: Non-retryable failures and `Unauthenticated` return after one attempt.
///
/// **WHY THIS MATTERS**: Replaying a 409 cannot succeed, and replaying after a 401 would only
/// short-circuit again. Both would delay the error the user needs to see.
#[tokio::test]
async fn given_409_when_retried_then_single_attempt() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&backend.server)
        .await;
    let body = json!({});

    let outcome: GuardedOutcome<Value> = retry_transient(&fast_policy(3), || {
        backend.guard.post::<_, Value>(PROFILE_PATH, &body)
    })
    .await;

    assert_eq!(outcome.failure().and_then(|e| e.status_code()), Some(409));
}

#[tokio::test]
async fn given_expired_session_when_retried_then_single_attempt() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&backend.server)
        .await;
    let body = json!({});
    let attempts = AtomicU32::new(0);

    let outcome: GuardedOutcome<Value> = retry_transient(&fast_policy(3), || {
        attempts.fetch_add(1, Ordering::SeqCst);
        backend.guard.post::<_, Value>(PROFILE_PATH, &body)
    })
    .await;

    assert!(outcome.is_unauthenticated());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
