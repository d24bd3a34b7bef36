use crate::helpers::{TOKEN, TestBackend};

use board_client::config::ClientConfig;
use board_client::error::FailureKind;
use board_client::navigator::LogNavigator;
use board_client::{GuardedExecutor, GuardedOutcome, Method, Portal, Session, SessionGuard};

use common::{BearerToken, HttpStatusCode};

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const PROFILE_PATH: &str = "hub/get-my-profile";

// ============================================
// SESSION CONTRACT
// ============================================

/// **VALUE**: With no token the executor answers `Unauthenticated` without touching the network.
///
/// **WHY THIS MATTERS**: After logout or a prior 401 every screen may still fire its loads.
/// Sending them anonymously would spam the backend with guaranteed 401s.
///
/// **BUG THIS CATCHES**: Would catch the short-circuit being removed or moved after `send`.
#[tokio::test]
async fn given_no_token_when_guarded_request_then_unauthenticated_without_network_call() {
    let backend = TestBackend::start(Portal::Hub, None).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<Value> = backend
        .executor()
        .guarded_request(PROFILE_PATH, Method::Post, Some(&json!({})), &backend.session)
        .await;

    assert_eq!(outcome, GuardedOutcome::Unauthenticated);
}

#[tokio::test]
async fn given_no_token_when_guard_request_then_redirects_to_portal_login() {
    let backend = TestBackend::start(Portal::Employer, None).await;

    let outcome: GuardedOutcome<Value> = backend.guard.post(PROFILE_PATH, &json!({})).await;

    assert!(outcome.is_unauthenticated());
    assert_eq!(backend.navigator.redirects(), vec!["/signin".to_string()]);
}

/// **VALUE**: A 401 clears the session every clone shares, and the next call short-circuits.
///
/// **WHY THIS MATTERS**: The fetcher, the screen and the redirect adapter each hold a clone.
/// If only one of them forgot the token the others would keep sending it.
///
/// **BUG THIS CATCHES**: Would catch the executor clearing a private copy of the session.
#[tokio::test]
async fn given_401_when_guarded_request_then_session_cleared_for_all_holders() {
    let backend = TestBackend::signed_in().await;
    let other_holder = backend.session.clone();
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&backend.server)
        .await;

    let first: GuardedOutcome<Value> = backend.guard.post(PROFILE_PATH, &json!({})).await;
    let second: GuardedOutcome<Value> = backend.guard.post(PROFILE_PATH, &json!({})).await;

    assert!(first.is_unauthenticated());
    assert!(second.is_unauthenticated());
    assert!(other_holder.bearer_token().await.is_none());
    assert_eq!(
        backend.navigator.redirects(),
        vec!["/login".to_string(), "/login".to_string()]
    );
}

/// **VALUE**: A 409 is an ordinary failure: session kept, no redirect.
///
/// **BUG THIS CATCHES**: Would catch any 4xx being treated as a session event, which would
/// log the user out for a duplicate-name error.
#[tokio::test]
async fn given_409_when_guarded_request_then_failure_and_session_kept() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<Value> = backend.guard.post(PROFILE_PATH, &json!({})).await;

    let error = outcome.failure().expect("should be a failure");
    assert_eq!(error.kind(), FailureKind::HttpError(HttpStatusCode(409)));
    assert_eq!(error.message(), "This conflicts with an existing item");
    assert!(backend.session.is_authenticated().await);
    assert!(backend.navigator.redirects().is_empty());
}

/// **VALUE**: A 401 for a request sent before a fresh sign-in keeps the fresh token.
///
/// **WHY THIS MATTERS**: Requests already in flight with the old token fail on their own
/// terms. They must not wipe the session the user just established.
///
/// **BUG THIS CATCHES**: Would catch the executor clearing the session without checking
/// which token the rejected request carried.
#[tokio::test]
async fn given_slow_401_when_session_replaced_mid_flight_then_new_token_kept() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let body = json!({});
    let (outcome, ()) = tokio::join!(
        backend.executor().guarded_request::<Value, Value>(
            PROFILE_PATH,
            Method::Post,
            Some(&body),
            &backend.session
        ),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            backend.session.replace(BearerToken::new("fresh")).await;
        }
    );

    assert!(outcome.is_unauthenticated());
    let token = backend.session.bearer_token().await.expect("fresh token kept");
    assert_eq!(token.as_str(), "fresh");
}

// ============================================
// CONFIGURED EXECUTOR
// ============================================

/// **VALUE**: An executor built from `ClientConfig` talks to the configured backend.
///
/// **BUG THIS CATCHES**: Would catch `from_config` ignoring `base_url` or skipping validation.
#[tokio::test]
async fn given_client_config_when_executor_built_then_requests_reach_configured_backend() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handle": "ada"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    let mut config = ClientConfig::default();
    config.api.base_url = backend.server.uri();
    let executor = GuardedExecutor::from_config(&config).expect("valid config");
    let guard = SessionGuard::new(
        executor,
        backend.session.clone(),
        Arc::new(LogNavigator),
        config.portal,
    );

    let outcome: GuardedOutcome<Value> = guard.post(PROFILE_PATH, &json!({})).await;

    assert_eq!(outcome, GuardedOutcome::Success(json!({"handle": "ada"})));
}

#[tokio::test]
async fn given_log_navigator_and_no_token_when_request_then_unauthenticated_without_call() {
    let backend = TestBackend::start(Portal::Hub, None).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;
    let mut config = ClientConfig::default();
    config.api.base_url = backend.server.uri();
    let executor = GuardedExecutor::from_config(&config).expect("valid config");
    let guard = SessionGuard::new(
        executor,
        Session::anonymous(),
        Arc::new(LogNavigator),
        Portal::Employer,
    );

    let outcome: GuardedOutcome<Value> = guard.post(PROFILE_PATH, &json!({})).await;

    assert!(outcome.is_unauthenticated());
}

#[test]
fn given_invalid_timeout_in_config_when_executor_built_then_error() {
    let mut config = ClientConfig::default();
    config.api.timeout_secs = 0;

    assert!(GuardedExecutor::from_config(&config).is_err());
}

// ============================================
// REQUEST SHAPE
// ============================================

/// **VALUE**: The request carries the bearer token, JSON content type and the body.
///
/// **BUG THIS CATCHES**: Would catch a missing `Bearer ` prefix or an unserialized body;
/// the mock only answers a request that matches all three.
#[tokio::test]
async fn given_token_and_body_when_guarded_request_then_headers_and_body_sent() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"handle": "ada"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handle": "ada"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<Value> = backend
        .guard
        .post(PROFILE_PATH, &json!({"handle": "ada"}))
        .await;

    assert_eq!(outcome, GuardedOutcome::Success(json!({"handle": "ada"})));
}

#[tokio::test]
async fn given_leading_slash_in_path_when_guarded_request_then_same_endpoint_hit() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<u32> = backend.guard.post("/hub/get-my-profile", &json!({})).await;

    assert_eq!(outcome, GuardedOutcome::Success(1));
}

// ============================================
// RESPONSE DECODING
// ============================================

/// **VALUE**: An empty 2xx body decodes into `()`.
///
/// **WHY THIS MATTERS**: Mutations such as "update cost center" answer with no content.
/// Treating that as a parse failure would report every successful save as an error.
#[tokio::test]
async fn given_empty_success_body_when_unit_expected_then_success() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/employer/update-cost-center"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<()> = backend
        .guard
        .post("employer/update-cost-center", &json!({"name": "Ops"}))
        .await;

    assert_eq!(outcome, GuardedOutcome::Success(()));
}

#[tokio::test]
async fn given_body_of_wrong_shape_when_decoded_then_parse_error() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<Value> = backend.guard.post(PROFILE_PATH, &json!({})).await;

    let error = outcome.failure().expect("should be a failure");
    assert_eq!(error.kind(), FailureKind::ParseError);
    assert!(backend.session.is_authenticated().await);
}

#[tokio::test]
async fn given_structured_error_body_when_failed_then_backend_message_surfaced() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Handle already taken"})),
        )
        .mount(&backend.server)
        .await;

    let outcome: GuardedOutcome<Value> = backend.guard.post(PROFILE_PATH, &json!({})).await;

    let error = outcome.failure().expect("should be a failure");
    assert_eq!(error.status_code(), Some(422));
    assert_eq!(error.message(), "Handle already taken");
}

// ============================================
// TRANSPORT FAILURES
// ============================================

/// **VALUE**: A slow backend yields a retryable `NetworkError` flagged as a timeout.
///
/// **BUG THIS CATCHES**: Would catch the client being built without a timeout, which leaves a
/// screen spinning forever.
#[tokio::test]
async fn given_slow_backend_when_timeout_elapses_then_network_error() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&backend.server)
        .await;
    let executor =
        GuardedExecutor::with_timeout(&backend.server.uri(), Duration::from_millis(200))
            .expect("valid uri");

    let outcome: GuardedOutcome<Value> = executor
        .guarded_request(PROFILE_PATH, Method::Post, Some(&json!({})), &backend.session)
        .await;

    let error = outcome.failure().expect("should be a failure");
    assert_eq!(error.kind(), FailureKind::NetworkError);
    assert_eq!(error.error_category(), "timeout");
    assert!(error.is_retryable());
    assert!(backend.session.is_authenticated().await);
}

#[tokio::test]
async fn given_unreachable_backend_when_guarded_request_then_network_error() {
    let backend = TestBackend::signed_in().await;
    let executor = GuardedExecutor::new("http://127.0.0.1:1/").expect("valid uri");

    let outcome: GuardedOutcome<Value> = executor
        .guarded_request(PROFILE_PATH, Method::Post, Some(&json!({})), &backend.session)
        .await;

    let error = outcome.failure().expect("should be a failure");
    assert_eq!(error.kind(), FailureKind::NetworkError);
    assert!(backend.session.is_authenticated().await);
}

#[test]
fn given_non_http_base_url_when_executor_built_then_config_error() {
    let result = GuardedExecutor::new("ftp://files.example.test");

    assert!(result.is_err());
}

#[test]
fn given_base_url_with_path_prefix_when_built_then_trailing_slash_added() {
    let executor = GuardedExecutor::new("https://api.example.test/v2").expect("valid uri");

    assert_eq!(executor.base_url().as_str(), "https://api.example.test/v2/");
}
