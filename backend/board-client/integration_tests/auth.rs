use crate::helpers::TestBackend;

use board_client::auth::{AuthClient, Credentials};
use board_client::error::AuthError;
use board_client::{GuardedOutcome, Portal};

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn credentials(client_id: Option<&str>) -> Credentials {
    Credentials {
        email: "ada@example.test".to_string(),
        password: "hunter2".to_string(),
        client_id: client_id.map(str::to_string),
    }
}

/// **VALUE**: Hub login then two-factor installs a session the guarded executor uses.
///
/// **WHY THIS MATTERS**: Sign-in is the only way a session gets a token. If the token were
/// stored anywhere but the shared session, every later guarded call would short-circuit.
///
/// **BUG THIS CATCHES**: Would catch wrong wire field names (`tfa_token`, `session_token`) or
/// the session not being replaced.
#[tokio::test]
async fn given_hub_credentials_and_code_when_signing_in_then_session_authenticated() {
    let backend = TestBackend::start(Portal::Hub, None).await;
    Mock::given(method("POST"))
        .and(path("/hub/login"))
        .and(body_json(json!({"email": "ada@example.test", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tfa-1"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hub/tfa"))
        .and(body_json(
            json!({"tfa_token": "tfa-1", "tfa_code": "123456", "remember_me": true}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"session_token": "sess-1"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hub/get-my-profile"))
        .and(header("authorization", "Bearer sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"handle": "ada"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Hub);

    let challenge = auth.login(&credentials(None)).await.expect("login accepted");
    auth.verify_tfa(&challenge, "123456", true, &backend.session)
        .await
        .expect("code accepted");

    assert!(backend.session.is_authenticated().await);
    let profile: GuardedOutcome<Value> =
        backend.guard.post("hub/get-my-profile", &json!({})).await;
    assert!(profile.is_success());
}

#[tokio::test]
async fn given_employer_portal_when_signing_in_then_client_id_and_tgt_sent() {
    let backend = TestBackend::start(Portal::Employer, None).await;
    Mock::given(method("POST"))
        .and(path("/employer/signin"))
        .and(body_json(json!({
            "client_id": "acme",
            "email": "ada@example.test",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tgt-1"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/employer/tfa"))
        .and(body_json(json!({"tgt": "tgt-1", "tfa_code": "654321"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"session_token": "sess-2"})),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Employer);

    let challenge = auth
        .login(&credentials(Some("acme")))
        .await
        .expect("login accepted");
    auth.verify_tfa(&challenge, "654321", false, &backend.session)
        .await
        .expect("code accepted");

    let token = backend.session.bearer_token().await.expect("token installed");
    assert_eq!(token.as_str(), "sess-2");
}

/// **VALUE**: A 401 on login is a credential error, not a session event.
///
/// **BUG THIS CATCHES**: Would catch sign-in going through the guarded path, which would
/// redirect to the login page the user is already on.
#[tokio::test]
async fn given_wrong_password_when_login_then_invalid_credentials() {
    let backend = TestBackend::start(Portal::Hub, None).await;
    Mock::given(method("POST"))
        .and(path("/hub/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Hub);

    let error = auth
        .login(&credentials(None))
        .await
        .expect_err("should reject");

    assert!(matches!(error, AuthError::InvalidCredentials { .. }), "{error}");
    assert!(backend.navigator.redirects().is_empty());
}

#[tokio::test]
async fn given_disabled_account_when_login_then_account_disabled() {
    let backend = TestBackend::start(Portal::Hub, None).await;
    Mock::given(method("POST"))
        .and(path("/hub/login"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Hub);

    let error = auth
        .login(&credentials(None))
        .await
        .expect_err("should reject");

    assert!(matches!(error, AuthError::AccountDisabled { .. }), "{error}");
}

#[tokio::test]
async fn given_empty_login_token_when_login_then_empty_token_error() {
    let backend = TestBackend::start(Portal::Hub, None).await;
    Mock::given(method("POST"))
        .and(path("/hub/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Hub);

    let error = auth
        .login(&credentials(None))
        .await
        .expect_err("should reject");

    assert!(matches!(error, AuthError::EmptyToken { field: "token", .. }), "{error}");
}

/// **VALUE**: A rejected code leaves the previous session untouched.
///
/// **BUG THIS CATCHES**: Would catch the session being cleared or overwritten before the
/// backend confirmed the code.
#[tokio::test]
async fn given_wrong_code_when_verify_tfa_then_invalid_code_and_session_unchanged() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/hub/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tfa-1"})))
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hub/tfa"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Hub);
    let challenge = auth.login(&credentials(None)).await.expect("login accepted");

    let error = auth
        .verify_tfa(&challenge, "000000", false, &backend.session)
        .await
        .expect_err("should reject");

    assert!(matches!(error, AuthError::InvalidTfaCode { .. }), "{error}");
    let token = backend.session.bearer_token().await.expect("token kept");
    assert_eq!(token.as_str(), crate::helpers::TOKEN);
}

#[tokio::test]
async fn given_signed_in_session_when_sign_out_then_guarded_calls_short_circuit() {
    let backend = TestBackend::signed_in().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;
    let auth = AuthClient::new(backend.executor().clone(), Portal::Hub);

    auth.sign_out(&backend.session).await;

    let outcome: GuardedOutcome<Value> = backend.guard.post("hub/get-my-profile", &json!({})).await;
    assert!(outcome.is_unauthenticated());
}
