use crate::session::{Portal, Session};

use common::BearerToken;

/// **VALUE**: Clearing through one clone is visible through every other clone.
///
/// **WHY THIS MATTERS**: The fetcher, the redirect adapter and the screen all hold clones.
/// After a 401 none of them may keep sending the dead token.
///
/// **BUG THIS CATCHES**: Would catch a `Session` that derives `Clone` over a plain
/// `Option<BearerToken>` instead of shared state.
#[tokio::test]
async fn given_cloned_session_when_cleared_then_all_clones_see_absent_token() {
    let session = Session::with_token(BearerToken::new("abc"));
    let clone = session.clone();

    assert!(session.clear().await);

    assert!(clone.bearer_token().await.is_none());
    assert!(clone.is_expired().await);
}

/// **VALUE**: Clearing an already-cleared session is a harmless no-op.
///
/// **BUG THIS CATCHES**: Would catch a panic or error when two concurrent 401s both clear.
#[tokio::test]
async fn given_cleared_session_when_cleared_again_then_returns_false() {
    let session = Session::with_token(BearerToken::new("abc"));

    assert!(session.clear().await);
    assert!(!session.clear().await);
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn given_anonymous_session_when_replaced_then_is_authenticated() {
    let session = Session::anonymous();
    assert!(!session.is_authenticated().await);

    session.replace(BearerToken::new("fresh")).await;

    let token = session.bearer_token().await.expect("token installed");
    assert_eq!(token.as_str(), "fresh");
}

/// **VALUE**: A token handed out before a replace keeps its old value.
///
/// **WHY THIS MATTERS**: Requests already in flight must finish with the token they started
/// with; the session is replaced wholesale rather than mutated in place.
#[tokio::test]
async fn given_token_snapshot_when_session_replaced_then_snapshot_is_unchanged() {
    let session = Session::with_token(BearerToken::new("old"));
    let snapshot = session.bearer_token().await.expect("token present");

    session.replace(BearerToken::new("new")).await;

    assert_eq!(snapshot.as_str(), "old");
}

#[test]
fn given_session_when_debug_formatted_then_token_not_shown() {
    let session = Session::with_token(BearerToken::new("secret-value"));

    assert!(!format!("{session:?}").contains("secret-value"));
}

#[test]
fn given_portals_when_asked_for_routes_then_match_front_ends() {
    assert_eq!(Portal::Hub.login_route(), "/login");
    assert_eq!(Portal::Employer.login_route(), "/signin");
    assert_eq!(Portal::Hub.login_endpoint(), "hub/login");
    assert_eq!(Portal::Employer.login_endpoint(), "employer/signin");
    assert_eq!(Portal::Employer.tfa_endpoint(), "employer/tfa");
}

/// **VALUE**: An empty token never produces a live session.
///
/// **WHY THIS MATTERS**: The executor refuses to send an empty token. A session reporting
/// itself authenticated while every guarded call redirects to login would leave screens
/// showing signed-in chrome over a dead session.
///
/// **BUG THIS CATCHES**: Would catch `with_token` or `replace` storing `Bearer ` as a token.
#[tokio::test]
async fn given_empty_token_when_session_built_or_replaced_then_session_is_expired() {
    let built = Session::with_token(BearerToken::new(""));
    assert!(!built.is_authenticated().await);
    assert!(built.is_expired().await);

    let replaced = Session::with_token(BearerToken::new("live"));
    replaced.replace(BearerToken::new("")).await;
    assert!(replaced.is_expired().await);
    assert!(replaced.bearer_token().await.is_none());
}

#[tokio::test]
async fn given_current_token_when_invalidated_then_session_cleared() {
    let session = Session::with_token(BearerToken::new("abc"));
    let used = session.bearer_token().await.expect("token present");

    assert!(session.invalidate(&used).await);
    assert!(session.is_expired().await);
    assert!(!session.invalidate(&used).await);
}

/// **VALUE**: A rejection of a superseded token leaves the newer token in place.
///
/// **WHY THIS MATTERS**: A slow request sent before sign-in can come back 401 after the
/// user finished two-factor. Clearing then would log the user straight back out.
///
/// **BUG THIS CATCHES**: Would catch invalidation comparing by value or clearing blindly.
#[tokio::test]
async fn given_replaced_token_when_old_token_invalidated_then_new_token_kept() {
    let session = Session::with_token(BearerToken::new("abc"));
    let used = session.bearer_token().await.expect("token present");
    session.replace(BearerToken::new("abc")).await;

    assert!(!session.invalidate(&used).await);

    let current = session.bearer_token().await.expect("newer token kept");
    assert_eq!(current.as_str(), "abc");
}
