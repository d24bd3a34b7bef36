use crate::error::{FailureKind, RequestError};

use common::HttpStatusCode;

// ============================================
// MESSAGE DERIVATION
// ============================================

/// **VALUE**: A failed status without a structured body gets the status-derived message.
///
/// **WHY THIS MATTERS**: Raw bodies can be HTML error pages from a proxy. Showing them to the
/// user would be confusing at best and leak internals at worst.
///
/// **BUG THIS CATCHES**: Would catch if `from_status` starts echoing the body text.
#[test]
fn given_plain_text_body_when_from_status_then_uses_status_message() {
    let error = RequestError::from_status(HttpStatusCode(409), b"<html>conflict</html>");

    assert_eq!(error.message(), "This conflicts with an existing item");
    assert_eq!(error.kind(), FailureKind::HttpError(HttpStatusCode(409)));
    assert_eq!(error.status_code(), Some(409));
}

/// **VALUE**: A structured `{"message": ...}` body from the backend is preferred.
///
/// **BUG THIS CATCHES**: Would catch if validation messages the backend deliberately returns
/// (e.g. "handle already taken") are discarded in favour of generic text.
#[test]
fn given_structured_error_body_when_from_status_then_uses_backend_message() {
    let error = RequestError::from_status(
        HttpStatusCode(422),
        br#"{"message": "Handle already taken"}"#,
    );

    assert_eq!(error.message(), "Handle already taken");
}

#[test]
fn given_structured_body_with_blank_message_when_from_status_then_falls_back_to_status() {
    let error = RequestError::from_status(HttpStatusCode(503), br#"{"message": "   "}"#);

    assert_eq!(error.message(), "Server error, please try again later");
}

#[test]
fn given_json_array_body_when_from_status_then_falls_back_to_status() {
    let error = RequestError::from_status(HttpStatusCode(400), br#"["message"]"#);

    assert_eq!(error.message(), "The request was invalid");
}

// ============================================
// RETRY CLASSIFICATION
// ============================================

/// **VALUE**: Parse and invalid-request failures are never retryable.
///
/// **WHY THIS MATTERS**: A broken response contract fails identically on every attempt;
/// retrying only multiplies load on an already misbehaving backend.
#[test]
fn given_parse_and_invalid_request_errors_when_is_retryable_then_false() {
    assert!(!RequestError::parse("bad json").is_retryable());
    assert!(!RequestError::invalid_request("bad path").is_retryable());
}

#[test]
fn given_http_errors_when_is_retryable_then_follows_status_code() {
    assert!(RequestError::from_status(HttpStatusCode(503), b"").is_retryable());
    assert!(!RequestError::from_status(HttpStatusCode(409), b"").is_retryable());
}

#[test]
fn given_each_variant_when_error_category_then_returns_stable_label() {
    assert_eq!(
        RequestError::from_status(HttpStatusCode(404), b"").error_category(),
        "client_error"
    );
    assert_eq!(
        RequestError::from_status(HttpStatusCode(500), b"").error_category(),
        "server_error"
    );
    assert_eq!(RequestError::parse("x").error_category(), "parse");
    assert_eq!(
        RequestError::invalid_request("x").error_category(),
        "invalid_request"
    );
}

#[test]
fn given_error_when_displayed_then_includes_location() {
    let error = RequestError::parse("unexpected token");

    let rendered = error.to_string();

    assert!(rendered.starts_with("Parse Error: unexpected token ["));
    assert!(rendered.contains("request_error.rs"));
}
