use crate::HttpStatusCode;

/// **VALUE**: Verifies the status-to-message mapping for the codes list screens care about.
///
/// **WHY THIS MATTERS**: Callers surface `human_message()` directly to users. A conflict on a
/// create form must read as a conflict, not as a generic server failure.
///
/// **BUG THIS CATCHES**: Would catch if the match arms are reordered so the broad `400..=499`
/// range shadows the specific 409/422 messages.
#[test]
fn given_domain_rejection_codes_when_human_message_then_returns_specific_text() {
    assert_eq!(
        HttpStatusCode(409).human_message(),
        "This conflicts with an existing item"
    );
    assert_eq!(
        HttpStatusCode(422).human_message(),
        "The request could not be processed"
    );
    assert_eq!(
        HttpStatusCode(404).human_message(),
        "The requested item was not found"
    );
}

/// **VALUE**: Every 5xx status maps to the same server error message.
///
/// **BUG THIS CATCHES**: Would catch a mapping that only handles 500 and lets 503 fall
/// through to the "unexpected response" default.
#[test]
fn given_any_5xx_when_human_message_then_returns_server_error() {
    for code in [500, 501, 502, 503, 504, 599] {
        assert_eq!(
            HttpStatusCode(code).human_message(),
            "Server error, please try again later",
            "status {code}"
        );
    }
}

#[test]
fn given_unlisted_4xx_when_human_message_then_returns_generic_rejection() {
    assert_eq!(HttpStatusCode(418).human_message(), "The request was rejected");
}

/// **VALUE**: Only transient statuses are retryable.
///
/// **WHY THIS MATTERS**: The retry helper relies on this to avoid replaying requests the
/// backend rejected for a domain reason (409, 422).
#[test]
fn given_status_codes_when_is_retryable_then_only_transient_codes_match() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should retry");
    }
    for code in [400, 401, 404, 409, 422, 500] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not retry");
    }
}

#[test]
fn given_401_when_classified_then_is_unauthorized_client_error() {
    let status = HttpStatusCode::from(401);
    assert!(status.is_unauthorized());
    assert!(status.is_client_error());
    assert!(!status.is_success());
}

#[test]
fn given_2xx_when_classified_then_is_success() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(302).is_success());
}
