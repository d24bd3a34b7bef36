use crate::BearerToken;

/// **VALUE**: Debug and Display output never contain the token value.
///
/// **WHY THIS MATTERS**: Sessions are logged at debug level when requests are issued.
/// A leaked bearer token grants full account access until it expires.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Debug)]` sneaking back onto the type.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    let token = BearerToken::new("super-secret-session");

    let debug = format!("{token:?}");
    let display = format!("{token}");

    assert!(!debug.contains("super-secret-session"));
    assert!(!display.contains("super-secret-session"));
    assert_eq!(token.len(), "super-secret-session".len());
}

/// **VALUE**: Serializing a token through serde fails instead of emitting the secret.
///
/// **BUG THIS CATCHES**: Would catch a token accidentally embedded in a request body or a
/// persisted config struct.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = BearerToken::new("abc");

    let result = serde_json::to_string(&token);

    assert!(result.is_err());
}

#[test]
fn given_token_when_header_value_then_uses_bearer_scheme() {
    let token = BearerToken::new("abc123");

    assert_eq!(token.header_value(), "Bearer abc123");
    assert_eq!(token.as_str(), "abc123");
}
