//! HTTP status code classification and user-facing messages.

/// HTTP status code for error categorization.
///
/// Stored directly rather than parsed from error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);

    /// 2xx responses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 401 means the session token is missing, expired or invalid.
    pub fn is_unauthorized(&self) -> bool {
        *self == Self::UNAUTHORIZED
    }

    /// 4xx client errors (not retryable).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors (potentially retryable).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Specific codes that indicate transient failures.
    pub fn is_retryable(&self) -> bool {
        matches!(self.0, 502 | 503 | 504 | 429)
    }

    /// Human-readable message shown to the user for a failed request.
    ///
    /// Derived from the status code alone; response bodies are never
    /// echoed back to the user.
    pub fn human_message(&self) -> &'static str {
        match self.0 {
            400 => "The request was invalid",
            401 => "Your session has expired, please sign in again",
            403 => "You do not have permission to perform this action",
            404 => "The requested item was not found",
            409 => "This conflicts with an existing item",
            422 => "The request could not be processed",
            429 => "Too many requests, please try again shortly",
            500..=599 => "Server error, please try again later",
            400..=499 => "The request was rejected",
            _ => "Unexpected response from server",
        }
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
