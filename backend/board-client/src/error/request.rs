//! Failure taxonomy of a single guarded request.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - User-facing messages come from the status code, never the raw body
//! - `is_retryable()` uses error category, not message content
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Category of a failed request, for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Backend rejected the request (any non-2xx other than 401).
    HttpError(HttpStatusCode),
    /// Timeout, DNS or connection failure.
    NetworkError,
    /// Response did not match the expected shape.
    ParseError,
    /// Request could not be built; nothing was sent.
    InvalidRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RequestError {
    #[error("HTTP Error: {status} - {message} {location}")]
    Http {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Request Error: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl RequestError {
    /// Build from a non-success status.
    ///
    /// A structured `{"message": "..."}` body from the backend wins over the
    /// generic status text; anything else is ignored.
    #[track_caller]
    pub fn from_status(status: HttpStatusCode, body: &[u8]) -> Self {
        let message = structured_message(body)
            .unwrap_or_else(|| status.human_message().to_string());

        RequestError::Http {
            status,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();

        if error.is_builder() {
            return RequestError::InvalidRequest {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if error.is_decode() {
            return RequestError::Parse {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        RequestError::Network {
            message: error.to_string(),
            is_timeout,
            is_connection,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn parse(message: impl Into<String>) -> Self {
        RequestError::Parse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        RequestError::InvalidRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            RequestError::Http { status, .. } => FailureKind::HttpError(*status),
            RequestError::Network { .. } => FailureKind::NetworkError,
            RequestError::Parse { .. } => FailureKind::ParseError,
            RequestError::InvalidRequest { .. } => FailureKind::InvalidRequest,
        }
    }

    /// Message suitable for showing to the user.
    pub fn message(&self) -> &str {
        match self {
            RequestError::Http { message, .. } => message,
            RequestError::Network { message, .. } => message,
            RequestError::Parse { message, .. } => message,
            RequestError::InvalidRequest { message, .. } => message,
        }
    }

    /// Check if this error is retryable based on error category, NOT string content.
    pub fn is_retryable(&self) -> bool {
        match self {
            RequestError::Network {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,

            RequestError::Http { status, .. } => status.is_retryable(),

            // A broken contract does not fix itself on retry
            RequestError::Parse { .. } => false,
            RequestError::InvalidRequest { .. } => false,
        }
    }

    /// Get error category for log fields and metrics.
    pub fn error_category(&self) -> &'static str {
        match self {
            RequestError::Http { status, .. } if status.is_client_error() => "client_error",
            RequestError::Http { status, .. } if status.is_server_error() => "server_error",
            RequestError::Http { .. } => "http",
            RequestError::Network {
                is_timeout: true, ..
            } => "timeout",
            RequestError::Network {
                is_connection: true,
                ..
            } => "connection",
            RequestError::Network { .. } => "network",
            RequestError::Parse { .. } => "parse",
            RequestError::InvalidRequest { .. } => "invalid_request",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(status.0),
            _ => None,
        }
    }
}

/// Extract `message` from a JSON error object, if the backend sent one.
fn structured_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let message = value.as_object()?.get("message")?.as_str()?.trim();

    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
