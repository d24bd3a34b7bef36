use crate::error::request::RequestError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors from the two-step sign-in flow.
#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Account disabled {location}")]
    AccountDisabled { location: ErrorLocation },

    #[error("Invalid or expired two-factor code {location}")]
    InvalidTfaCode { location: ErrorLocation },

    #[error("Empty token in '{field}' {location}")]
    EmptyToken {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl AuthError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn account_disabled() -> Self {
        AuthError::AccountDisabled {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_tfa_code() -> Self {
        AuthError::InvalidTfaCode {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn empty_token(field: &'static str) -> Self {
        AuthError::EmptyToken {
            field,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
