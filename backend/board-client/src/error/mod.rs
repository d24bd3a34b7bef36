pub mod auth;
pub mod config;
pub mod logger;
pub mod request;

pub use auth::AuthError;
pub use config::ConfigError;
pub use logger::LoggerError;
pub use request::{FailureKind, RequestError};

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthenticated: session cleared, sign in again {location}")]
    Unauthenticated { location: ErrorLocation },

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logger(#[from] LoggerError),
}

impl ClientError {
    #[track_caller]
    pub fn unauthenticated() -> Self {
        ClientError::Unauthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthenticated { .. })
    }
}
