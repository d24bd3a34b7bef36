use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a redacted credential is asked to leave the process
/// through a generic serializer.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
