use crate::error::{ClientError, RequestError};

/// Result of exactly one guarded call.
///
/// `Unauthenticated` always means the session has already been cleared
/// by the time the caller sees it.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum GuardedOutcome<T> {
    Success(T),
    Unauthenticated,
    Failure(RequestError),
}

impl<T> GuardedOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, GuardedOutcome::Success(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, GuardedOutcome::Unauthenticated)
    }

    pub fn failure(&self) -> Option<&RequestError> {
        match self {
            GuardedOutcome::Failure(error) => Some(error),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> GuardedOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            GuardedOutcome::Success(payload) => GuardedOutcome::Success(f(payload)),
            GuardedOutcome::Unauthenticated => GuardedOutcome::Unauthenticated,
            GuardedOutcome::Failure(error) => GuardedOutcome::Failure(error),
        }
    }

    /// Collapse into a `Result` for callers that propagate with `?`.
    #[track_caller]
    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            GuardedOutcome::Success(payload) => Ok(payload),
            GuardedOutcome::Unauthenticated => Err(ClientError::unauthenticated()),
            GuardedOutcome::Failure(error) => Err(ClientError::Request(error)),
        }
    }
}
