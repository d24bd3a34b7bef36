//! Session credential with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Scheme prefix used in the `Authorization` header.
const BEARER_SCHEME: &str = "Bearer";

/// A session bearer token that never exposes its value in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    inner: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// Raw token value.
    ///
    /// # Security Note
    /// Only call this when actually building a request.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// `Authorization` header value, e.g. `Bearer abc123`.
    pub fn header_value(&self) -> String {
        format!("{BEARER_SCHEME} {}", self.inner)
    }

    /// Token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken([REDACTED])")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED BEARER TOKEN]")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for BearerToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("BearerToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
