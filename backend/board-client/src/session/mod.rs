//! Client-held authentication state.
//!
//! A [`Session`] is an explicit value handed to the executor instead of a
//! token read ad hoc from a cookie jar. Clones share the same underlying
//! state, so a 401 observed by any request clears the token for every
//! holder.
//!
//! The token is never mutated in place: it is replaced wholesale on
//! sign-in and set to absent on invalidation, each a single assignment
//! under the write lock. Requests already in flight keep the token they
//! started with.

pub mod portal;

pub use portal::Portal;

use common::BearerToken;

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<Arc<BearerToken>>>>,
}

impl Session {
    /// A session with no token. Every guarded request short-circuits.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An empty token yields an anonymous session.
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(live_token(token))),
        }
    }

    /// Current token, if any.
    pub async fn bearer_token(&self) -> Option<Arc<BearerToken>> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Inferred, never stored: a session without a token is expired.
    pub async fn is_expired(&self) -> bool {
        !self.is_authenticated().await
    }

    /// Install a fresh token after sign-in. An empty token clears the session.
    pub async fn replace(&self, token: BearerToken) {
        let token = live_token(token);
        let installed = token.is_some();
        *self.token.write().await = token;
        if installed {
            info!("Session token replaced");
        } else {
            debug!("Empty token installed, session cleared");
        }
    }

    /// Drop the token. Idempotent.
    ///
    /// Returns `true` if a token was present.
    pub async fn clear(&self) -> bool {
        let previous = self.token.write().await.take();
        if previous.is_some() {
            debug!("Session token cleared");
        }
        previous.is_some()
    }

    /// Drop `used` if it is still the current token.
    ///
    /// A 401 for a request sent with a token that has since been replaced
    /// leaves the newer token in place. Returns `true` if the token was cleared.
    pub async fn invalidate(&self, used: &Arc<BearerToken>) -> bool {
        let mut current = self.token.write().await;
        let is_current = matches!(current.as_ref(), Some(token) if Arc::ptr_eq(token, used));

        if is_current {
            *current = None;
            debug!("Session token invalidated");
        } else if current.is_some() {
            debug!("Rejected token already superseded, keeping current session");
        }

        is_current
    }
}

fn live_token(token: BearerToken) -> Option<Arc<BearerToken>> {
    if token.is_empty() {
        None
    } else {
        Some(Arc::new(token))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
