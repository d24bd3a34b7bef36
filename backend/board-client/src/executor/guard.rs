use crate::executor::{GuardedExecutor, GuardedOutcome, Method};
use crate::navigator::Navigator;
use crate::session::{Portal, Session};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Thin adapter that turns `Unauthenticated` into a login redirect.
///
/// Bundles the executor with the session and the navigator the front-end
/// injected, so screens issue requests without repeating the
/// "if 401 then clear and redirect" dance.
///
/// Cloning is cheap and all clones share the same session.
#[derive(Clone)]
pub struct SessionGuard {
    executor: GuardedExecutor,
    session: Session,
    navigator: Arc<dyn Navigator>,
    portal: Portal,
}

impl SessionGuard {
    pub fn new(
        executor: GuardedExecutor,
        session: Session,
        navigator: Arc<dyn Navigator>,
        portal: Portal,
    ) -> Self {
        Self {
            executor,
            session,
            navigator,
            portal,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    pub fn executor(&self) -> &GuardedExecutor {
        &self.executor
    }

    pub async fn request<B, T>(
        &self,
        endpoint_path: &str,
        method: Method,
        body: Option<&B>,
    ) -> GuardedOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let outcome = self
            .executor
            .guarded_request(endpoint_path, method, body, &self.session)
            .await;

        if outcome.is_unauthenticated() {
            self.navigator.redirect_to_login(self.portal.login_route());
        }

        outcome
    }

    /// POST with a JSON body, the backend's convention for reads and writes.
    pub async fn post<B, T>(&self, endpoint_path: &str, body: &B) -> GuardedOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(endpoint_path, Method::Post, Some(body)).await
    }
}
