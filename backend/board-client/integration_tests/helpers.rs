use board_client::catalog::ListEndpoint;
use board_client::navigator::Navigator;
use board_client::{GuardedExecutor, PaginatedFetcher, Portal, Session, SessionGuard};

use common::BearerToken;
use models::{NoFilter, PageLimit};

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use wiremock::MockServer;

pub const TOKEN: &str = "test-session-token";
pub const ITEMS_PATH: &str = "hub/list-items";

/// List item used by the generic pagination tests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub id: String,
}

pub fn item_ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

/// Navigator that records every redirect instead of navigating.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self, login_route: &str) {
        self.routes.lock().unwrap().push(login_route.to_string());
    }
}

pub struct TestBackend {
    pub server: MockServer,
    pub session: Session,
    pub navigator: Arc<RecordingNavigator>,
    pub guard: SessionGuard,
}

impl TestBackend {
    /// Mock backend with a signed-in hub session.
    pub async fn signed_in() -> Self {
        Self::start(Portal::Hub, Some(TOKEN)).await
    }

    pub async fn start(portal: Portal, token: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let session = match token {
            Some(token) => Session::with_token(BearerToken::new(token)),
            None => Session::anonymous(),
        };
        let navigator = Arc::new(RecordingNavigator::default());
        let executor = GuardedExecutor::new(&server.uri()).expect("valid mock server uri");
        let guard = SessionGuard::new(executor, session.clone(), navigator.clone(), portal);

        Self {
            server,
            session,
            navigator,
            guard,
        }
    }

    pub fn executor(&self) -> &GuardedExecutor {
        self.guard.executor()
    }

    /// Fetcher over `ITEMS_PATH` returning `{"items": [...], "pagination_key": ...}`.
    pub fn envelope_fetcher(&self, page_size: u32) -> PaginatedFetcher<Item, NoFilter> {
        PaginatedFetcher::new(
            self.guard.clone(),
            ListEndpoint::envelope(ITEMS_PATH, "items"),
            PageLimit::new(page_size).expect("valid page size"),
            NoFilter::default(),
        )
    }

    /// Fetcher over `ITEMS_PATH` returning a bare array keyed by `id`.
    pub fn keyed_fetcher(&self, page_size: u32) -> PaginatedFetcher<Item, NoFilter> {
        PaginatedFetcher::new(
            self.guard.clone(),
            ListEndpoint::keyed_array(ITEMS_PATH, |item: &Item| item.id.clone()),
            PageLimit::new(page_size).expect("valid page size"),
            NoFilter::default(),
        )
    }
}
