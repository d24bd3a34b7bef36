//! Navigation seam used when a session expires.
//!
//! The executor never navigates on its own; it reports
//! `Unauthenticated` and [`SessionGuard`](crate::executor::SessionGuard)
//! hands the login route to whatever [`Navigator`] the front-end injected.

use log::info;

pub trait Navigator: Send + Sync {
    /// Send the user to the portal's login entry point.
    fn redirect_to_login(&self, login_route: &str);
}

/// Navigator for headless callers: records the redirect in the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect_to_login(&self, login_route: &str) {
        info!("Session expired, login required at {login_route}");
    }
}
