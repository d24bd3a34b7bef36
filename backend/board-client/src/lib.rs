pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod logger;
pub mod navigator;
pub mod pagination;
pub mod retry;
pub mod session;

#[cfg(test)]
mod tests;

pub use executor::{GuardedExecutor, GuardedOutcome, Method, SessionGuard};
pub use pagination::{PageLoad, PageState, PageStatus, PaginatedFetcher};
pub use session::{Portal, Session};

pub const DEFAULT_API_HOSTNAME: &str = "localhost";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_API_HOSTNAME, ":", DEFAULT_API_PORT, "/");
