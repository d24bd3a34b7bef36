//! Shared primitives for the job-board API client.
//!
//! This crate sits at the bottom of the dependency graph and holds the
//! small value types every other crate needs:
//!
//! - **ErrorLocation**: source location attached to every error variant
//! - **HttpStatusCode**: status classification and user-facing messages
//! - **BearerToken**: session credential that never leaks into logs
//!
//! ## Architecture
//!
//! - **common** (this crate): Shared primitives
//! - **models**: REST contract data shapes
//! - **board-client**: Session-guarded executor, pagination, auth flow

pub mod bearer_token;
pub mod error;
pub mod http_status;

#[cfg(test)]
mod tests;

pub use bearer_token::BearerToken;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
