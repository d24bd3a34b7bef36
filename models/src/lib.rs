//! REST contract data shapes for the job-board backend.
//!
//! This crate contains pure data structures describing the request and
//! response bodies the client depends on. Models have no I/O - they are
//! decoded by `board-client` and handed to list screens as-is.
//!
//! Backend business rules are not modelled; unknown response fields are
//! ignored so the backend can grow its payloads freely.

pub mod auth;
pub mod employer;
pub mod error;
pub mod hub;
pub mod page_limit;

#[cfg(test)]
mod tests;

pub use error::model_error::ModelError;
pub use page_limit::PageLimit;

use serde::Serialize;

/// Filter for list endpoints that take no parameters besides pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoFilter {}
