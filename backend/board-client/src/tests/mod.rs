// Unit tests for board-client internals.
// Network behaviour is covered by integration_tests/ against a mock backend.

mod config;
mod logger;
mod outcome;
mod page_shape;
mod page_state;
mod request_error;
mod session;
