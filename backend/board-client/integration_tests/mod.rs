// Integration tests for board-client against a mock backend.
//
// Each file drives the public API end to end over HTTP with wiremock
// standing in for the hub and employer backends.

mod auth;
mod executor;
mod helpers;
mod pagination;
mod retry;
