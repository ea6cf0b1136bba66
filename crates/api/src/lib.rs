//! Bank of Columbia API server library.
//!
//! Exposes config, state, error handling, session auth and routes so the
//! integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
