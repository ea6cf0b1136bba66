//! Session primitives.
//!
//! - [`session`] -- signed session token issue and verification.
//! - [`cookie`] -- the `session-token` cookie.

pub mod cookie;
pub mod session;
