//! Authentication and authorization extractors.
//!
//! - [`auth::SessionUser`] -- resolves the session cookie to a user id.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role, read from the store.

pub mod auth;
pub mod rbac;
