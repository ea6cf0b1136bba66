//! Domain types and pure logic for the Bank of Columbia backend.
//!
//! Nothing in this crate performs I/O. The database, HTTP, and client
//! crates all build on these types.

pub mod efile;
pub mod error;
pub mod guard;
pub mod roles;
pub mod types;
pub mod user;
