//! Domain model structs and DTOs.
//!
//! Each row struct derives `FromRow` for the Postgres backend and
//! `Deserialize` for the REST data service, which returns the same columns
//! as JSON.

pub mod filing;
pub mod mortgage;
pub mod property;
pub mod transaction;
pub mod user;
