pub mod admin;
pub mod auth;
pub mod efile;
pub mod public_config;
pub mod records;
pub mod transactions;
