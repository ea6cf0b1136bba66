//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. Every per-user listing
//! filters on the owner column in SQL; callers never filter afterwards.

pub mod filing_repo;
pub mod mortgage_repo;
pub mod property_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use filing_repo::FilingRepo;
pub use mortgage_repo::MortgageRepo;
pub use property_repo::PropertyRepo;
pub use transaction_repo::TransactionRepo;
pub use user_repo::UserRepo;
