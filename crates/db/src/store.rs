//! The [`DataStore`] seam between request handlers and the store of record.

use std::sync::Arc;

use async_trait::async_trait;
use columbia_core::types::DbId;

use crate::error::StoreError;
use crate::models::filing::{CreateFiling, Filing};
use crate::models::mortgage::Mortgage;
use crate::models::property::Property;
use crate::models::transaction::Transaction;
use crate::models::user::User;

/// Read and write operations the API needs from the store of record.
///
/// Every per-user method must return only rows owned by the given id.
/// Ordering is newest first (`created_at` descending, ties broken by id).
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn list_transactions(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError>;

    async fn list_properties(&self, owner_id: DbId) -> Result<Vec<Property>, StoreError>;

    async fn list_mortgages(&self, user_id: DbId) -> Result<Vec<Mortgage>, StoreError>;

    async fn create_filing(&self, input: &CreateFiling) -> Result<Filing, StoreError>;

    async fn list_filings(&self, user_id: DbId) -> Result<Vec<Filing>, StoreError>;
}

/// Shared handle stored in the application state.
pub type SharedStore = Arc<dyn DataStore>;
