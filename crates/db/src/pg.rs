//! Postgres-backed [`DataStore`] built on the repository layer.

use async_trait::async_trait;
use columbia_core::types::DbId;

use crate::error::StoreError;
use crate::models::filing::{CreateFiling, Filing};
use crate::models::mortgage::Mortgage;
use crate::models::property::Property;
use crate::models::transaction::Transaction;
use crate::models::user::User;
use crate::repositories::{FilingRepo, MortgageRepo, PropertyRepo, TransactionRepo, UserRepo};
use crate::store::DataStore;
use crate::DbPool;

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn list_transactions(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(TransactionRepo::list_for_user(&self.pool, user_id, limit).await?)
    }

    async fn list_properties(&self, owner_id: DbId) -> Result<Vec<Property>, StoreError> {
        Ok(PropertyRepo::list_for_owner(&self.pool, owner_id).await?)
    }

    async fn list_mortgages(&self, user_id: DbId) -> Result<Vec<Mortgage>, StoreError> {
        Ok(MortgageRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn create_filing(&self, input: &CreateFiling) -> Result<Filing, StoreError> {
        Ok(FilingRepo::create(&self.pool, input).await?)
    }

    async fn list_filings(&self, user_id: DbId) -> Result<Vec<Filing>, StoreError> {
        Ok(FilingRepo::list_for_user(&self.pool, user_id).await?)
    }
}
