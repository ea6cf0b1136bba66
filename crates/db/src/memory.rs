//! In-process [`DataStore`] for local development and tests.
//!
//! Selected with `DATABASE_URL=memory://`. Data lives for the life of the
//! process. [`MemoryStore::set_unavailable`] makes every query fail, which
//! lets tests exercise the upstream-failure paths.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use columbia_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::filing::{CreateFiling, Filing};
use crate::models::mortgage::{CreateMortgage, Mortgage};
use crate::models::property::{CreateProperty, Property};
use crate::models::transaction::{CreateTransaction, Transaction};
use crate::models::user::{CreateUser, User};
use crate::store::DataStore;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    transactions: Vec<Transaction>,
    properties: Vec<Property>,
    mortgages: Vec<Mortgage>,
    filings: Vec<Filing>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    next_id: AtomicI64,
    unavailable: AtomicBool,
}

/// Newest first, ties broken by the larger id.
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (Timestamp, DbId)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Make every subsequent query fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Upstream {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }
        Ok(())
    }

    pub async fn insert_user(&self, input: CreateUser) -> User {
        let now = Utc::now();
        let user = User {
            id: self.allocate_id(),
            role: input.role,
            display_name: input.display_name,
            platform_id: input.platform_id,
            avatar_url: input.avatar_url,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.users.push(user.clone());
        user
    }

    /// Remove a user and everything they own. Returns `true` if the user existed.
    pub async fn delete_user(&self, id: DbId) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        tables.transactions.retain(|t| t.user_id != id);
        tables.properties.retain(|p| p.owner_id != id);
        tables.mortgages.retain(|m| m.user_id != id);
        tables.filings.retain(|f| f.user_id != id);
        tables.users.len() != before
    }

    /// Insert a transaction with an explicit creation time.
    pub async fn insert_transaction_at(
        &self,
        input: CreateTransaction,
        created_at: Timestamp,
    ) -> Transaction {
        let row = Transaction {
            id: self.allocate_id(),
            user_id: input.user_id,
            kind: input.kind,
            amount: input.amount,
            description: input.description,
            created_at,
        };
        self.tables.write().await.transactions.push(row.clone());
        row
    }

    pub async fn insert_transaction(&self, input: CreateTransaction) -> Transaction {
        self.insert_transaction_at(input, Utc::now()).await
    }

    pub async fn insert_property(&self, input: CreateProperty) -> Property {
        let row = Property {
            id: self.allocate_id(),
            owner_id: input.owner_id,
            address: input.address,
            parcel_id: input.parcel_id,
            assessed_value: input.assessed_value,
            created_at: Utc::now(),
        };
        self.tables.write().await.properties.push(row.clone());
        row
    }

    pub async fn insert_mortgage(&self, input: CreateMortgage) -> Mortgage {
        let row = Mortgage {
            id: self.allocate_id(),
            user_id: input.user_id,
            property_id: input.property_id,
            principal: input.principal,
            balance: input.principal,
            rate_bps: input.rate_bps,
            term_months: input.term_months,
            status: "active".to_string(),
            created_at: Utc::now(),
        };
        self.tables.write().await.mortgages.push(row.clone());
        row
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.ensure_available()
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.ensure_available()?;
        let mut rows = self.tables.read().await.users.clone();
        newest_first(&mut rows, |u| (u.created_at, u.id));
        Ok(rows)
    }

    async fn list_transactions(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.ensure_available()?;
        let mut rows: Vec<Transaction> = self
            .tables
            .read()
            .await
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |t| (t.created_at, t.id));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn list_properties(&self, owner_id: DbId) -> Result<Vec<Property>, StoreError> {
        self.ensure_available()?;
        let mut rows: Vec<Property> = self
            .tables
            .read()
            .await
            .properties
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |p| (p.created_at, p.id));
        Ok(rows)
    }

    async fn list_mortgages(&self, user_id: DbId) -> Result<Vec<Mortgage>, StoreError> {
        self.ensure_available()?;
        let mut rows: Vec<Mortgage> = self
            .tables
            .read()
            .await
            .mortgages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |m| (m.created_at, m.id));
        Ok(rows)
    }

    async fn create_filing(&self, input: &CreateFiling) -> Result<Filing, StoreError> {
        self.ensure_available()?;
        let row = Filing {
            id: self.allocate_id(),
            user_id: input.user_id,
            filing_type: input.filing_type.clone(),
            status: input.status.clone(),
            payload: input.payload.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.filings.push(row.clone());
        Ok(row)
    }

    async fn list_filings(&self, user_id: DbId) -> Result<Vec<Filing>, StoreError> {
        self.ensure_available()?;
        let mut rows: Vec<Filing> = self
            .tables
            .read()
            .await
            .filings
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut rows, |f| (f.created_at, f.id));
        Ok(rows)
    }
}
