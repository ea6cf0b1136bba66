//! [`DataStore`] backed by the hosted data service's REST interface.
//!
//! Tables are exposed at `{url}/rest/v1/{table}` with PostgREST-style
//! filters (`user_id=eq.7`, `order=created_at.desc`, `limit=50`). Every call
//! authenticates with the privileged service key, so this store must only
//! ever run server-side.

use std::time::Duration;

use async_trait::async_trait;
use columbia_core::types::DbId;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::filing::{CreateFiling, Filing};
use crate::models::mortgage::Mortgage;
use crate::models::property::Property;
use crate::models::transaction::Transaction;
use crate::models::user::User;
use crate::store::DataStore;

/// Per-request timeout for data service calls.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Newest-first ordering used by every listing.
const NEWEST_FIRST: &str = "created_at.desc,id.desc";

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestStore {
    pub fn new(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")])
            .query(filters);
        let response = check_status(self.authorized(request).send().await?).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    async fn list_owned<T: DeserializeOwned>(
        &self,
        table: &str,
        owner_column: &str,
        owner_id: DbId,
    ) -> Result<Vec<T>, StoreError> {
        self.select(
            table,
            &[
                (owner_column, eq(owner_id)),
                ("order", NEWEST_FIRST.to_string()),
            ],
        )
        .await
    }
}

fn eq(id: DbId) -> String {
    format!("eq.{id}")
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Upstream {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DataStore for RestStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        let request = self.client.get(format!("{}/rest/v1/", self.base_url));
        check_status(self.authorized(request).send().await?).await?;
        Ok(())
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let rows: Vec<User> = self
            .select("users", &[("id", eq(id)), ("limit", "1".to_string())])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.select("users", &[("order", NEWEST_FIRST.to_string())])
            .await
    }

    async fn list_transactions(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.select(
            "transactions",
            &[
                ("user_id", eq(user_id)),
                ("order", NEWEST_FIRST.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn list_properties(&self, owner_id: DbId) -> Result<Vec<Property>, StoreError> {
        self.list_owned("properties", "owner_id", owner_id).await
    }

    async fn list_mortgages(&self, user_id: DbId) -> Result<Vec<Mortgage>, StoreError> {
        self.list_owned("mortgages", "user_id", user_id).await
    }

    async fn create_filing(&self, input: &CreateFiling) -> Result<Filing, StoreError> {
        let request = self
            .client
            .post(self.table_url("filings"))
            .header("Prefer", "return=representation")
            .json(input);
        let response = check_status(self.authorized(request).send().await?).await?;
        let rows: Vec<Filing> = response.json().await?;
        rows.into_iter().next().ok_or_else(|| StoreError::Upstream {
            status: 200,
            body: "insert returned no rows".to_string(),
        })
    }

    async fn list_filings(&self, user_id: DbId) -> Result<Vec<Filing>, StoreError> {
        self.list_owned("filings", "user_id", user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            public_key: "anon".to_string(),
            service_key: "service".to_string(),
        }
    }

    #[test]
    fn table_urls_ignore_trailing_slash() {
        let store = RestStore::new(&config("https://db.example.com/")).unwrap();
        assert_eq!(
            store.table_url("transactions"),
            "https://db.example.com/rest/v1/transactions"
        );
    }

    #[test]
    fn owner_filters_use_equality_operator() {
        assert_eq!(eq(42), "eq.42");
    }
}
