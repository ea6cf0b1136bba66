//! Where the auth context gets its identity from.

use std::sync::Arc;

use async_trait::async_trait;
use columbia_core::user::UserRecord;
use reqwest::cookie::Jar;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::error::ClientError;

/// Answers "who am I" for the current browser session.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// The signed-in user, or `None` when there is no valid session.
    async fn fetch_identity(&self) -> Result<Option<UserRecord>, ClientError>;

    /// Ask the server to clear the session cookie.
    async fn logout(&self) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct MeBody {
    user: UserRecord,
}

/// [`IdentitySource`] backed by the API's `/api/auth/*` endpoints.
///
/// Cookies set by the server (including the cleared session cookie on
/// logout) are kept in the shared [`Jar`].
pub struct HttpIdentitySource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIdentitySource {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_jar(base_url, Arc::new(Jar::default()))
    }

    /// Use an existing cookie jar, e.g. one already holding a session cookie.
    pub fn with_jar(base_url: &str, jar: Arc<Jar>) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        let client = reqwest::Client::builder().cookie_provider(jar).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))
    }
}

#[async_trait]
impl IdentitySource for HttpIdentitySource {
    async fn fetch_identity(&self) -> Result<Option<UserRecord>, ClientError> {
        let response = self.client.get(self.endpoint("/api/auth/me")?).send().await?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<MeBody>().await?.user)),
            // No session, or the session's user no longer exists.
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(None),
            other => Err(ClientError::UnexpectedStatus(other.as_u16())),
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/logout")?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus(response.status().as_u16()));
        }
        Ok(())
    }
}
