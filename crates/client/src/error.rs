/// Failure talking to the API server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
