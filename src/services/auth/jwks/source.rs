//! Where signing keys come from.
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("jwks request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("jwks endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// A provider of the issuer's JSON Web Key Set.
///
/// Implementations do no caching; `JwksCache` owns memoization and timeouts.
#[async_trait]
pub trait JwksSource: Send + Sync + 'static {
    // Endpoint or description, for logs.
    fn describe(&self) -> &str;

    async fn fetch(&self) -> Result<JwkSet, JwksError>;
}

/// Fetches the key set from the identity provider's `jwks.json` endpoint.
#[derive(Debug, Clone)]
pub struct HttpJwksSource {
    url: String,
    client: reqwest::Client,
}

impl HttpJwksSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, JwksError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl JwksSource for HttpJwksSource {
    fn describe(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JwksError::Status(status));
        }

        Ok(response.json::<JwkSet>().await?)
    }
}
