use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::{AppError, Result};
use crate::models::account::AccountCredentials;

/// Upstream check of trading-account credentials.
#[async_trait]
pub trait AccountValidator: Send + Sync {
    async fn validate(&self, credentials: &AccountCredentials) -> anyhow::Result<bool>;
}

#[derive(Debug, Deserialize)]
struct ValidateAccountReply {
    #[serde(default)]
    valid: bool,
}

/// Client for the MetaTrader 5 account-validation API.
#[derive(Clone)]
pub struct Mt5Client {
    base_url: String,
    client: Client,
}

impl Mt5Client {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build MT5 HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn validate_url(&self) -> String {
        format!("{}/validate-account", self.base_url)
    }
}

#[async_trait]
impl AccountValidator for Mt5Client {
    async fn validate(&self, credentials: &AccountCredentials) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(self.validate_url())
            .json(credentials)
            .send()
            .await
            .context("MT5 API request failed")?
            .error_for_status()
            .context("MT5 API rejected the request")?;

        let reply: ValidateAccountReply = response
            .json()
            .await
            .context("MT5 API returned an unreadable body")?;

        Ok(reply.valid)
    }
}
