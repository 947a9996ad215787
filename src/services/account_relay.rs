use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::models::account::AccountCredentials;
use crate::services::mt5_client::AccountValidator;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("All MT5 account fields are required")]
    MissingFields,

    #[error("Invalid MT5 account credentials")]
    InvalidCredentials,

    #[error("Failed to validate MT5 account: {0}")]
    ValidationUnavailable(String),
}

/// Forwards trading-account credentials to the upstream validator, once.
#[derive(Clone)]
pub struct AccountRelay {
    validator: Arc<dyn AccountValidator>,
}

impl AccountRelay {
    pub fn new(validator: Arc<dyn AccountValidator>) -> Self {
        Self { validator }
    }

    pub async fn validate(&self, credentials: &AccountCredentials) -> Result<(), RelayError> {
        credentials
            .validate()
            .map_err(|_| RelayError::MissingFields)?;

        match self.validator.validate(credentials).await {
            Ok(true) => {
                tracing::info!(
                    broker = %credentials.broker_name,
                    server = %credentials.server_name,
                    "MT5 account validated"
                );
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(
                    broker = %credentials.broker_name,
                    server = %credentials.server_name,
                    "MT5 account rejected"
                );
                Err(RelayError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!("MT5 validation error: {:#}", e);
                Err(RelayError::ValidationUnavailable(format!("{:#}", e)))
            }
        }
    }
}
