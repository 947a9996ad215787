use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::account_relay::AccountRelay;
use crate::services::clock::SystemClock;
use crate::services::mailer::SmtpMailer;
use crate::services::mt5_client::Mt5Client;
use crate::services::otp_service::OTPService;

#[derive(Clone)]
pub struct AppState {
    pub otp_service: OTPService,
    pub account_relay: AccountRelay,
}

impl AppState {
    pub fn new(otp_service: OTPService, account_relay: AccountRelay) -> Self {
        AppState {
            otp_service,
            account_relay,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mailer = SmtpMailer::new(&config.mail)?;
        let otp_service = OTPService::new(Arc::new(mailer), Arc::new(SystemClock), config.otp_ttl());

        let mt5_client = Mt5Client::new(config.mt5_api_base_url.clone(), config.mt5_timeout())?;
        let account_relay = AccountRelay::new(Arc::new(mt5_client));

        Ok(Self::new(otp_service, account_relay))
    }
}
