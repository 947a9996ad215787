use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Trading-account credentials submitted by the signup wizard and forwarded
/// verbatim to the MT5 validation API.
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountCredentials {
    #[validate(length(min = 1, message = "Broker name is required"))]
    pub broker_name: String,

    #[validate(length(min = 1, message = "Server name is required"))]
    pub server_name: String,

    #[validate(length(min = 1, message = "Account ID is required"))]
    pub account_id: String,

    #[validate(length(min = 1, message = "Passcode is required"))]
    pub passcode: String,
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("broker_name", &self.broker_name)
            .field("server_name", &self.server_name)
            .field("account_id", &self.account_id)
            .field("passcode", &"<redacted>")
            .finish()
    }
}
