use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The live one-time passcode bound to an email address.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OtpBinding {
    pub code: String,              // 6-digit OTP
    pub expires_at: DateTime<Utc>, // When OTP expires
}

impl OtpBinding {
    pub fn new(code: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            expires_at,
        }
    }

    /// A binding is usable during `[issued_at, expires_at)`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
