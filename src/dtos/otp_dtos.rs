use serde::{Deserialize, Serialize};
use validator::Validate;

// Absent and `null` fields both count as missing.

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SendOtpRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

impl SendOtpRequest {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

impl VerifyOtpRequest {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn otp(&self) -> &str {
        self.otp.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
