// src/errors.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::account_relay::RelayError;
use crate::services::otp_service::OtpError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Otp(OtpError::DeliveryFailed(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send OTP email".to_string(),
            ),
            AppError::Otp(OtpError::ExpiryOutOfRange) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to issue OTP".to_string(),
            ),
            AppError::Otp(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Relay(RelayError::ValidationUnavailable(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to validate MT5 account".to_string(),
            ),
            AppError::Relay(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::ConfigurationError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),
        };

        let mut body = json!({
            "error": error_message,
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if matches!(self, AppError::Relay(RelayError::InvalidCredentials)) {
            body["valid"] = json!(false);
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(format!("Invalid request body: {}", rejection.body_text()))
    }
}

// First field message wins; the wizard only shows one error at a time.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::ValidationError(message)
    }
}

impl AppError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn state_errors_are_bad_requests_with_specific_messages() {
        let (status, body) = render(OtpError::Expired.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "OTP expired");
        assert_eq!(body["success"], false);

        let (_, body) = render(OtpError::NoBinding.into()).await;
        assert_eq!(body["error"], "OTP not found or expired");

        let (_, body) = render(OtpError::Mismatch.into()).await;
        assert_eq!(body["error"], "Invalid OTP");
    }

    #[tokio::test]
    async fn dependency_errors_hide_the_cause() {
        let (status, body) = render(OtpError::DeliveryFailed("smtp 535".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to send OTP email");

        let (status, body) =
            render(RelayError::ValidationUnavailable("timed out".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to validate MT5 account");

        let (status, body) = render(OtpError::ExpiryOutOfRange.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to issue OTP");
    }

    #[tokio::test]
    async fn invalid_credentials_carry_valid_false() {
        let (status, body) = render(RelayError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["valid"], false);
        assert_eq!(body["error"], "Invalid MT5 account credentials");
    }
}
