use axum::extract::State;
use validator::Validate;

use crate::dtos::otp_dtos::{MessageResponse, SendOtpRequest, VerifyOtpRequest};
use crate::errors::Result;
use crate::extractors::Json;
use crate::services::otp_service::OtpError;
use crate::state::AppState;

/// 1. Send OTP to the signup email.
///
/// The HTTP layer also rejects a non-empty but malformed address with
/// 400 "Invalid email address" before anything is stored or mailed. This is
/// the same check the signup wizard runs client-side; `OTPService::send_otp`
/// itself accepts any non-empty string.
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<MessageResponse>> {
    if req.email().is_empty() {
        return Err(OtpError::EmailMissing.into());
    }
    req.validate()?;

    state.otp_service.send_otp(req.email()).await?;

    Ok(Json(MessageResponse::new("OTP sent successfully")))
}

// 2. Verify OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>> {
    state.otp_service.verify_otp(req.email(), req.otp())?;

    Ok(Json(MessageResponse::new("OTP verified successfully")))
}
