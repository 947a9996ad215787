use axum::{routing::post, Router};

use crate::{handlers::auth_otp, state::AppState};

pub fn auth_otp_routes() -> Router<AppState> {
    Router::new()
        // Email a fresh OTP
        .route("/send-otp", post(auth_otp::send_otp))
        // Verify OTP
        .route("/verify-otp", post(auth_otp::verify_otp))
}
