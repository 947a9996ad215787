use axum::extract::State;

use crate::dtos::account_dtos::ValidateAccountResponse;
use crate::errors::Result;
use crate::extractors::Json;
use crate::models::account::AccountCredentials;
use crate::state::AppState;

pub async fn validate_mt5_account(
    State(state): State<AppState>,
    Json(credentials): Json<AccountCredentials>,
) -> Result<Json<ValidateAccountResponse>> {
    state.account_relay.validate(&credentials).await?;

    Ok(Json(ValidateAccountResponse { valid: true }))
}
