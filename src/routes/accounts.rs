use axum::{routing::post, Router};

use crate::{handlers::accounts, state::AppState};

pub fn account_routes() -> Router<AppState> {
    Router::new().route("/validate-mt5-account", post(accounts::validate_mt5_account))
}
