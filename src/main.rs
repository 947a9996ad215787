use std::net::SocketAddr;

use axum::Router;
use tracing_subscriber::EnvFilter;

mod config;
mod dtos;
mod errors;
mod extractors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("⚙️ Configuration: {}", config.get_config_info());

    let app_state = match AppState::from_config(&config) {
        Ok(state) => {
            tracing::info!("✅ OTP mailer and MT5 client initialized");
            state
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize services: {}", e);
            std::process::exit(1);
        }
    };

    app_state
        .otp_service
        .spawn_sweeper(config.otp_sweep_interval());

    let app = routes::build_router(app_state);
    start_server(&config, app).await;
}

async fn start_server(config: &AppConfig, app: Router) {
    let addr = match format!("{}:{}", config.host, config.port).parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}
