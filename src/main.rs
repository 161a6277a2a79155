use anyhow::Context;

mod app;
mod applications;
mod config;
mod db;
mod state;

use crate::{app::build_app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "loan_manager=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env().context("load configuration")?;
    let app_state = AppState::init(&config)
        .await
        .context("failed to initialize database; server not started")?;
    let store = app_state.store.clone();

    let result = app::serve(build_app(app_state), &config.bind_addr()).await;

    store.close().await;
    tracing::info!("database pool closed");
    result
}
