use std::net::SocketAddr;

use anyhow::Context;
use student_manager::bootstrap::ensure_api_keys;
use student_manager::state::AppState;
use student_manager::{app, config::APP_CONFIG, db, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    let db_connection = db::connect(&APP_CONFIG.database_url, APP_CONFIG.database_max_connections)
        .await
        .context("Failed to connect to database")?;

    db::create_tables(&db_connection)
        .await
        .context("Failed to create database tables")?;

    tracing::info!("Checking api keys...");
    if let Err(e) = ensure_api_keys(&db_connection).await {
        tracing::error!("Failed to initialize api keys: {}", e);
        tracing::warn!("Continuing without api key initialization...");
    }

    let state = AppState::new(db_connection);
    let app = app::create_app(state);

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);

    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address)
        .await
        .context("Failed to bind HTTP listener")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server error")?;

    Ok(())
}
