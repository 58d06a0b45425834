//! `serve` subcommand

use std::sync::Arc;

use anyhow::{Context, Result};
use lodestone_server::{router, AppState, ServerSettings};

use super::open_store;

pub async fn handle(settings: ServerSettings) -> Result<()> {
    let store = open_store(&settings).await?;
    tracing::info!("Database initialized");

    let state = Arc::new(AppState::new(store));
    tracing::info!(backend = state.store.backend_name(), "Document store ready");
    let app = router(state);

    let bind_addr = settings.bind_addr();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
