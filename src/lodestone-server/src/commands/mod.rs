//! Command handlers for the lodestone binary
//!
//! Each subcommand has its own module with a `handle` function.

pub mod configure;
pub mod seed;
pub mod serve;
pub mod weights;

use std::fs;

use anyhow::{Context, Result};
use lodestone_server::config::database_file;
use lodestone_server::ServerSettings;
use lodestone_store::SqliteStore;

/// Create the directory holding a file-backed database
fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let parent = database_file(database_url)
        .and_then(|file| file.parent().map(|p| p.to_path_buf()))
        .filter(|dir| !dir.as_os_str().is_empty());

    if let Some(dir) = parent {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }
    Ok(())
}

/// Connect to the configured database and make sure the schema exists
pub async fn open_store(settings: &ServerSettings) -> Result<SqliteStore> {
    ensure_parent_dir(&settings.database_url)?;
    tracing::info!("Connecting to database: {}", settings.database_url);
    let store = SqliteStore::connect(&settings.database_url)
        .await
        .with_context(|| format!("Failed to open {}", settings.database_url))?;
    store.init().await.context("Failed to initialize schema")?;
    Ok(store)
}
