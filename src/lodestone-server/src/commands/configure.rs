//! Configuration command handlers
//!
//! Handles the `configure` subcommand for persisting server defaults.

use std::path::Path;

use anyhow::Result;
use lodestone_server::Config;

/// Handle the configure command
///
/// With `show`, prints the current file. Otherwise any supplied value is
/// written back; with nothing supplied, prints usage.
pub fn handle(
    path: Option<&Path>,
    mut config: Config,
    show: bool,
    database: Option<String>,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if show {
        show_config(path, &config);
        return Ok(());
    }

    if !apply(&mut config, database, bind, port) {
        show_usage();
        return Ok(());
    }

    let saved = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };
    println!("Config saved to: {}", saved.display());

    Ok(())
}

/// Copy supplied values into the config; false if nothing was supplied
fn apply(
    config: &mut Config,
    database: Option<String>,
    bind: Option<String>,
    port: Option<u16>,
) -> bool {
    let changed = database.is_some() || bind.is_some() || port.is_some();
    if database.is_some() {
        config.database = database;
    }
    if bind.is_some() {
        config.bind = bind;
    }
    if port.is_some() {
        config.port = port;
    }
    changed
}

fn show_config(path: Option<&Path>, config: &Config) {
    let unset = "(default)";
    println!("Database: {}", config.database.as_deref().unwrap_or(unset));
    println!("Bind:     {}", config.bind.as_deref().unwrap_or(unset));
    match config.port {
        Some(port) => println!("Port:     {}", port),
        None => println!("Port:     {}", unset),
    }

    let path = path.map(Path::to_path_buf).or_else(|| Config::config_path().ok());
    if let Some(path) = path {
        println!("Config file: {}", path.display());
    }
}

fn show_usage() {
    println!("Usage: lodestone-server configure --database PATH [--bind ADDR] [--port PORT]");
    println!("   or: lodestone-server configure --show");
}
