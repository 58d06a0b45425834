mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use lodestone_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "lodestone_server=info,lodestone_store=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Serve {
            port,
            database,
            bind,
        } => commands::serve::handle(config.resolve(database, bind, port)).await,

        Commands::Seed {
            file,
            default_rarity,
            database,
        } => {
            let settings = config.resolve(database, None, None);
            commands::seed::handle(&file, default_rarity, settings).await
        }

        Commands::Weights {
            hub,
            iterations,
            database,
        } => {
            let settings = config.resolve(database, None, None);
            commands::weights::handle(&hub, iterations, settings).await
        }

        Commands::Configure {
            show,
            database,
            bind,
            port,
        } => {
            let path = cli.config.as_deref();
            commands::configure::handle(path, config, show, database, bind, port)
        }
    }
}
