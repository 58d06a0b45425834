//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lodestone-server")]
#[command(about = "Loot list generator for Lodestone resource hubs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config_dir>/lodestone/config.toml)
    #[arg(long, global = true, env = "LODESTONE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Database path or URL
        #[arg(short, long, env = "DATABASE_URL")]
        database: Option<String>,

        /// Bind address
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Import hubs, provisions and settings from a JSON seed file
    Seed {
        /// Seed file
        file: PathBuf,

        /// Write the default rarity weights when the file has none
        #[arg(long)]
        default_rarity: bool,

        /// Database path or URL
        #[arg(short, long, env = "DATABASE_URL")]
        database: Option<String>,
    },

    /// Sample a hub's provision pool and report the weight distribution
    Weights {
        /// Resource hub ID
        hub: String,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "10000")]
        iterations: u64,

        /// Database path or URL
        #[arg(short, long, env = "DATABASE_URL")]
        database: Option<String>,
    },

    /// Show or set persisted defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Default database path or URL
        #[arg(long)]
        database: Option<String>,

        /// Default bind address
        #[arg(long)]
        bind: Option<String>,

        /// Default port
        #[arg(long)]
        port: Option<u16>,
    },
}
