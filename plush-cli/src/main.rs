//! # plush-cli
//!
//! Command-line front end for the plushie offline post queue.
//!
//! ## Commands
//!
//! - `post`: Write a post into the offline queue
//! - `queue`: List posts waiting to sync
//! - `remove`: Drop a queued post
//! - `clear`: Drop every queued post
//! - `feed`: Show remote and queued posts, filtered and sorted
//! - `market`: Show unsold listings
//! - `sync`: Upload queued posts when the remote is reachable
//! - `status`: Show connectivity and queue size
//!
//! ## Example
//!
//! ```bash
//! # Queue a post (works offline)
//! plush-cli post "Picnic with Mr. Buttons" --tag picnic
//!
//! # List it for sale instead
//! plush-cli post "Retired bunny" --price 12.50
//!
//! # Upload once the remote is reachable
//! plush-cli sync
//!
//! # Browse
//! plush-cli feed --query picnic --sort popular
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{clear, feed, market, post, queue, remove, status, sync};
use config::CliConfig;

/// Offline-first post queue for the plushie community.
#[derive(Parser, Debug)]
#[command(name = "plush-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory holding the queue, config and local remote
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat the network as unavailable
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a post into the offline queue
    Post {
        /// Post title
        title: String,

        /// Body text
        #[arg(long, short)]
        content: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag", short)]
        tags: Vec<String>,

        /// List the post for sale at this price
        #[arg(long)]
        price: Option<f64>,
    },

    /// List posts waiting to sync
    Queue,

    /// Drop a queued post
    Remove {
        /// Post id or unique prefix
        id: String,
    },

    /// Drop every queued post
    Clear,

    /// Show remote and queued posts
    Feed {
        /// Only posts whose title, content or tags contain this text
        #[arg(long, short, default_value = "")]
        query: String,

        /// Ordering: newest, oldest or popular
        #[arg(long, short, default_value = "newest")]
        sort: String,
    },

    /// Show unsold marketplace listings
    Market,

    /// Upload queued posts
    Sync,

    /// Show connectivity and queue status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;

    let config = CliConfig::load(&data_dir)
        .await
        .context("Failed to load configuration")?;
    let network_online = !cli.offline;

    match cli.command {
        Commands::Post {
            title,
            content,
            image,
            tags,
            price,
        } => {
            let new = post::NewPost {
                title,
                content,
                image,
                tags,
                price,
            };
            post::run(&data_dir, &config, new).await?;
        }
        Commands::Queue => {
            queue::run(&data_dir, &config).await?;
        }
        Commands::Remove { id } => {
            remove::run(&data_dir, &config, &id).await?;
        }
        Commands::Clear => {
            clear::run(&data_dir, &config).await?;
        }
        Commands::Feed { query, sort } => {
            feed::run(&data_dir, &config, &query, &sort).await?;
        }
        Commands::Market => {
            market::run(&data_dir, &config).await?;
        }
        Commands::Sync => {
            sync::run(&data_dir, &config, network_online).await?;
        }
        Commands::Status => {
            status::run(&data_dir, &config, network_online).await?;
        }
    }

    Ok(())
}

/// Get the default data directory for plush-cli.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("org", "plushie", "plush-cli")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
