//! Show marketplace listings.

use anyhow::{Context, Result};
use plushie_client::FeedLoader;
use plushie_types::ExtendedPost;
use std::path::Path;

use super::{open_remote, short_id};
use crate::config::CliConfig;

/// Run the market command.
pub async fn run(data_dir: &Path, config: &CliConfig) -> Result<Vec<ExtendedPost>> {
    let mut loader = FeedLoader::new(open_remote(data_dir, config));
    if let Some(name) = &config.profile.default_username {
        loader = loader.with_default_username(name);
    }

    let listings = loader
        .load_marketplace()
        .await
        .context("Failed to load marketplace")?;

    if listings.is_empty() {
        println!("No listings for sale.");
    }
    for listing in &listings {
        println!("{}", format_listing(listing));
    }

    Ok(listings)
}

fn format_listing(listing: &ExtendedPost) -> String {
    let mut line = format!(
        "[{}] {} - ${:.2} from {}",
        short_id(listing.id.as_str()),
        listing.title,
        listing.price,
        listing.username
    );
    if !listing.condition.is_empty() {
        line.push_str(&format!(" ({})", listing.condition));
    }
    if listing.delivery_cost > 0.0 {
        line.push_str(&format!(" +${:.2} delivery", listing.delivery_cost));
    }
    line
}
