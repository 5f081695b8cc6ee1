//! Spawner price scraper.
//!
//! Reads the most recent messages of the price channel, extracts every
//! `<name> Spawners **<price>** each` line and writes the result, together with
//! the raw messages, to `spawner_prices.json`.
//!
//! Usage example (CLI):
//! ```bash
//! DISCORD_TOKEN=... price_scraper --limit 10 --out-dir ./data
//! ```
//!
//! The token may also be placed in a `.env` file next to the binary.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::{error, info, warn};
use scrape_common::ScrapeError;
use scrape_common::Result;
use scrape_common::http::{ChatClient, ChatConfig};
use scrape_common::snapshot::{PriceSnapshot, SNAPSHOT_FILE};
use scrape_common::store::write_json;

fn main() -> Result<(), ScrapeError> {
    dotenv::dotenv().ok();
    init_logger();
    let args = Args::parse();

    let client = ChatClient::new(ChatConfig {
        token: args.token.unwrap_or_default(),
        channel_id: args.channel_id,
        api_base: args.api_base,
        limit: args.limit,
    })?;

    info!("Fetching messages from channel {}...", client.channel_id());
    let messages = client
        .fetch_messages()
        .inspect_err(|e| error!("Failed to fetch messages: {}", e))?;
    if messages.is_empty() {
        warn!("Channel returned no messages, nothing to write");
        return Ok(());
    }
    info!("Fetched {} messages", messages.len());

    let snapshot = PriceSnapshot::build(client.channel_id(), messages);
    let path = args.out_dir.join(SNAPSHOT_FILE);
    write_json(&snapshot, &path)?;

    info!("Done! Found {} spawner prices", snapshot.total_prices);
    for (section, items) in snapshot.prices.iter() {
        info!("  {}: {} types", section.title(), items.len());
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
