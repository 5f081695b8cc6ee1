//! Command-line arguments for the price scraper.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use scrape_common::http::{DEFAULT_CHANNEL_ID, DEFAULT_CHAT_API};
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Token sent as the `Authorization` header of the chat API.
    #[clap(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Channel holding the price lists.
    #[clap(long, default_value = DEFAULT_CHANNEL_ID)]
    pub channel_id: String,

    /// Number of most recent messages to read.
    #[clap(long, default_value_t = 10)]
    pub limit: u32,

    /// Chat API root.
    #[clap(long, default_value = DEFAULT_CHAT_API)]
    pub api_base: String,

    /// Directory the snapshot file is written to.
    #[clap(long, default_value = ".")]
    pub out_dir: PathBuf,
}
