//! Command-line arguments for the leaderboard scraper.
use clap::Parser;
use scrape_common::http::DEFAULT_LEADERBOARD_API;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Key sent as the `Authorization` header of the leaderboard API.
    #[clap(long, env = "DONUT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Leaderboard API root.
    #[clap(long, default_value = DEFAULT_LEADERBOARD_API)]
    pub api_base: String,

    /// Pause between requests, in milliseconds.
    #[clap(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Pages of the money leaderboard to fetch.
    #[clap(long, default_value_t = 22)]
    pub money_pages: u32,

    /// Rows kept for every other leaderboard.
    #[clap(long, default_value_t = 10)]
    pub top: usize,

    /// Directory the output files are written to.
    #[clap(long, default_value = ".")]
    pub out_dir: PathBuf,
}
