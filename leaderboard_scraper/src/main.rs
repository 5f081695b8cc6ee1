//! Leaderboard scraper.
//!
//! Collects the full money leaderboard and the top rows of every other
//! leaderboard from the game server API, then writes three files:
//!
//! - `all_leaderboards.json` — every leaderboard in one document.
//! - `top1000.json` — the money leaderboard on its own.
//! - `usernames.json` — money leaderboard usernames as a flat list.
//!
//! Requests are sequential with a fixed pause between them. A page that fails
//! is logged and skipped; the run continues with the next page.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::info;
use scrape_common::ScrapeError;
use scrape_common::Result;
use scrape_common::http::{LeaderboardClient, LeaderboardConfig};
use scrape_common::leaderboard::{
    ALL_LEADERBOARDS_FILE, LeaderboardKind, Leaderboards, MONEY_FILE, PagingPolicy,
    USERNAMES_FILE, collect_leaderboards,
};
use scrape_common::store::{write_json, write_json_compact};
use std::time::Duration;
use strum::IntoEnumIterator;

fn main() -> Result<(), ScrapeError> {
    dotenv::dotenv().ok();
    init_logger();
    let args = Args::parse();

    let client = LeaderboardClient::new(LeaderboardConfig {
        api_key: args.api_key.unwrap_or_default(),
        api_base: args.api_base,
    })?;
    let policy = PagingPolicy {
        money_pages: args.money_pages,
        top_n: args.top,
        delay: Duration::from_millis(args.delay_ms),
    };

    let doc = Leaderboards::new(collect_leaderboards(&client, &policy));
    let money = doc.money();

    write_json(&doc, args.out_dir.join(ALL_LEADERBOARDS_FILE))?;
    write_json(&money, args.out_dir.join(MONEY_FILE))?;
    write_json_compact(&money.usernames(), args.out_dir.join(USERNAMES_FILE))?;

    info!("Done!");
    info!("Money leaderboard: {} players", money.count);
    for kind in LeaderboardKind::iter().filter(|k| *k != LeaderboardKind::Money) {
        info!("{}: {} players (top {})", kind, doc.rows(kind).len(), policy.top_n);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
