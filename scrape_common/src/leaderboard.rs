//! Leaderboard kinds, output documents and the paging policy.
//!
//! The money leaderboard is collected in full (every page up to a fixed page
//! count) while all other kinds only keep the top entries of their first page.
//! Fetching a single page is abstracted by [`PageSource`] so the policy can be
//! driven by the HTTP client or by an in-memory source in tests.
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::result::Result;
use crate::store::utc_stamp;

/// Combined document with every leaderboard.
pub const ALL_LEADERBOARDS_FILE: &str = "all_leaderboards.json";
/// Full money leaderboard.
pub const MONEY_FILE: &str = "top1000.json";
/// Plain list of money leaderboard usernames.
pub const USERNAMES_FILE: &str = "usernames.json";

/// A leaderboard row. Rows are kept exactly as the API returns them.
pub type LeaderboardEntry = Value;

/// Leaderboards exposed by the game server API.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaderboardKind {
    Money,
    Kills,
    Deaths,
    MobsKilled,
    BrokenBlocks,
    PlacedBlocks,
    Playtime,
    Sell,
    Shards,
    Shop,
}

/// Fetches one page of one leaderboard.
pub trait PageSource {
    /// Returns the rows of `page` (1-based) of the `kind` leaderboard.
    fn fetch_page(&self, kind: LeaderboardKind, page: u32) -> Result<Vec<LeaderboardEntry>>;
}

/// How many pages to fetch and how politely.
#[derive(Debug, Clone)]
pub struct PagingPolicy {
    /// Pages of the money leaderboard to concatenate.
    pub money_pages: u32,
    /// Rows kept from the first page of every other leaderboard.
    pub top_n: usize,
    /// Pause after every request.
    pub delay: Duration,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        PagingPolicy {
            money_pages: 22,
            top_n: 10,
            delay: Duration::from_millis(500),
        }
    }
}

/// Fetches a page, logging and swallowing any failure as an empty page.
fn fetch_or_empty<S: PageSource>(
    source: &S,
    kind: LeaderboardKind,
    page: u32,
) -> Vec<LeaderboardEntry> {
    match source.fetch_page(kind, page) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error fetching {} page {}: {}", kind, page, e);
            Vec::new()
        }
    }
}

/// Collects every page of the money leaderboard.
pub fn collect_money<S: PageSource>(source: &S, policy: &PagingPolicy) -> Vec<LeaderboardEntry> {
    let mut players = Vec::new();
    for page in 1..=policy.money_pages {
        info!("Fetching money page {}/{}...", page, policy.money_pages);
        players.extend(fetch_or_empty(source, LeaderboardKind::Money, page));
        thread::sleep(policy.delay);
    }
    players
}

/// Collects the first `policy.top_n` rows of `kind`.
pub fn collect_top<S: PageSource>(
    source: &S,
    kind: LeaderboardKind,
    policy: &PagingPolicy,
) -> Vec<LeaderboardEntry> {
    info!("Fetching top {} for {}...", policy.top_n, kind);
    let mut players = fetch_or_empty(source, kind, 1);
    players.truncate(policy.top_n);
    players
}

/// Collects the full money leaderboard and the top of every other kind.
///
/// Page failures never abort the run: a failed page contributes no rows.
pub fn collect_leaderboards<S: PageSource>(
    source: &S,
    policy: &PagingPolicy,
) -> BTreeMap<LeaderboardKind, Vec<LeaderboardEntry>> {
    let mut boards = BTreeMap::new();
    boards.insert(LeaderboardKind::Money, collect_money(source, policy));

    for kind in LeaderboardKind::iter().filter(|k| *k != LeaderboardKind::Money) {
        let top = collect_top(source, kind, policy);
        boards.insert(kind, top);
        thread::sleep(policy.delay);
    }
    boards
}

/// Every leaderboard in one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboards {
    /// UTC time of the run.
    pub updated_at: String,
    /// Rows per leaderboard.
    pub leaderboards: BTreeMap<LeaderboardKind, Vec<LeaderboardEntry>>,
}

impl Leaderboards {
    /// Stamps `leaderboards` with the current time.
    pub fn new(leaderboards: BTreeMap<LeaderboardKind, Vec<LeaderboardEntry>>) -> Self {
        Leaderboards {
            updated_at: utc_stamp(),
            leaderboards,
        }
    }

    /// Rows of one leaderboard; empty if it was not collected.
    pub fn rows(&self, kind: LeaderboardKind) -> &[LeaderboardEntry] {
        self.leaderboards.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The money leaderboard as its standalone document.
    pub fn money(&self) -> MoneyLeaderboard {
        let players = self.rows(LeaderboardKind::Money).to_vec();
        MoneyLeaderboard {
            updated_at: self.updated_at.clone(),
            count: players.len(),
            players,
        }
    }
}

/// The money leaderboard on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyLeaderboard {
    /// UTC time of the run.
    pub updated_at: String,
    /// Number of rows in `players`.
    pub count: usize,
    /// Rows in rank order.
    pub players: Vec<LeaderboardEntry>,
}

impl MoneyLeaderboard {
    /// Non-empty `username` values of all rows, in rank order.
    pub fn usernames(&self) -> Vec<String> {
        usernames(&self.players)
    }
}

/// Extracts the non-empty `username` string of each row.
pub fn usernames(rows: &[LeaderboardEntry]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get("username").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
