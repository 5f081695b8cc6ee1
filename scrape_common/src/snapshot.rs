//! Output document of the price scraper.
//!
//! Besides the parsed `PriceTable`, the snapshot echoes every fetched message so
//! a consumer can audit what the prices were read from.
use serde::Serialize;

use crate::message::Message;
use crate::price::{PriceTable, parse};
use crate::store::utc_stamp;

/// File name the price scraper writes into its output directory.
pub const SNAPSHOT_FILE: &str = "spawner_prices.json";

/// Everything persisted after one price-scraping run.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSnapshot {
    /// UTC time the snapshot was built.
    pub updated_at: String,
    /// Channel the messages were read from.
    pub channel_id: String,
    /// Number of quotes across all sections of `prices`.
    pub total_prices: usize,
    /// Parsed price table.
    pub prices: PriceTable,
    /// The messages `prices` was parsed from, in fetch order.
    pub raw_messages: Vec<Message>,
}

impl PriceSnapshot {
    /// Parses `messages` and wraps the result with its metadata.
    pub fn build(channel_id: &str, messages: Vec<Message>) -> Self {
        let prices = parse(&messages);
        PriceSnapshot {
            updated_at: utc_stamp(),
            channel_id: String::from(channel_id),
            total_prices: prices.total_prices(),
            prices,
            raw_messages: messages,
        }
    }
}
