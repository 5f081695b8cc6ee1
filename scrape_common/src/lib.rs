//!
//! Common types and utilities shared by the price and leaderboard scrapers.
//!
//! This crate aggregates:
//! - `error` — unified error type `ScrapeError` used across the workspace.
//! - `result` — handy `Result<T, ScrapeError>` alias.
//! - `message` — chat messages as returned by the channel read endpoint.
//! - `section` — buying/selling classification of a price list.
//! - `price` — the price-message parser and its `PriceTable` output.
//! - `snapshot` — the JSON document written by the price scraper.
//! - `leaderboard` — leaderboard kinds, documents and the paging policy.
//! - `http` — blocking fetch clients for both external APIs.
//! - `store` — JSON file persistence.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod message;
pub mod section;
pub mod price;
pub mod snapshot;
pub mod leaderboard;
pub mod http;
pub mod store;

pub use error::ScrapeError;
pub use result::Result;
pub use message::Message;
pub use section::Section;
pub use price::{PriceQuote, PriceTable, parse};
