//! Classification of a price list as a buy or sell offer.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Which side of the trade a price quote belongs to.
///
/// `Buying` lists what the shop pays when you sell to it, `Selling` lists what
/// it charges when you buy from it. Lines seen before any header land in
/// `Unknown`.
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
pub enum Section {
    /// Shop buys from the player ("you sell").
    Buying,
    /// Shop sells to the player ("you buy").
    Selling,
    /// No header seen yet in the current message.
    Unknown,
}

impl Section {
    /// Capitalized label used in console summaries.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Buying => "Buying",
            Section::Selling => "Selling",
            Section::Unknown => "Unknown",
        }
    }

    /// Detects a section header in an already lower-cased line.
    pub fn from_header(line_lower: &str) -> Option<Section> {
        if line_lower.contains("buying") && line_lower.contains("you sell") {
            Some(Section::Buying)
        } else if line_lower.contains("selling")
            && (line_lower.contains("we sell") || line_lower.contains("you buy"))
        {
            Some(Section::Selling)
        } else {
            None
        }
    }
}
