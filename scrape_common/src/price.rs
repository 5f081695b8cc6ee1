//! Spawner price extraction from chat price lists.
//!
//! A price list is a free-form chat message such as:
//!
//! ```text
//! **Buying** (you sell to us)
//! > - <:SkeletonFace:1379787344495771698>Skeleton Spawners  **1.2m** each
//! > - Spider Spawners **450k-500k** each
//! ```
//!
//! Every line is classified as a section header, a price line or anything
//! else. Header lines move the section cursor, price lines are stored under
//! the current section, everything else is ignored. Parsing never fails: noisy
//! or malformed lines are skipped and the worst case is an empty table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::message::Message;
use crate::section::Section;

/// Custom inline emoji markup, e.g. `<:Name:123>` or animated `<a:Name:123>`.
static CUSTOM_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a?:\w+:\d+>").expect("emoji pattern is valid"));

/// `<name> Spawner(s) **<magnitude>[-<magnitude>]** each`, anywhere in the line.
static PRICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([A-Za-z\s]+?)\s*Spawners?\s+\*\*([0-9.]+[kmb]?(?:\s*-\s*[0-9.]+[kmb]?)?)\*\*\s*each",
    )
    .expect("price pattern is valid")
});

/// Item names shorter than this are treated as noise.
const MIN_NAME_LEN: usize = 2;

/// A single quoted price, keyed by item name inside a [`PriceTable`] section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Lower-cased magnitude string, possibly a range such as `450k-500k`.
    pub price: String,
    /// Timestamp of the message the quote was read from.
    pub source_timestamp: String,
    /// Author of that message.
    pub author: String,
}

/// Result of a single classifying pass over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// The line opens a new section.
    Header(Section),
    /// The line quotes a price. `name` is normalized, `price` lower-cased.
    Price {
        /// Title-cased item name.
        name: String,
        /// Raw magnitude text.
        price: String,
    },
    /// Anything else, including price lines whose name is too short.
    Other,
}

/// Item prices grouped by section. Sections without entries are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    sections: BTreeMap<Section, BTreeMap<String, PriceQuote>>,
}

impl PriceTable {
    /// Entries of one section, if it has any.
    pub fn section(&self, section: Section) -> Option<&BTreeMap<String, PriceQuote>> {
        self.sections.get(&section)
    }

    /// Looks up the quote for `item` in `section`.
    pub fn get(&self, section: Section, item: &str) -> Option<&PriceQuote> {
        self.sections.get(&section).and_then(|items| items.get(item))
    }

    /// Iterates over non-empty sections in `Buying`, `Selling`, `Unknown` order.
    pub fn iter(&self) -> impl Iterator<Item = (&Section, &BTreeMap<String, PriceQuote>)> {
        self.sections.iter()
    }

    /// Number of non-empty sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` when no quote was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of quotes across all sections.
    pub fn total_prices(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }
}

/// Removes custom emoji markup so it cannot bleed into item names.
pub fn strip_custom_emoji(text: &str) -> String {
    CUSTOM_EMOJI.replace_all(text, "").into_owned()
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Classifies one line of an emoji-stripped message.
///
/// Header detection works on the lower-cased line; price extraction uses the
/// original text. A header line is never also a price line.
pub fn classify_line(line: &str) -> LineKind {
    if let Some(section) = Section::from_header(&line.to_lowercase()) {
        return LineKind::Header(section);
    }

    let Some(caps) = PRICE_LINE.captures(line) else {
        return LineKind::Other;
    };
    let name = title_case(caps[1].trim()).trim().to_string();
    if name.chars().count() < MIN_NAME_LEN {
        return LineKind::Other;
    }
    LineKind::Price {
        name,
        price: caps[2].trim().to_lowercase(),
    }
}

/// Extracts every spawner price from `messages`.
///
/// The section cursor starts at [`Section::Unknown`] for each message and is
/// never carried over to the next one. Later quotes for the same item and
/// section overwrite earlier ones.
pub fn parse<'a, I>(messages: I) -> PriceTable
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut sections: BTreeMap<Section, BTreeMap<String, PriceQuote>> =
        Section::iter().map(|s| (s, BTreeMap::new())).collect();

    for msg in messages {
        let cleaned = strip_custom_emoji(&msg.body);
        let mut cursor = Section::Unknown;

        for line in cleaned.lines() {
            match classify_line(line) {
                LineKind::Header(section) => cursor = section,
                LineKind::Price { name, price } => {
                    debug!("Found: {} = {} ({})", name, price, cursor);
                    sections.entry(cursor).or_default().insert(
                        name,
                        PriceQuote {
                            price,
                            source_timestamp: msg.timestamp.clone(),
                            author: msg.author.clone(),
                        },
                    );
                }
                LineKind::Other => {}
            }
        }
    }

    sections.retain(|_, items| !items.is_empty());
    PriceTable { sections }
}
