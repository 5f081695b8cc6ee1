//! Chat message payload returned by the channel read endpoint.
//!
//! Only four fields are kept. The wire object nests the author's name under
//! `author.username`; `Message` flattens it and falls back to `"unknown"`.
//! Serializing a `Message` produces the `{id, content, timestamp, author}`
//! echo stored in the price snapshot.
use serde::{Deserialize, Serialize};

/// Author name used when the API omits one.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireMessage")]
pub struct Message {
    /// Message snowflake id.
    pub id: String,
    /// Raw text body, including any custom emoji markup.
    #[serde(rename = "content")]
    pub body: String,
    /// ISO-8601 timestamp as sent by the API.
    pub timestamp: String,
    /// Author's username.
    pub author: String,
}

impl Message {
    /// Creates a message from its parts.
    pub fn new(id: &str, body: &str, timestamp: &str, author: &str) -> Self {
        Message {
            id: String::from(id),
            body: String::from(body),
            timestamp: String::from(timestamp),
            author: String::from(author),
        }
    }
}

#[derive(Deserialize)]
struct WireAuthor {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    author: Option<WireAuthor>,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        Message {
            id: wire.id,
            body: wire.content.unwrap_or_default(),
            timestamp: wire.timestamp.unwrap_or_default(),
            author: wire
                .author
                .and_then(|a| a.username)
                .unwrap_or_else(|| String::from(UNKNOWN_AUTHOR)),
        }
    }
}
