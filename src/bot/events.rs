//! Inbound chat events

use serde::Serialize;

/// A plain text message sent to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub chat_id: i64,
    pub text: String,
}

/// An inline search typed into a compose field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineQuery {
    /// Opaque identifier used to answer the query
    pub id: String,
    pub text: String,
}

/// Event delivered by a connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message(Message),
    InlineQuery(InlineQuery),
}

/// Formatting of outbound message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}
