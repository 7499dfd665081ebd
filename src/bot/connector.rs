//! Chat platform connector trait

use super::events::{Event, ParseMode};
use crate::results::InlineAnswer;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API error: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },
}

/// Delivers inbound events and accepts outbound responses
#[async_trait]
pub trait Connector: Send + Sync {
    /// Wait for the next batch of events
    async fn next_events(&self) -> Result<Vec<Event>, ConnectorError>;

    /// Answer an inline query
    async fn answer_query(
        &self,
        query_id: &str,
        answer: &InlineAnswer,
    ) -> Result<(), ConnectorError>;

    /// Send a message to a chat
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), ConnectorError>;
}
