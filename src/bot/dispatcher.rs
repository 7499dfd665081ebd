//! Event dispatch between a connector and the query router

use super::connector::Connector;
use super::events::{Event, InlineQuery, Message, ParseMode};
use crate::search::{QueryOutcome, QueryRouter};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Pause after a failed poll before polling again
const POLL_ERROR_DELAY: Duration = Duration::from_secs(1);

/// The bot: a connector, a router and the help reply
pub struct Bot<C> {
    connector: Arc<C>,
    router: Arc<QueryRouter>,
    help_message: Arc<str>,
}

impl<C> Clone for Bot<C> {
    fn clone(&self) -> Self {
        Self {
            connector: self.connector.clone(),
            router: self.router.clone(),
            help_message: self.help_message.clone(),
        }
    }
}

impl<C: Connector + 'static> Bot<C> {
    pub fn new(
        connector: Arc<C>,
        router: Arc<QueryRouter>,
        help_message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            connector,
            router,
            help_message: help_message.into(),
        }
    }

    /// Handle one inbound event
    pub async fn handle(&self, event: Event) {
        match event {
            Event::Message(message) => self.handle_message(message).await,
            Event::InlineQuery(query) => self.handle_query(query).await,
        }
    }

    async fn handle_message(&self, message: Message) {
        if let Err(e) = self
            .connector
            .send_message(message.chat_id, &self.help_message, ParseMode::Html)
            .await
        {
            warn!("Failed to send help to chat {}: {}", message.chat_id, e);
        }
    }

    async fn handle_query(&self, query: InlineQuery) {
        let answer = match self.router.route(&query.text).await {
            QueryOutcome::Answered(answer) => answer,
            QueryOutcome::Dropped(_) | QueryOutcome::Ignored => return,
        };

        if let Err(e) = self.connector.answer_query(&query.id, &answer).await {
            warn!("Failed to answer inline query {}: {}", query.id, e);
        }
    }

    /// Poll the connector until `shutdown` resolves, handling each event on its own task
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("Bot started");

        loop {
            let events = tokio::select! {
                _ = &mut shutdown => break,
                events = self.connector.next_events() => events,
            };

            match events {
                Ok(events) => {
                    for event in events {
                        let bot = self.clone();
                        tokio::spawn(async move { bot.handle(event).await });
                    }
                }
                Err(e) => {
                    error!("Polling failed: {}", e);
                    tokio::time::sleep(POLL_ERROR_DELAY).await;
                }
            }
        }

        info!("Bot stopped");
    }
}
