//! Chat connector and event dispatch
//!
//! Plain messages get the help reply; inline queries go through the router.

mod connector;
mod dispatcher;
mod events;
mod telegram;

pub use connector::{Connector, ConnectorError};
pub use dispatcher::Bot;
pub use events::{Event, InlineQuery, Message, ParseMode};
pub use telegram::TelegramConnector;
