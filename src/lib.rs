//! wikisource-bot: a Telegram inline bot for sharing Wikisource articles
//!
//! Inline queries such as `@Wikisource_bot en Divine Comedy` are routed to
//! the Wikisource edition of the given language and answered with a list of
//! article links.

pub mod bot;
pub mod config;
pub mod engines;
pub mod locales;
pub mod network;
pub mod query;
pub mod results;
pub mod search;

pub use config::Settings;
pub use engines::{ClientRegistry, WikiClient};
pub use locales::LanguageCode;
pub use search::{QueryOutcome, QueryRouter};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client-side cache lifetime of inline answers, in seconds
pub const DEFAULT_CACHE_TIME: u32 = 600;
