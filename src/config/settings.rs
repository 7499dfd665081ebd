//! Settings structures for wikisource-bot configuration

use crate::locales::LanguageCode;
use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::Path;

/// Placeholder replaced by the language code in endpoint templates
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Help text sent in reply to any plain chat message
pub const HELP_MESSAGE: &str = "This bot can help you find and share links to Wikisource articles. \
It works automatically, no need to add it anywhere. Simply open any of your chats and type \
@Wikisource_bot + language code (en, es, etc.) + something in the message field. \
Then tap on a result to send.\n\nFor example, try typing \
<code>@Wikisource_bot en Divine Comedy</code> here.";

/// Main settings structure, as read from settings.yml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub bot: BotSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (WIKISOURCE_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("WIKISOURCE_DEBUG") {
            self.general.debug = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("WIKISOURCE_BOT_TOKEN") {
            self.bot.token = val;
        }
        if let Ok(val) = std::env::var("WIKISOURCE_DEFAULT_LANG") {
            self.search.default_lang = val;
        }
        if let Ok(val) = std::env::var("WIKISOURCE_SITE") {
            self.search.site = val;
        }
    }

    /// Check the settings can be used to start the bot
    pub fn validate(&self) -> Result<()> {
        self.search.default_language()?;
        if !self.search.api_url.contains(LANG_PLACEHOLDER) {
            bail!(
                "search.api_url must contain {} placeholder: {}",
                LANG_PLACEHOLDER,
                self.search.api_url
            );
        }
        if self.search.result_limit == 0 {
            bail!("search.result_limit must be greater than zero");
        }
        if let Some(timeout) = self.outgoing.request_timeout {
            if !timeout.is_finite() || timeout < 0.0 {
                bail!("outgoing.request_timeout must be a non-negative number: {}", timeout);
            }
        }
        Ok(())
    }
}

/// Read a boolean environment value; `1`, `true`, `yes` and `on` are set
fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// General settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Chat connector settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Bot API access token
    pub token: String,
    /// Bot API base URL
    pub api_url: String,
    /// Long-poll timeout in seconds
    pub poll_timeout: u64,
    /// Reply sent to plain messages (HTML)
    pub help_message: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout: 10,
            help_message: HELP_MESSAGE.to_string(),
        }
    }
}

/// What to do with an inline query that is a single token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleTokenPolicy {
    /// Search it like any other query; a bare language code searches the empty string
    #[default]
    Search,
    /// Ignore the query, no answer is sent
    Ignore,
}

/// Search behavior settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Language used when the query has no recognised prefix
    pub default_lang: String,
    /// Site the language subdomains live under
    pub site: String,
    /// Endpoint template; `{lang}` and `{site}` are substituted
    pub api_url: String,
    /// Identifying string sent as the user agent
    pub user_agent: String,
    /// Maximum number of results requested per query
    pub result_limit: u32,
    /// Client-side cache lifetime of an answer, in seconds
    pub cache_time: u32,
    /// Handling of queries without whitespace
    pub single_token: SingleTokenPolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_lang: "en".to_string(),
            site: "wikisource.org".to_string(),
            api_url: "https://{lang}.{site}/w/api.php".to_string(),
            user_agent: "Wikisourcebot".to_string(),
            result_limit: 15,
            cache_time: 600,
            single_token: SingleTokenPolicy::default(),
        }
    }
}

impl SearchSettings {
    /// Resolve the configured default language against the supported set
    pub fn default_language(&self) -> Result<LanguageCode> {
        match LanguageCode::lookup(&self.default_lang) {
            Some(code) => Ok(code),
            None => bail!("unsupported default language: {}", self.default_lang),
        }
    }

    /// Endpoint for one language
    pub fn endpoint(&self, lang: LanguageCode) -> String {
        self.api_url
            .replace("{site}", &self.site)
            .replace(LANG_PLACEHOLDER, lang.as_str())
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = client default)
    pub request_timeout: Option<f64>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Proxy for all outgoing requests
    pub proxy: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            proxy: None,
        }
    }
}
