//! Inline query parsing
//!
//! An inline query may start with a language code:
//! - `en Divine Comedy` searches English Wikisource for `Divine Comedy`
//! - `Divine Comedy` searches the default language for the whole text
//!
//! Only the leading token is case-folded for matching; the search text is
//! passed on as typed.

use crate::config::SingleTokenPolicy;
use crate::locales::LanguageCode;

/// A query resolved to a language and the text to search for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedQuery {
    /// Language whose wiki is searched
    pub lang: LanguageCode,
    /// Trimmed search text, possibly empty
    pub search: String,
}

impl RoutedQuery {
    /// Parse raw inline-query text. Returns `None` when the query should be ignored.
    pub fn parse(raw: &str, default_lang: LanguageCode, policy: SingleTokenPolicy) -> Option<Self> {
        let input = raw.trim();
        if input.is_empty() {
            return None;
        }

        let (head, remainder) = split_head(input);
        if remainder.is_none() && policy == SingleTokenPolicy::Ignore {
            return None;
        }
        let remainder = remainder.unwrap_or_default();

        let routed = match LanguageCode::lookup(head) {
            Some(lang) => Self {
                lang,
                search: remainder.to_string(),
            },
            None => Self {
                lang: default_lang,
                search: format!("{} {}", head, remainder).trim().to_string(),
            },
        };

        Some(routed)
    }
}

/// Split on the first whitespace run into a head token and the rest
fn split_head(input: &str) -> (&str, Option<&str>) {
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], Some(input[idx..].trim_start())),
        None => (input, None),
    }
}
