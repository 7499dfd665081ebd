//! Result type definitions

/// A single shareable article link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleResult {
    /// Position in the upstream page list, stringified
    pub id: String,
    /// Page title
    pub title: String,
    /// Canonical page URL
    pub url: String,
    /// Text sent to the chat when the result is picked
    pub message_text: String,
    /// Hide the URL in the result preview
    pub hide_url: bool,
}

impl ArticleResult {
    /// Create a result for the page at `position`; the shared text is the URL itself
    pub fn new(position: usize, title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: position.to_string(),
            title: title.into(),
            message_text: url.clone(),
            url,
            hide_url: true,
        }
    }
}

/// Answer to one inline query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAnswer {
    /// Results in upstream relevance order
    pub results: Vec<ArticleResult>,
    /// Client-side cache lifetime in seconds
    pub cache_time: u32,
}

impl InlineAnswer {
    pub fn new(results: Vec<ArticleResult>, cache_time: u32) -> Self {
        Self {
            results,
            cache_time,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
