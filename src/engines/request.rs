//! Search request shaping

/// Parameters sent with every search, independent of the query
pub const DEFAULT_PARAMETERS: &[(&str, &str)] = &[
    ("action", "query"),
    ("format", "json"),
    ("formatversion", "2"),
    ("generator", "search"),
    ("gsrprop", "snippet"),
    ("inprop", "url"),
    ("prop", "info"),
];

/// Results requested per search unless overridden
pub const DEFAULT_LIMIT: u32 = 15;

/// One search against a wiki, built fresh per query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    text: String,
    limit: u32,
}

impl SearchRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Set the maximum number of results
    pub fn with_limit(self, limit: u32) -> Self {
        Self { limit, ..self }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Full query parameter list: the fixed template followed by limit and search text
    pub fn params(&self) -> Vec<(String, String)> {
        DEFAULT_PARAMETERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .chain([
                ("gsrlimit".to_string(), self.limit.to_string()),
                ("gsrsearch".to_string(), self.text.clone()),
            ])
            .collect()
    }
}
