//! Wikisource search client

use super::request::SearchRequest;
use crate::locales::LanguageCode;
use crate::network::{ApiRequest, HttpClient};
use crate::results::ArticleResult;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Failure talking to the upstream API
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
}

/// Response that cannot be turned into results
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("response has no query.pages array")]
    MissingPages,
    #[error("page {index} has no {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Search client bound to one language's API endpoint
#[derive(Clone)]
pub struct WikiClient {
    lang: LanguageCode,
    endpoint: Url,
    http: HttpClient,
}

impl WikiClient {
    pub fn new(
        lang: LanguageCode,
        endpoint: &str,
        http: HttpClient,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            lang,
            endpoint,
            http,
        })
    }

    pub fn lang(&self) -> LanguageCode {
        self.lang
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the HTTP request for a search
    pub fn request(&self, search: &SearchRequest) -> ApiRequest {
        let mut request = ApiRequest::get(self.endpoint.as_str());
        request.params = search.params();
        request
    }

    /// Run a search and return the decoded response body
    pub async fn search(&self, search: &SearchRequest) -> Result<Value, SearchError> {
        let response = self.http.execute(self.request(search)).await?;
        if !response.is_success() {
            return Err(SearchError::Status(response.status));
        }

        let body: Value = response.json()?;
        if let Some(error) = body.get("error") {
            let field = |name: &str| {
                error
                    .get(name)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            return Err(SearchError::Api {
                code: field("code"),
                info: field("info"),
            });
        }

        Ok(body)
    }
}

/// Map `query.pages` into results, keeping upstream order.
///
/// A single page without a `title` or `fullurl` string fails the whole response.
pub fn parse_pages(body: &Value) -> Result<Vec<ArticleResult>, MappingError> {
    let pages = body
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(Value::as_array)
        .ok_or(MappingError::MissingPages)?;

    pages
        .iter()
        .enumerate()
        .map(|(index, page)| -> Result<ArticleResult, MappingError> {
            let field = |field: &'static str| {
                page.get(field)
                    .and_then(Value::as_str)
                    .ok_or(MappingError::MissingField { index, field })
            };
            let title = field("title")?;
            let url = field("fullurl")?;
            Ok(ArticleResult::new(index, title, url))
        })
        .collect()
}
