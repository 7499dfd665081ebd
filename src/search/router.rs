//! Query routing: inline-query text in, answer out

use crate::config::{SearchSettings, SingleTokenPolicy};
use crate::engines::{parse_pages, ClientRegistry, MappingError, SearchError, SearchRequest};
use crate::locales::LanguageCode;
use crate::query::RoutedQuery;
use crate::results::InlineAnswer;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why an inline query got no answer
#[derive(Debug, Error)]
pub enum DropReason {
    #[error("no client for language {0}")]
    NoClient(LanguageCode),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Outcome of routing one inline query
#[derive(Debug)]
pub enum QueryOutcome {
    /// Send this answer
    Answered(InlineAnswer),
    /// The query failed; nothing is sent
    Dropped(DropReason),
    /// Nothing to search for; nothing is sent
    Ignored,
}

impl QueryOutcome {
    /// Answer to deliver, if any
    pub fn answer(&self) -> Option<&InlineAnswer> {
        match self {
            Self::Answered(answer) => Some(answer),
            _ => None,
        }
    }
}

/// Routes inline queries to the wiki of the selected language
pub struct QueryRouter {
    registry: Arc<ClientRegistry>,
    default_lang: LanguageCode,
    policy: SingleTokenPolicy,
    result_limit: u32,
    cache_time: u32,
}

impl QueryRouter {
    pub fn new(registry: Arc<ClientRegistry>, default_lang: LanguageCode) -> Self {
        Self {
            registry,
            default_lang,
            policy: SingleTokenPolicy::default(),
            result_limit: crate::engines::DEFAULT_LIMIT,
            cache_time: crate::DEFAULT_CACHE_TIME,
        }
    }

    /// Create a router configured from search settings
    pub fn with_settings(
        registry: Arc<ClientRegistry>,
        settings: &SearchSettings,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(registry, settings.default_language()?)
            .with_policy(settings.single_token)
            .with_result_limit(settings.result_limit)
            .with_cache_time(settings.cache_time))
    }

    /// Set single-token policy
    pub fn with_policy(mut self, policy: SingleTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set maximum number of results per answer
    pub fn with_result_limit(mut self, limit: u32) -> Self {
        self.result_limit = limit;
        self
    }

    /// Set client-side cache lifetime of answers
    pub fn with_cache_time(mut self, seconds: u32) -> Self {
        self.cache_time = seconds;
        self
    }

    /// Route one inline query
    pub async fn route(&self, raw: &str) -> QueryOutcome {
        let Some(routed) = RoutedQuery::parse(raw, self.default_lang, self.policy) else {
            return QueryOutcome::Ignored;
        };

        match self.search(&routed).await {
            Ok(answer) => {
                debug!(
                    "Search '{}' on {} returned {} results",
                    routed.search,
                    routed.lang,
                    answer.len()
                );
                QueryOutcome::Answered(answer)
            }
            Err(reason) => {
                warn!("Dropping query '{}' on {}: {}", routed.search, routed.lang, reason);
                QueryOutcome::Dropped(reason)
            }
        }
    }

    async fn search(&self, routed: &RoutedQuery) -> Result<InlineAnswer, DropReason> {
        let client = self
            .registry
            .get(routed.lang)
            .ok_or(DropReason::NoClient(routed.lang))?;

        let request = SearchRequest::new(routed.search.as_str()).with_limit(self.result_limit);
        let body = client.search(&request).await?;
        let results = parse_pages(&body)?;

        Ok(InlineAnswer::new(results, self.cache_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use crate::results::ArticleResult;
    use futures::future::join_all;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router_for(server: &MockServer) -> QueryRouter {
        let settings = SearchSettings {
            api_url: format!("{}/{{lang}}/w/api.php", server.uri()),
            ..Default::default()
        };
        let http = HttpClient::new("Wikisourcebot").unwrap();
        let registry = Arc::new(ClientRegistry::build(&settings, &http).unwrap());
        QueryRouter::with_settings(registry, &settings).unwrap()
    }

    fn pages(titles: &[&str]) -> serde_json::Value {
        let pages: Vec<_> = titles
            .iter()
            .map(|t| json!({"title": t, "fullurl": format!("https://en.wikisource.org/wiki/{}", t)}))
            .collect();
        json!({"batchcomplete": true, "query": {"pages": pages}})
    }

    async fn mount_search(server: &MockServer, lang: &str, search: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/w/api.php", lang)))
            .and(query_param("gsrsearch", search))
            .and(query_param("gsrlimit", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_empty_query_ignored() {
        let server = MockServer::start().await;
        let router = router_for(&server);

        assert!(matches!(router.route("").await, QueryOutcome::Ignored));
        assert!(matches!(router.route("   ").await, QueryOutcome::Ignored));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_language_prefix_routes_to_that_wiki() {
        let server = MockServer::start().await;
        mount_search(&server, "it", "Divina Commedia", pages(&["La Divina Commedia"])).await;
        let router = router_for(&server);

        let outcome = router.route("IT Divina Commedia").await;
        let answer = outcome.answer().unwrap();
        assert_eq!(answer.results[0].title, "La Divina Commedia");
        assert_eq!(answer.cache_time, 600);
    }

    #[tokio::test]
    async fn test_unknown_prefix_routes_to_default() {
        let server = MockServer::start().await;
        mount_search(&server, "en", "Divine Comedy", pages(&["A", "B"])).await;
        let router = router_for(&server);

        let outcome = router.route("Divine Comedy").await;
        assert_eq!(
            outcome.answer().unwrap().results,
            vec![
                ArticleResult::new(0, "A", "https://en.wikisource.org/wiki/A"),
                ArticleResult::new(1, "B", "https://en.wikisource.org/wiki/B"),
            ]
        );
    }

    #[tokio::test]
    async fn test_bare_language_code_searches_empty_text() {
        let server = MockServer::start().await;
        mount_search(&server, "en", "", pages(&[])).await;
        let router = router_for(&server);

        let outcome = router.route("en").await;
        assert!(outcome.answer().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_token_ignore_policy() {
        let server = MockServer::start().await;
        let router = router_for(&server).with_policy(SingleTokenPolicy::Ignore);

        assert!(matches!(router.route("Beowulf").await, QueryOutcome::Ignored));
        assert!(matches!(router.route("en").await, QueryOutcome::Ignored));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_page_drops_everything() {
        let server = MockServer::start().await;
        let body = json!({"query": {"pages": [
            {"title": "A", "fullurl": "u1"},
            {"title": "B"},
            {"title": "C", "fullurl": "u3"},
        ]}});
        mount_search(&server, "en", "Odyssey", body).await;
        let router = router_for(&server);

        let outcome = router.route("en Odyssey").await;
        assert!(matches!(
            outcome,
            QueryOutcome::Dropped(DropReason::Mapping(MappingError::MissingField { index: 1, .. }))
        ));
        assert!(outcome.answer().is_none());
    }

    #[tokio::test]
    async fn test_no_pages_drops() {
        let server = MockServer::start().await;
        mount_search(&server, "en", "zzzz", json!({"batchcomplete": true})).await;
        let router = router_for(&server);

        let outcome = router.route("en zzzz").await;
        assert!(matches!(
            outcome,
            QueryOutcome::Dropped(DropReason::Mapping(MappingError::MissingPages))
        ));
    }

    #[tokio::test]
    async fn test_upstream_failure_drops() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let router = router_for(&server);

        let outcome = router.route("en Iliad").await;
        assert!(matches!(
            outcome,
            QueryOutcome::Dropped(DropReason::Search(SearchError::Status(500)))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_queries_do_not_share_search_text() {
        let server = MockServer::start().await;
        let words = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];
        for word in words {
            mount_search(&server, "en", word, pages(&[word])).await;
        }
        let router = router_for(&server);

        let queries: Vec<String> = words.iter().map(|w| format!("en {}", w)).collect();
        let outcomes = join_all(queries.iter().map(|q| router.route(q))).await;

        for (word, outcome) in words.iter().zip(outcomes) {
            let answer = outcome.answer().unwrap();
            assert_eq!(answer.len(), 1);
            assert_eq!(answer.results[0].title, *word);
        }
    }
}
