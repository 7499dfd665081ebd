//! Telegram Bot API connector using long polling

use super::connector::{Connector, ConnectorError};
use super::events::{Event, InlineQuery, Message, ParseMode};
use crate::config::BotSettings;
use crate::network::{ApiRequest, ApiResponse, HttpClient};
use crate::results::{ArticleResult, InlineAnswer};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Extra time allowed on top of the long-poll timeout before the request is abandoned
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<TgMessage>,
    inline_query: Option<TgInlineQuery>,
}

#[derive(Debug, Deserialize)]
struct TgMessage {
    chat: TgChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TgChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TgInlineQuery {
    id: String,
    query: String,
}

impl Update {
    fn into_event(self) -> Option<Event> {
        if let Some(query) = self.inline_query {
            return Some(Event::InlineQuery(InlineQuery {
                id: query.id,
                text: query.query,
            }));
        }
        let message = self.message?;
        let text = message.text?;
        Some(Event::Message(Message {
            chat_id: message.chat.id,
            text,
        }))
    }
}

/// Connector speaking the Telegram Bot API
pub struct TelegramConnector {
    http: HttpClient,
    api_url: String,
    token: String,
    poll_timeout: u64,
    offset: AtomicI64,
}

impl TelegramConnector {
    pub fn new(settings: &BotSettings, http: HttpClient) -> Self {
        Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            poll_timeout: settings.poll_timeout,
            offset: AtomicI64::new(0),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ConnectorError> {
        let response = self.http.execute(request).await?;
        Self::unwrap_envelope(response)
    }

    fn unwrap_envelope<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ConnectorError> {
        let envelope: Envelope<T> = match response.json() {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => {
                return Err(ConnectorError::Status(response.status));
            }
            Err(e) => return Err(e.into()),
        };

        match envelope {
            Envelope {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            Envelope {
                description,
                error_code,
                ..
            } => Err(ConnectorError::Api {
                code: error_code,
                description: description.unwrap_or_else(|| "missing result".to_string()),
            }),
        }
    }

    fn answer_body<'a>(query_id: &'a str, answer: &'a InlineAnswer) -> AnswerInlineQuery<'a> {
        AnswerInlineQuery {
            inline_query_id: query_id,
            results: answer.results.iter().map(InlineArticle::from).collect(),
            cache_time: answer.cache_time,
        }
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct AnswerInlineQuery<'a> {
    inline_query_id: &'a str,
    results: Vec<InlineArticle<'a>>,
    cache_time: u32,
}

/// `InlineQueryResultArticle`
#[derive(Debug, Serialize)]
struct InlineArticle<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
    title: &'a str,
    url: &'a str,
    hide_url: bool,
    input_message_content: InputTextMessage<'a>,
}

#[derive(Debug, Serialize)]
struct InputTextMessage<'a> {
    message_text: &'a str,
}

impl<'a> From<&'a ArticleResult> for InlineArticle<'a> {
    fn from(result: &'a ArticleResult) -> Self {
        Self {
            kind: "article",
            id: &result.id,
            title: &result.title,
            url: &result.url,
            hide_url: result.hide_url,
            input_message_content: InputTextMessage {
                message_text: &result.message_text,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: ParseMode,
}

#[async_trait]
impl Connector for TelegramConnector {
    async fn next_events(&self) -> Result<Vec<Event>, ConnectorError> {
        let body = serde_json::to_value(GetUpdates {
            offset: self.offset.load(Ordering::SeqCst),
            timeout: self.poll_timeout,
            allowed_updates: &["message", "inline_query"],
        })?;
        let request = ApiRequest::post_json(self.method_url("getUpdates"), body)
            .timeout(Duration::from_secs(self.poll_timeout) + POLL_GRACE);

        let updates: Vec<Update> = self.call(request).await?;
        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset.store(last + 1, Ordering::SeqCst);
        }
        debug!("Received {} updates", updates.len());

        Ok(updates.into_iter().filter_map(Update::into_event).collect())
    }

    async fn answer_query(
        &self,
        query_id: &str,
        answer: &InlineAnswer,
    ) -> Result<(), ConnectorError> {
        let body = serde_json::to_value(Self::answer_body(query_id, answer))?;
        let request = ApiRequest::post_json(self.method_url("answerInlineQuery"), body);
        let _: bool = self.call(request).await?;
        Ok(())
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), ConnectorError> {
        let body = serde_json::to_value(SendMessage {
            chat_id,
            text,
            parse_mode: mode,
        })?;
        let request = ApiRequest::post_json(self.method_url("sendMessage"), body);
        let _: Value = self.call(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn connector_for(server: &MockServer) -> TelegramConnector {
        let settings = BotSettings {
            token: "123:abc".to_string(),
            api_url: server.uri(),
            poll_timeout: 1,
            ..Default::default()
        };
        TelegramConnector::new(&settings, HttpClient::new("Wikisourcebot").unwrap())
    }

    #[tokio::test]
    async fn test_next_events_decodes_updates_and_advances_offset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/getUpdates"))
            .and(body_partial_json(json!({"offset": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": [
                    {"update_id": 7, "message": {"message_id": 1, "chat": {"id": 42, "type": "private"}, "text": "hi"}},
                    {"update_id": 8, "inline_query": {"id": "q1", "from": {"id": 5}, "query": "en Beowulf", "offset": ""}},
                    {"update_id": 9, "message": {"message_id": 2, "chat": {"id": 42, "type": "private"}, "sticker": {}}},
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/getUpdates"))
            .and(body_partial_json(json!({"offset": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": []})))
            .expect(1)
            .mount(&server)
            .await;

        let connector = connector_for(&server);
        let events = connector.next_events().await.unwrap();
        assert_eq!(
            events,
            vec![
                Event::Message(Message {
                    chat_id: 42,
                    text: "hi".to_string()
                }),
                Event::InlineQuery(InlineQuery {
                    id: "q1".to_string(),
                    text: "en Beowulf".to_string()
                }),
            ]
        );

        assert!(connector.next_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answer_query_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/answerInlineQuery"))
            .and(body_json(json!({
                "inline_query_id": "q1",
                "cache_time": 600,
                "results": [{
                    "type": "article",
                    "id": "0",
                    "title": "Beowulf",
                    "url": "https://en.wikisource.org/wiki/Beowulf",
                    "hide_url": true,
                    "input_message_content": {"message_text": "https://en.wikisource.org/wiki/Beowulf"}
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": true})))
            .expect(1)
            .mount(&server)
            .await;

        let answer = InlineAnswer::new(
            vec![ArticleResult::new(0, "Beowulf", "https://en.wikisource.org/wiki/Beowulf")],
            600,
        );
        connector_for(&server).answer_query("q1", &answer).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_message_html() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(json!({"chat_id": 42, "text": "<b>help</b>", "parse_mode": "HTML"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"message_id": 3}})))
            .expect(1)
            .mount(&server)
            .await;

        connector_for(&server)
            .send_message(42, "<b>help</b>", ParseMode::Html)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: query is too old"
            })))
            .mount(&server)
            .await;

        let answer = InlineAnswer::new(vec![], 600);
        let err = connector_for(&server).answer_query("q1", &answer).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Api { code: Some(400), .. }));
    }

    #[tokio::test]
    async fn test_status_error_without_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = connector_for(&server).next_events().await.unwrap_err();
        assert!(matches!(err, ConnectorError::Status(502)));
    }
}
