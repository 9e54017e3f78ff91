//! Webhook relay: decode, extract, deliver, respond.

use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, error, info, warn};

use super::message::extract_message;
use super::payload::recover_payload;
use crate::error::AppResult;
use crate::models::{ProxyResponse, SlackMessage};
use crate::services::notifications::NotificationProvider;

const RAW_BODY_LOG_CHARS: usize = 1000;
const RESPONSE_LOG_CHARS: usize = 400;

/// Relays one inbound event to the notification endpoint per call.
///
/// Holds no per-invocation state; cloning shares the provider.
#[derive(Clone)]
pub struct RelayService {
    provider: Arc<dyn NotificationProvider>,
    message_prefix: String,
}

impl RelayService {
    pub fn new(provider: Arc<dyn NotificationProvider>, message_prefix: impl Into<String>) -> Self {
        Self {
            provider,
            message_prefix: message_prefix.into(),
        }
    }

    /// Handle one inbound body.
    ///
    /// Never fails: every fault is folded into a `500 Exception: ...` response.
    pub async fn handle(&self, raw_body: &str, target_url: Option<&str>) -> ProxyResponse {
        info!(provider = self.provider.name(), "Relay invoked");

        match self.try_handle(raw_body, target_url).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Relay invocation failed");
                ProxyResponse::exception(e)
            }
        }
    }

    async fn try_handle(&self, raw_body: &str, target_url: Option<&str>) -> AppResult<ProxyResponse> {
        debug!(
            raw_body = truncate_chars(raw_body, RAW_BODY_LOG_CHARS),
            "Raw body (first {} chars)", RAW_BODY_LOG_CHARS
        );

        let recovered = recover_payload(raw_body);
        match &recovered {
            Some(r) => debug!(strategy = r.strategy, "Recovered JSON payload"),
            None => debug!("No JSON payload recovered"),
        }

        let text = extract_message(recovered.as_ref().map(|r| &r.payload));

        let Some(target) = target_url.map(str::trim).filter(|url| !url.is_empty()) else {
            error!("SLACK_URL not set");
            return Ok(ProxyResponse::missing_target());
        };

        let message = SlackMessage::new(format!("{}{}", self.message_prefix, text));
        let payload_len = serde_json::to_string(&message)?.len();
        info!(
            slack_host = %redact_url(target),
            payload_len,
            "Posting to Slack"
        );

        let result = self.provider.send(target, &message).await?;
        info!(
            status = result.status_code,
            duration_ms = result.duration_ms,
            response = truncate_chars(&result.response, RESPONSE_LOG_CHARS),
            "Slack returned {}", result.status_code
        );

        if !result.is_success() {
            warn!(status = result.status_code, "Slack rejected the notification");
            return Ok(ProxyResponse::bad_gateway(
                result.status_code,
                &result.response,
            ));
        }

        Ok(ProxyResponse::ok())
    }
}

/// At most `max` characters of `text`, cut on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Scheme and host only; webhook paths carry the secret
fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => format!("{}://{}", parsed.scheme(), parsed.host_str().unwrap_or("")),
        Err(_) => "<invalid-url>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::SlackProvider;
    use crate::services::notifications::mock_provider::{MockProvider, Outcome};

    const URL: &str = "https://hooks.slack.com/services/T/B/X";

    fn relay(provider: &Arc<MockProvider>) -> RelayService {
        RelayService::new(provider.clone(), "")
    }

    #[tokio::test]
    async fn test_html_url_is_sent() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let body = r#"{"issue":{"html_url":"https://x/1","title":"T"}}"#;

        let response = relay(&provider).handle(body, Some(URL)).await;

        assert_eq!(response, ProxyResponse::ok());
        assert_eq!(provider.calls(), vec![(URL.to_string(), SlackMessage::new("https://x/1"))]);
    }

    #[tokio::test]
    async fn test_title_is_sent_without_url() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        relay(&provider)
            .handle(r#"{"issue":{"title":"T"}}"#, Some(URL))
            .await;
        assert_eq!(provider.texts(), vec!["T"]);
    }

    #[tokio::test]
    async fn test_full_payload_is_sent_without_issue_fields() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        relay(&provider).handle(r#"{"a":1}"#, Some(URL)).await;
        assert_eq!(provider.texts(), vec![r#"{"a":1}"#]);
    }

    #[tokio::test]
    async fn test_empty_and_non_json_bodies_send_no_issue() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let service = relay(&provider);

        assert_eq!(service.handle("", Some(URL)).await, ProxyResponse::ok());
        assert_eq!(service.handle("not json", Some(URL)).await, ProxyResponse::ok());
        assert_eq!(provider.texts(), vec!["<no-issue>", "<no-issue>"]);
    }

    #[tokio::test]
    async fn test_quoted_body_is_unquoted() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let body = r#""{\"issue\":{\"html_url\":\"https://x/2\"}}""#;
        relay(&provider).handle(body, Some(URL)).await;
        assert_eq!(provider.texts(), vec!["https://x/2"]);
    }

    #[tokio::test]
    async fn test_double_wrapped_body_uses_nested_document() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let body = r#"{"body":"{\"issue\":{\"title\":\"Nested\"}}"}"#;
        relay(&provider).handle(body, Some(URL)).await;
        assert_eq!(provider.texts(), vec!["Nested"]);
    }

    #[tokio::test]
    async fn test_missing_target_makes_no_call() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let service = relay(&provider);

        for target in [None, Some(""), Some("   ")] {
            let response = service.handle(r#"{"issue":{"title":"T"}}"#, target).await;
            assert_eq!(response, ProxyResponse::new(500, "Missing SLACK_URL"));
        }
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_downstream_error_maps_to_bad_gateway() {
        let provider = MockProvider::new(Outcome::Status(400, "bad request"));
        let response = relay(&provider).handle(r#"{"a":1}"#, Some(URL)).await;

        assert_eq!(response.status_code, 502);
        assert!(response.body.contains("400"));
        assert!(response.body.contains("bad request"));
        assert_eq!(response.body, "Slack returned 400: bad request");
    }

    #[tokio::test]
    async fn test_downstream_success_ignores_body() {
        let provider = MockProvider::new(Outcome::Status(200, "something else entirely"));
        let response = relay(&provider).handle("", Some(URL)).await;
        assert_eq!(response, ProxyResponse::new(200, "ok"));
    }

    #[tokio::test]
    async fn test_any_2xx_is_success() {
        let provider = MockProvider::new(Outcome::Status(204, ""));
        let response = relay(&provider).handle("", Some(URL)).await;
        assert_eq!(response, ProxyResponse::ok());
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_exception() {
        let provider = MockProvider::new(Outcome::TransportError);
        let response = relay(&provider).handle(r#"{"a":1}"#, Some(URL)).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "Exception: connection refused");
    }

    #[tokio::test]
    async fn test_unreachable_slack_does_not_expose_webhook_path() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = RelayService::new(Arc::new(SlackProvider::new(reqwest::Client::new())), "");
        let target = format!("http://{}/services/T000/B000/SECRETTOKEN", addr);
        let response = service.handle("{}", Some(&target)).await;

        assert_eq!(response.status_code, 500);
        assert!(response.body.starts_with("Exception: "), "{}", response.body);
        assert!(!response.body.contains("SECRETTOKEN"), "{}", response.body);
    }

    #[tokio::test]
    async fn test_identical_invocations_are_idempotent() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let service = relay(&provider);
        let body = r#"{"issue":{"title":"Same"}}"#;

        let first = service.handle(body, Some(URL)).await;
        let second = service.handle(body, Some(URL)).await;

        assert_eq!(first, second);
        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_message_prefix_is_prepended() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let service = RelayService::new(provider.clone(), "Issue Created: ");

        service
            .handle(r#"{"issue":{"html_url":"https://x/1"}}"#, Some(URL))
            .await;

        assert_eq!(provider.texts(), vec!["Issue Created: https://x/1"]);
    }

    #[tokio::test]
    async fn test_target_url_is_trimmed() {
        let provider = MockProvider::new(Outcome::Status(200, "ok"));
        let padded = format!("  {URL}\n");
        relay(&provider).handle("", Some(&padded)).await;
        assert_eq!(provider.calls()[0].0, URL);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 2), "he");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_redact_url_keeps_scheme_and_host() {
        assert_eq!(redact_url(URL), "https://hooks.slack.com");
        assert_eq!(redact_url("nope"), "<invalid-url>");
    }
}
