//! Chat-completion client for the text-generation collaborator.
//!
//! OpenAI-shaped wire format: POST `/chat/completions`, bearer auth,
//! first-choice message content. Base URL is overridable so tests can
//! point at a mock server.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::RewriteError;

const MAX_COMPLETION_TOKENS: u32 = 400;

pub struct ChatClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatClient {
    /// Creates a client for the configured generation endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, RewriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("dealrelay/0.1 (rewrite)")
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Sends one prompt and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// - [`RewriteError::Http`] on network failure.
    /// - [`RewriteError::Api`] on a non-2xx status.
    /// - [`RewriteError::EmptyCompletion`] when the response has no
    ///   choices or no content.
    pub async fn complete(&self, prompt: &str) -> Result<String, RewriteError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RewriteError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or(RewriteError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> ChatClient {
        ChatClient::new("sk-test", "gpt-4o-mini", &server.uri(), 5)
            .expect("client construction should not fail")
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "  generated copy  " } }
                ]
            })))
            .mount(&server)
            .await;

        let text = client(&server).complete("prompt").await.unwrap();
        assert_eq!(text, "generated copy");
    }

    #[tokio::test]
    async fn complete_errors_on_api_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let result = client(&server).complete("prompt").await;
        assert!(matches!(result, Err(RewriteError::Api { status: 429, .. })));
    }

    #[tokio::test]
    async fn complete_errors_on_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [ { "message": { "role": "assistant", "content": "" } } ]
            })))
            .mount(&server)
            .await;

        let result = client(&server).complete("prompt").await;
        assert!(matches!(result, Err(RewriteError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn complete_errors_on_missing_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let result = client(&server).complete("prompt").await;
        assert!(matches!(result, Err(RewriteError::EmptyCompletion)));
    }
}
