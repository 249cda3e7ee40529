//! HTTP implementation of [`MessageGateway`] against a Bot-API-shaped
//! gateway.
//!
//! Wire format: POST `<base>/bot<token>/<method>` with a JSON body, JSON
//! envelope `{ "ok": bool, "result": ..., "description": ... }` in the
//! response. `"ok": false` surfaces as [`TelegramError::ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use dealrelay_core::CandidateMessage;

use crate::error::TelegramError;
use crate::gateway::MessageGateway;

/// Client for the messaging gateway.
///
/// Use [`GatewayClient::new`] for production or point `base_url` at a mock
/// server in tests.
pub struct GatewayClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// One message as the gateway reports it.
#[derive(Debug, Deserialize)]
struct WireMessage {
    id: i64,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    views: Option<u64>,
    /// Unix seconds.
    date: i64,
    #[serde(default)]
    has_media: bool,
}

impl GatewayClient {
    /// Creates a client for the gateway at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("dealrelay/0.1 (gateway)")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// POSTs `body` to `method` and unwraps the result envelope.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, TelegramError> {
        let url = self.method_url(method);
        let response = self.client.post(&url).json(&body).send().await?;
        let response = response.error_for_status()?;
        let raw = response.text().await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&raw).map_err(|e| TelegramError::Deserialize {
                context: method.to_owned(),
                source: e,
            })?;

        if !envelope.ok {
            return Err(TelegramError::ApiError(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown gateway error".to_owned()),
            ));
        }
        envelope
            .result
            .ok_or_else(|| TelegramError::ApiError("ok response without result".to_owned()))
    }

    fn to_candidate(channel: &str, wire: WireMessage) -> Option<CandidateMessage> {
        let text = wire.text.filter(|t| !t.is_empty())?;
        let timestamp = DateTime::from_timestamp(wire.date, 0)?;
        Some(CandidateMessage {
            id: wire.id,
            channel: channel.to_owned(),
            text,
            views: wire.views,
            timestamp,
            has_media: wire.has_media,
        })
    }
}

#[async_trait]
impl MessageGateway for GatewayClient {
    async fn recent_messages(
        &self,
        channel: &str,
        limit: usize,
    ) -> Result<Vec<CandidateMessage>, TelegramError> {
        let wire: Vec<WireMessage> = self
            .call(
                "getChannelMessages",
                json!({ "channel": channel, "limit": limit }),
            )
            .await?;
        Ok(wire
            .into_iter()
            .filter_map(|m| Self::to_candidate(channel, m))
            .collect())
    }

    async fn publish(&self, channel: &str, text: &str) -> Result<(), TelegramError> {
        let _: serde_json::Value = self
            .call("sendMessage", json!({ "chat_id": channel, "text": text }))
            .await?;
        tracing::debug!(channel = %channel, "message published");
        Ok(())
    }

    async fn destination_history(
        &self,
        channel: &str,
        depth: usize,
    ) -> Result<Vec<String>, TelegramError> {
        let wire: Vec<WireMessage> = self
            .call(
                "getChannelMessages",
                json!({ "channel": channel, "limit": depth }),
            )
            .await?;
        Ok(wire.into_iter().filter_map(|m| m.text).collect())
    }
}
