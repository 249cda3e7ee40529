//! HTTP client for the remote affiliate link API.
//!
//! One POST per product URL; the response carries the monetized link under
//! one of two accepted field names. Every failure mode — network error,
//! non-success status, timeout, empty or missing link field — is a soft
//! failure that sends the resolver to its next strategy, never an error
//! raised to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AffiliateError, SoftFailure};

/// Client for the configured affiliate link-generation endpoint.
pub struct AffiliateApiClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    /// Accepted field name #1.
    affiliate_link: Option<String>,
    /// Accepted field name #2.
    promotion_link: Option<String>,
}

impl AffiliateApiClient {
    /// Creates a client for `endpoint` with an optional bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`AffiliateError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: &str,
        token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, AffiliateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("dealrelay/0.1 (affiliate)")
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            token: token.map(str::to_owned),
        })
    }

    /// Requests a monetized link for `product_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SoftFailure`] — never a hard error — on any network
    /// failure, non-2xx status, unparseable body, missing/empty link
    /// field, or a link identical to the input URL.
    pub(crate) async fn generate(&self, product_url: &str) -> Result<String, SoftFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth_opt(self.token.as_deref())
            .json(&json!({ "url": product_url }))
            .send()
            .await
            .map_err(|e| SoftFailure(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SoftFailure(format!("unexpected status {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SoftFailure(format!("unparseable response: {e}")))?;

        let link = body
            .affiliate_link
            .or(body.promotion_link)
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| SoftFailure("response carried no link field".to_owned()))?;

        // A link identical to the input is not monetized; publishing it
        // would violate the affiliate-link invariant.
        if link == product_url {
            return Err(SoftFailure("API echoed the input URL".to_owned()));
        }

        Ok(link)
    }
}

/// Small extension so the optional bearer credential reads as one call at
/// the request site.
trait BearerAuthOpt {
    fn bearer_auth_opt(self, token: Option<&str>) -> Self;
}

impl BearerAuthOpt for reqwest::RequestBuilder {
    fn bearer_auth_opt(self, token: Option<&str>) -> Self {
        match token {
            Some(t) => self.bearer_auth(t),
            None => self,
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
