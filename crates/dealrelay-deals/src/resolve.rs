//! Network expansion of shortened/redirector links.

use std::time::Duration;

use reqwest::Client;

use dealrelay_core::ExtractedLink;

use crate::error::DealError;
use crate::extract::{canonical_product_url, fallback_identity, item_id};

/// Expands links whose product identity is still unknown — in practice the
/// shortened/redirector forms — with a single redirect-following HEAD
/// request.
///
/// Resolution is soft: any failure keeps the short URL as the normalized
/// form and falls back to a digest of its opaque token as the product
/// identity (or no identity at all). A candidate is never rejected because
/// its short link would not expand.
pub struct RedirectResolver {
    client: Client,
}

impl RedirectResolver {
    /// Creates a resolver with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, DealError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Returns `link` unchanged when it already carries a product id;
    /// otherwise attempts expansion.
    ///
    /// On expansion to a product URL the result carries the canonical form
    /// and the item id. On expansion to anything else, or on any network
    /// error, the short form is kept and the identity falls back to the
    /// opaque-token digest.
    pub async fn resolve(&self, link: &ExtractedLink) -> ExtractedLink {
        if link.product_id.is_some() {
            return link.clone();
        }

        match self.client.head(&link.normalized_url).send().await {
            Ok(response) => {
                let final_url = response.url().to_string();
                if let Some(id) = item_id(&final_url) {
                    tracing::debug!(
                        short = %link.normalized_url,
                        product_id = %id,
                        "redirector expanded to product URL"
                    );
                    ExtractedLink {
                        original_url: link.original_url.clone(),
                        normalized_url: canonical_product_url(&id),
                        product_id: Some(id),
                    }
                } else {
                    tracing::debug!(
                        short = %link.normalized_url,
                        target = %final_url,
                        "redirector expanded but target is not a product URL"
                    );
                    fallback(link)
                }
            }
            Err(e) => {
                tracing::warn!(
                    short = %link.normalized_url,
                    error = %e,
                    "redirector expansion failed"
                );
                fallback(link)
            }
        }
    }
}

fn fallback(link: &ExtractedLink) -> ExtractedLink {
    ExtractedLink {
        original_url: link.original_url.clone(),
        normalized_url: link.normalized_url.clone(),
        product_id: fallback_identity(&link.normalized_url),
    }
}
