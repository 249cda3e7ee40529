//! Rewriter orchestration: generate, enforce invariants, fall back.

use dealrelay_core::{AppConfig, DealHints, RenderedPost};

use crate::client::ChatClient;
use crate::error::RewriteError;
use crate::prompt::build_prompt;
use crate::render::{enforce_link_invariants, fallback_caption};
use crate::tag::dedup_tag;

const GENERATION_TIMEOUT_SECS: u64 = 60;

/// Produces the final post body for a candidate.
///
/// Generation failures of any kind degrade to the deterministic fallback
/// caption — composing never fails, so every candidate that reaches this
/// stage yields a publishable body.
pub struct CopyRewriter {
    client: Option<ChatClient>,
    language: String,
}

impl CopyRewriter {
    /// Builds the rewriter from configuration. Without an API key the
    /// rewriter runs in fallback-only mode.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Http`] if the generation client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, RewriteError> {
        let client = match &config.openai_api_key {
            Some(key) => Some(ChatClient::new(
                key,
                &config.openai_model,
                &config.openai_api_base,
                GENERATION_TIMEOUT_SECS,
            )?),
            None => None,
        };
        Ok(Self {
            client,
            language: config.rewrite_language.clone(),
        })
    }

    /// Rewriter with an explicit client, for tests.
    #[must_use]
    pub fn with_client(client: Option<ChatClient>, language: &str) -> Self {
        Self {
            client,
            language: language.to_owned(),
        }
    }

    /// Composes the post body: generated copy under link invariants, tag
    /// appended when an identity exists.
    pub async fn compose(
        &self,
        source_text: &str,
        hints: &DealHints,
        affiliate_link: &str,
        product_id: Option<&str>,
    ) -> RenderedPost {
        let body = match &self.client {
            Some(client) => {
                let prompt = build_prompt(source_text, hints, affiliate_link, &self.language);
                match client.complete(&prompt).await {
                    Ok(generated) => enforce_link_invariants(&generated, affiliate_link),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "text generation failed, using fallback caption"
                        );
                        fallback_caption(affiliate_link)
                    }
                }
            }
            None => fallback_caption(affiliate_link),
        };

        let body = match product_id {
            Some(id) => format!("{body}\n{}", dedup_tag(id)),
            None => body,
        };

        RenderedPost {
            body,
            product_id: product_id.map(str::to_owned),
        }
    }
}
