//! Priority-ordered resolution strategies.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use dealrelay_core::AppConfig;

use crate::client::AffiliateApiClient;
use crate::error::{AffiliateError, SoftFailure};

/// Placeholder token substituted with the percent-encoded product URL in
/// the portal template.
const URL_PLACEHOLDER: &str = "{{URL}}";

/// One way of minting a referral link. Strategies share a uniform
/// attempt contract: success yields the link, failure is soft and sends
/// the resolver to the next strategy.
enum Strategy {
    /// Remote link-generation API.
    Api(AffiliateApiClient),
    /// Portal template with a `{{URL}}` placeholder; a template without
    /// the placeholder is used verbatim (fixed personal link mode).
    Template(String),
    /// Prefix concatenated with the percent-encoded product URL.
    Prefix(String),
}

impl Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Api(_) => "api",
            Strategy::Template(_) => "template",
            Strategy::Prefix(_) => "prefix",
        }
    }

    async fn attempt(&self, product_url: &str) -> Result<String, SoftFailure> {
        match self {
            Strategy::Api(client) => client.generate(product_url).await,
            Strategy::Template(template) => Ok(apply_template(template, product_url)),
            Strategy::Prefix(prefix) => Ok(format!("{prefix}{}", encode(product_url))),
        }
    }
}

/// Resolves product URLs to monetized referral links through the
/// configured strategies, in fixed priority order: API, template, prefix.
pub struct AffiliateResolver {
    strategies: Vec<Strategy>,
}

impl AffiliateResolver {
    /// Builds the strategy list from configuration. Unset parameters simply
    /// omit their strategy; an entirely unset configuration yields an empty
    /// resolver that fails every candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AffiliateError::Http`] if the remote API client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AffiliateError> {
        let mut strategies = Vec::new();

        if let Some(endpoint) = &config.affiliate_api_endpoint {
            strategies.push(Strategy::Api(AffiliateApiClient::new(
                endpoint,
                config.affiliate_api_token.as_deref(),
                config.affiliate_api_timeout_secs,
            )?));
        }
        if let Some(template) = &config.affiliate_portal_link {
            strategies.push(Strategy::Template(template.clone()));
        }
        if let Some(prefix) = &config.affiliate_link_prefix {
            strategies.push(Strategy::Prefix(prefix.clone()));
        }

        Ok(Self { strategies })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Attempts each strategy in priority order, first success wins.
    ///
    /// # Errors
    ///
    /// - [`AffiliateError::NoStrategies`] when nothing is configured.
    /// - [`AffiliateError::Exhausted`] when every strategy soft-failed.
    pub async fn resolve(&self, product_url: &str) -> Result<String, AffiliateError> {
        if self.strategies.is_empty() {
            return Err(AffiliateError::NoStrategies);
        }

        for strategy in &self.strategies {
            match strategy.attempt(product_url).await {
                Ok(link) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        url = %product_url,
                        "affiliate link resolved"
                    );
                    return Ok(link);
                }
                Err(soft) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        url = %product_url,
                        reason = %soft,
                        "affiliate strategy failed, falling through"
                    );
                }
            }
        }

        Err(AffiliateError::Exhausted {
            url: product_url.to_owned(),
        })
    }
}

/// Substitutes the percent-encoded product URL at the placeholder, or
/// returns the template verbatim when no placeholder is present.
fn apply_template(template: &str, product_url: &str) -> String {
    if template.contains(URL_PLACEHOLDER) {
        template.replace(URL_PLACEHOLDER, &encode(product_url))
    } else {
        template.to_owned()
    }
}

fn encode(url: &str) -> String {
    utf8_percent_encode(url, NON_ALPHANUMERIC).to_string()
}
