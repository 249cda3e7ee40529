use thiserror::Error;

/// Errors surfaced to the pipeline by affiliate resolution.
///
/// Individual strategy failures never appear here — they are
/// [`SoftFailure`]s consumed by the fallback loop.
#[derive(Debug, Error)]
pub enum AffiliateError {
    /// Network or TLS failure while constructing the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No endpoint, template, or prefix configured at all.
    #[error("no affiliate strategies configured")]
    NoStrategies,

    /// Every configured strategy soft-failed for this URL.
    #[error("all affiliate strategies failed for {url}")]
    Exhausted { url: String },
}

/// A strategy-level failure that triggers fallback rather than aborting.
#[derive(Debug)]
pub(crate) struct SoftFailure(pub String);

impl std::fmt::Display for SoftFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
