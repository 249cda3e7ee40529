use thiserror::Error;

/// Errors from the text-generation client. All of them are soft at the
/// pipeline level — [`crate::CopyRewriter`] catches every variant and
/// falls back to the deterministic caption.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("generation response carried no content")]
    EmptyCompletion,
}
