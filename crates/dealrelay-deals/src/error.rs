use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
