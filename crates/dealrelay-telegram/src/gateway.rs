//! The messaging seam the Run Controller depends on.

use async_trait::async_trait;

use dealrelay_core::CandidateMessage;

use crate::error::TelegramError;

/// Everything the pipeline needs from the messaging platform.
///
/// The controller holds a `&dyn MessageGateway`, so tests drive the whole
/// run against an in-memory implementation without any network.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Most-recent `limit` text messages of `channel`, newest first.
    /// Messages without text are not returned.
    async fn recent_messages(
        &self,
        channel: &str,
        limit: usize,
    ) -> Result<Vec<CandidateMessage>, TelegramError>;

    /// Publishes `text` to `channel`.
    async fn publish(&self, channel: &str, text: &str) -> Result<(), TelegramError>;

    /// Text bodies of the most-recent `depth` messages of `channel`, for
    /// duplicate-tag scanning.
    async fn destination_history(
        &self,
        channel: &str,
        depth: usize,
    ) -> Result<Vec<String>, TelegramError>;
}
