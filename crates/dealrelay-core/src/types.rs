use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inbound post fetched from a source channel.
///
/// Read-only through the pipeline; discarded after a publish/skip decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMessage {
    /// Platform-assigned message id within its channel.
    pub id: i64,
    /// Source channel the message was fetched from.
    pub channel: String,
    pub text: String,
    /// View count when the platform reports one. Missing data fails open
    /// at the view-threshold check.
    pub views: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub has_media: bool,
}

/// A commercial URL found in message text, plus the stable product identity
/// when one could be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// The URL exactly as it appeared in the source text.
    pub original_url: String,
    /// Canonical product URL, or the redirector URL itself when resolution
    /// failed.
    pub normalized_url: String,
    /// Stable across re-fetches of the same product. `None` is a legitimate
    /// result — such a link can still classify as a deal but cannot be
    /// deduplicated.
    pub product_id: Option<String>,
}

/// Structured hints parsed from message text. Each field is present only if
/// confidently parsed; the rewriter omits sections whose hint is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealHints {
    /// Price with its currency symbol, e.g. `"$12.99"` or `"₪45"`.
    pub price: Option<String>,
    /// Star rating, e.g. `"4.8"`.
    pub rating: Option<String>,
    /// Order count, e.g. `5000` for "5000+ sold".
    pub orders: Option<u64>,
    pub coupon_codes: Vec<String>,
}

impl DealHints {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.rating.is_none()
            && self.orders.is_none()
            && self.coupon_codes.is_empty()
    }
}

/// Final message text ready to publish, tag included.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub body: String,
    pub product_id: Option<String>,
}

/// Why a candidate was not published. Every rejected candidate gets exactly
/// one of these, logged and tallied per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Message older than the configured maximum age.
    Stale,
    /// No qualifying commercial link in the text.
    NoLink,
    /// A block-list keyword matched; vetoes regardless of allow matches.
    BlockedKeyword,
    /// Allow-list configured (or defaulted) and nothing matched.
    NoAllowKeyword,
    /// Known view count below the configured minimum.
    LowViews,
    /// All affiliate strategies failed or none were configured.
    AffiliateResolutionFailed,
    /// Product already handled this run or found in destination history.
    Duplicate,
    /// The publish call itself failed; candidate counted as not-posted.
    PublishFailed,
}

impl SkipReason {
    /// Stable snake_case code used in logs and the end-of-run tally.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            SkipReason::Stale => "stale",
            SkipReason::NoLink => "no_link",
            SkipReason::BlockedKeyword => "blocked_keyword",
            SkipReason::NoAllowKeyword => "no_allow_keyword",
            SkipReason::LowViews => "low_views",
            SkipReason::AffiliateResolutionFailed => "affiliate_resolution_failed",
            SkipReason::Duplicate => "duplicate",
            SkipReason::PublishFailed => "publish_failed",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
