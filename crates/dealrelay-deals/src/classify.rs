//! Deal classification: ordered short-circuit checks with per-check skip
//! reasons.

use chrono::{DateTime, Duration, Utc};

use dealrelay_core::{AppConfig, CandidateMessage, ExtractedLink, SkipReason, DEFAULT_ALLOW_KEYWORDS};

/// Classification policy, derived from configuration once per run.
#[derive(Debug, Clone)]
pub struct ClassifyPolicy {
    pub max_age_minutes: i64,
    /// `0` disables the view threshold.
    pub min_views: u64,
    /// Empty means the built-in defaults apply.
    pub allow: Vec<String>,
    pub block: Vec<String>,
}

impl ClassifyPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_age_minutes: config.max_message_age_minutes,
            min_views: config.min_views,
            allow: config.keywords_allow.clone(),
            block: config.keywords_block.clone(),
        }
    }
}

/// Decides whether a candidate is a postable deal.
///
/// Checks run in a fixed order and short-circuit on the first failure,
/// each with its own skip reason:
///
/// 1. age → [`SkipReason::Stale`]
/// 2. link presence → [`SkipReason::NoLink`]
/// 3. block-list → [`SkipReason::BlockedKeyword`] (evaluated before the
///    allow-list so a single blocked term vetoes regardless of matches)
/// 4. allow-list → [`SkipReason::NoAllowKeyword`]
/// 5. view threshold → [`SkipReason::LowViews`]; unknown view counts fail
///    open
///
/// # Errors
///
/// Returns the skip reason of the first failing check.
pub fn classify(
    message: &CandidateMessage,
    links: &[ExtractedLink],
    policy: &ClassifyPolicy,
    now: DateTime<Utc>,
) -> Result<(), SkipReason> {
    if now - message.timestamp > Duration::minutes(policy.max_age_minutes) {
        return Err(SkipReason::Stale);
    }

    if links.is_empty() {
        return Err(SkipReason::NoLink);
    }

    let haystack = message.text.to_lowercase();

    if matches_any(&haystack, &policy.block) {
        return Err(SkipReason::BlockedKeyword);
    }

    let allow_hit = if policy.allow.is_empty() {
        DEFAULT_ALLOW_KEYWORDS
            .iter()
            .any(|kw| haystack.contains(kw))
    } else {
        matches_any(&haystack, &policy.allow)
    };
    if !allow_hit {
        return Err(SkipReason::NoAllowKeyword);
    }

    if let Some(views) = message.views {
        if views < policy.min_views {
            return Err(SkipReason::LowViews);
        }
    }

    Ok(())
}

/// Case-insensitive substring match: `haystack` must already be lowercased,
/// keywords are lowercased per call.
fn matches_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|kw| haystack.contains(&kw.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn policy() -> ClassifyPolicy {
        ClassifyPolicy {
            max_age_minutes: 240,
            min_views: 0,
            allow: Vec::new(),
            block: Vec::new(),
        }
    }

    fn message(text: &str, age_minutes: i64, views: Option<u64>) -> (CandidateMessage, DateTime<Utc>) {
        let now = Utc::now();
        let msg = CandidateMessage {
            id: 1,
            channel: "source".to_owned(),
            text: text.to_owned(),
            views,
            timestamp: now - Duration::minutes(age_minutes),
            has_media: false,
        };
        (msg, now)
    }

    fn product_link() -> Vec<ExtractedLink> {
        vec![ExtractedLink {
            original_url: "https://www.aliexpress.com/item/42.html".to_owned(),
            normalized_url: "https://www.aliexpress.com/item/42.html".to_owned(),
            product_id: Some("42".to_owned()),
        }]
    }

    #[test]
    fn stale_message_rejected_first() {
        // 300 minutes old against a 240-minute bound; no link either, but
        // the age check short-circuits first.
        let (msg, now) = message("deal", 300, None);
        assert_eq!(classify(&msg, &[], &policy(), now), Err(SkipReason::Stale));
    }

    #[test]
    fn missing_link_rejected() {
        let (msg, now) = message("great deal today", 10, None);
        assert_eq!(classify(&msg, &[], &policy(), now), Err(SkipReason::NoLink));
    }

    #[test]
    fn blocked_keyword_vetoes_allow_match() {
        let mut p = policy();
        p.block = vec!["giveaway".to_owned()];
        p.allow = vec!["deal".to_owned()];
        let (msg, now) = message("deal GIVEAWAY inside", 10, None);
        assert_eq!(
            classify(&msg, &product_link(), &p, now),
            Err(SkipReason::BlockedKeyword)
        );
    }

    #[test]
    fn block_match_is_case_insensitive() {
        let mut p = policy();
        p.block = vec!["SCAM".to_owned()];
        let (msg, now) = message("total scam deal", 10, None);
        assert_eq!(
            classify(&msg, &product_link(), &p, now),
            Err(SkipReason::BlockedKeyword)
        );
    }

    #[test]
    fn no_allow_keyword_rejected() {
        let mut p = policy();
        p.allow = vec!["sale".to_owned()];
        let (msg, now) = message("look at this thing", 10, None);
        assert_eq!(
            classify(&msg, &product_link(), &p, now),
            Err(SkipReason::NoAllowKeyword)
        );
    }

    #[test]
    fn empty_allow_list_uses_defaults() {
        // "מבצע" is in the built-in defaults.
        let (msg, now) = message("מבצע מטורף", 10, None);
        assert_eq!(classify(&msg, &product_link(), &policy(), now), Ok(()));
    }

    #[test]
    fn default_allow_misses_plain_text() {
        let (msg, now) = message("just a product", 10, None);
        assert_eq!(
            classify(&msg, &product_link(), &policy(), now),
            Err(SkipReason::NoAllowKeyword)
        );
    }

    #[test]
    fn low_views_rejected() {
        let mut p = policy();
        p.min_views = 1500;
        let (msg, now) = message("deal", 10, Some(900));
        assert_eq!(
            classify(&msg, &product_link(), &p, now),
            Err(SkipReason::LowViews)
        );
    }

    #[test]
    fn unknown_views_fail_open() {
        let mut p = policy();
        p.min_views = 1500;
        let (msg, now) = message("deal", 10, None);
        assert_eq!(classify(&msg, &product_link(), &p, now), Ok(()));
    }

    #[test]
    fn qualifying_message_passes() {
        let mut p = policy();
        p.min_views = 1500;
        let (msg, now) = message("hot deal", 10, Some(2000));
        assert_eq!(classify(&msg, &product_link(), &p, now), Ok(()));
    }

    #[test]
    fn check_order_link_before_keywords() {
        let mut p = policy();
        p.block = vec!["scam".to_owned()];
        let (msg, now) = message("scam without a link", 10, None);
        assert_eq!(classify(&msg, &[], &p, now), Err(SkipReason::NoLink));
    }
}
