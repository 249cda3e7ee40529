//! Duplicate-suppression tag embedded in published posts.
//!
//! The tag rides along in the message text so cross-run deduplication
//! needs no storage beyond the destination channel's own history.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(id:([A-Za-z0-9_-]+)\)").expect("valid tag regex"));

/// Renders the suppression tag for a product identifier.
#[must_use]
pub fn dedup_tag(product_id: &str) -> String {
    format!("(id:{product_id})")
}

/// Collects every tagged product identifier appearing in `text`.
///
/// Used against fetched destination-channel history; messages published by
/// anything other than this pipeline simply contribute nothing.
#[must_use]
pub fn extract_tagged_ids(text: &str) -> HashSet<String> {
    TAG_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trips_through_extraction() {
        let tag = dedup_tag("1005001234567890");
        let ids = extract_tagged_ids(&format!("some post body\n{tag}"));
        assert!(ids.contains("1005001234567890"));
    }

    #[test]
    fn extraction_finds_multiple_tags() {
        let ids = extract_tagged_ids("(id:aaa) text (id:bbb)");
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("aaa") && ids.contains("bbb"));
    }

    #[test]
    fn extraction_ignores_untagged_text() {
        assert!(extract_tagged_ids("no tags here (id:) (id )").is_empty());
    }

    #[test]
    fn digest_identities_extract_cleanly() {
        // Fallback identities are hex digests; the tag alphabet covers them.
        let tag = dedup_tag("a1b2c3d4e5f60718");
        assert!(extract_tagged_ids(&tag).contains("a1b2c3d4e5f60718"));
    }
}
