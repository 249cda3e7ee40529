//! Commercial URL extraction from free-form message text.
//!
//! Pure string work only — redirector expansion lives in
//! [`crate::resolve`] because it needs the network.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use dealrelay_core::ExtractedLink;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"()]+"#).expect("valid url regex"));

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/item/(\d+)(?:\.html)?").expect("valid item regex"));

/// Short-link hosts known to front product URLs.
const REDIRECTOR_HOSTS: &[&str] = &["s.click.aliexpress.com", "bit.ly", "tinyurl.com"];

/// Scans message text for qualifying commercial URLs, in order of
/// appearance.
///
/// Direct product URLs are canonicalized immediately and carry their item
/// id. Redirector URLs are kept as-is with no id; callers resolve them via
/// [`crate::resolve::RedirectResolver`].
#[must_use]
pub fn extract_links(text: &str) -> Vec<ExtractedLink> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', '!', '?']))
        .filter(|url| is_qualifying(url))
        .map(|url| match item_id(url) {
            Some(id) => ExtractedLink {
                original_url: url.to_owned(),
                normalized_url: canonical_product_url(&id),
                product_id: Some(id),
            },
            None => ExtractedLink {
                original_url: url.to_owned(),
                normalized_url: url.to_owned(),
                product_id: None,
            },
        })
        .collect()
}

/// True when `url` is a direct product-domain URL or a known redirector.
#[must_use]
pub(crate) fn is_qualifying(url: &str) -> bool {
    let host = host_of(url);
    host.contains("aliexpress") || REDIRECTOR_HOSTS.iter().any(|h| host == *h)
}

/// Extracts the numeric item id from a direct product URL.
#[must_use]
pub(crate) fn item_id(url: &str) -> Option<String> {
    ITEM_RE
        .captures(url)
        .map(|caps| caps[1].to_owned())
}

/// Canonical product URL for an item id: scheme, host, and path only.
#[must_use]
pub(crate) fn canonical_product_url(id: &str) -> String {
    format!("https://www.aliexpress.com/item/{id}.html")
}

/// Fallback identity for an unresolvable short link: a digest of its opaque
/// path token. Returns `None` when the path carries no token at all — such
/// links stay without an id and are never deduplicated.
#[must_use]
pub(crate) fn fallback_identity(url: &str) -> Option<String> {
    let path = url.splitn(4, '/').nth(3)?;
    let token = path.split(['?', '#']).next().unwrap_or("");
    let token = token.trim_matches('/');
    if token.is_empty() {
        return None;
    }
    let digest = Sha256::digest(token.as_bytes());
    let mut hex = String::with_capacity(16);
    for byte in &digest[..8] {
        hex.push_str(&format!("{byte:02x}"));
    }
    Some(hex)
}

fn host_of(url: &str) -> String {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .to_lowercase()
}
