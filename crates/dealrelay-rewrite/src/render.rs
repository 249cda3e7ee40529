//! Post-processing invariants on generated copy.
//!
//! Whatever the collaborator returns, the published body ends up with
//! exactly one URL — the affiliate link — and is never empty.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"()]+"#).expect("valid url regex"));

/// Enforces the link invariants on generated text:
///
/// - every URL that is not the exact affiliate link is stripped;
/// - a second occurrence of the affiliate link is stripped too, so exactly
///   one remains;
/// - when the affiliate link does not appear verbatim, it is appended in
///   the designated link block.
#[must_use]
pub fn enforce_link_invariants(generated: &str, affiliate_link: &str) -> String {
    let mut kept_affiliate = false;
    let stripped = URL_RE.replace_all(generated, |caps: &regex::Captures<'_>| {
        let url = &caps[0];
        if url == affiliate_link && !kept_affiliate {
            kept_affiliate = true;
            url.to_owned()
        } else {
            String::new()
        }
    });

    // Stripped URL-only lines leave blank runs behind; collapse them.
    let mut body = stripped
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    while body.contains("\n\n\n") {
        body = body.replace("\n\n\n", "\n\n");
    }
    let mut body = body.trim().to_owned();

    if !kept_affiliate {
        body = format!("{body}\n\n👇 {affiliate_link}");
    }
    body
}

/// Deterministic minimal caption used when the collaborator returns
/// nothing usable. Generic line plus the affiliate link — always
/// publishable.
#[must_use]
pub fn fallback_caption(affiliate_link: &str) -> String {
    format!("דיל חדש מאליאקספרס 🔥\n\n👇 לרכישה:\n{affiliate_link}")
}
