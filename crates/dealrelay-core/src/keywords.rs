//! Built-in keyword defaults for the deal classifier.

/// Default allow-list applied when `KEYWORDS_ALLOW` is empty.
///
/// Lowercase terms matched as case-insensitive substrings against message
/// text. Mixed Hebrew/English because the scanned channels post in both.
pub const DEFAULT_ALLOW_KEYWORDS: &[&str] = &[
    "deal",
    "sale",
    "discount",
    "coupon",
    "free shipping",
    "% off",
    "מבצע",
    "דיל",
    "הנחה",
    "קופון",
    "משלוח חינם",
];
