//! Structured-hint parsing from raw message text.
//!
//! Every parser fails open to `None`/empty: a hint is only reported when
//! the text states it plainly, because the rewriter forwards hints as facts.

use std::sync::LazyLock;

use regex::Regex;

use dealrelay_core::DealHints;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[₪$]\s?\d+(?:\.\d+)?").expect("valid price regex"));

static RATING_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d(?:\.\d)?)\s*[⭐★]").expect("valid star rating regex"));

static RATING_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rating[:\s]*(\d(?:\.\d)?)").expect("valid word rating regex")
});

static ORDERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s*\+?\s*(?:sold|orders|הזמנות)").expect("valid orders regex")
});

static COUPON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?i:coupon|code|קופון))\s*[:\-]?\s*([A-Z0-9]{4,12})")
        .expect("valid coupon regex")
});

/// Parses price, rating, order-count, and coupon hints out of message text.
#[must_use]
pub fn parse_hints(text: &str) -> DealHints {
    DealHints {
        price: parse_price(text),
        rating: parse_rating(text),
        orders: parse_orders(text),
        coupon_codes: parse_coupons(text),
    }
}

/// First currency-marked amount in the text, whitespace collapsed
/// (`"$ 12.99"` → `"$12.99"`).
fn parse_price(text: &str) -> Option<String> {
    PRICE_RE
        .find(text)
        .map(|m| m.as_str().replace(' ', ""))
}

/// A star rating like `"4.8⭐"` or `"rating: 4.8"`. Star form wins when
/// both appear.
fn parse_rating(text: &str) -> Option<String> {
    RATING_STAR_RE
        .captures(text)
        .or_else(|| RATING_WORD_RE.captures(text))
        .map(|caps| caps[1].to_owned())
}

/// Order count from `"5,000+ sold"` / `"1234 orders"` forms.
fn parse_orders(text: &str) -> Option<u64> {
    let caps = ORDERS_RE.captures(text)?;
    caps[1].replace(',', "").parse::<u64>().ok()
}

/// Uppercase coupon tokens following a coupon/code marker, deduplicated,
/// in order of appearance.
fn parse_coupons(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in COUPON_RE.captures_iter(text) {
        let code = caps[1].to_owned();
        if !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}
