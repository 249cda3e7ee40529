//! Deal detection for the relay pipeline.
//!
//! Extracts commercial links from raw message text, resolves shortened
//! forms to canonical product URLs, parses structured hints (price, rating,
//! orders, coupons), and classifies candidates with ordered skip reasons.

pub mod classify;
pub mod error;
pub mod extract;
pub mod hints;
pub mod resolve;

pub use classify::{classify, ClassifyPolicy};
pub use error::DealError;
pub use extract::extract_links;
pub use hints::parse_hints;
pub use resolve::RedirectResolver;
