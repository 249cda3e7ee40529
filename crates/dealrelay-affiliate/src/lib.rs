//! Affiliate link resolution.
//!
//! Turns a canonical product URL into a monetized referral URL through a
//! priority-ordered strategy list: remote API, then template substitution,
//! then prefix concatenation. Strategy failures are soft — the next
//! strategy is tried — and only a fully exhausted (or empty) strategy list
//! fails resolution. The pipeline never publishes a non-monetized URL.

pub mod client;
pub mod error;
pub mod strategy;

pub use client::AffiliateApiClient;
pub use error::AffiliateError;
pub use strategy::AffiliateResolver;
