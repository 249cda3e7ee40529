//! Copy rewriting for the relay pipeline.
//!
//! Sends source text plus structured hints to the text-generation
//! collaborator, enforces link-placement invariants on whatever comes
//! back, and guarantees a publishable body for every candidate via a
//! deterministic fallback. Also owns the duplicate-suppression tag format
//! embedded in published posts.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod tag;

pub use client::ChatClient;
pub use error::RewriteError;
pub use pipeline::CopyRewriter;
pub use render::{enforce_link_invariants, fallback_caption};
pub use tag::{dedup_tag, extract_tagged_ids};
