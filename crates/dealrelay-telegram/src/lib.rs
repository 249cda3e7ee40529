//! Messaging-platform boundary.
//!
//! The platform client itself is out of scope for the pipeline; this crate
//! pins down the interface the Run Controller needs — fetch recent
//! messages, publish one, read destination history — as the
//! [`MessageGateway`] trait, plus an HTTP implementation against a
//! Bot-API-shaped gateway.

pub mod client;
pub mod error;
pub mod gateway;

pub use client::GatewayClient;
pub use error::TelegramError;
pub use gateway::MessageGateway;
