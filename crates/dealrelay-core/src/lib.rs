pub mod app_config;
pub mod config;
pub mod keywords;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use keywords::DEFAULT_ALLOW_KEYWORDS;
pub use types::{CandidateMessage, DealHints, ExtractedLink, RenderedPost, SkipReason};
