/// Runtime configuration for one pipeline run. Built from environment
/// variables by [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// Source channels to scan, in scan order. Never empty — an empty parse
    /// is a fatal [`crate::ConfigError::EmptySourceChannels`].
    pub source_channels: Vec<String>,
    pub target_channel: String,
    pub bot_token: String,
    pub api_base: String,

    pub affiliate_api_endpoint: Option<String>,
    pub affiliate_api_token: Option<String>,
    pub affiliate_api_timeout_secs: u64,
    /// Template with a `{{URL}}` placeholder, or a fixed personal link when
    /// no placeholder is present.
    pub affiliate_portal_link: Option<String>,
    pub affiliate_link_prefix: Option<String>,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_base: String,
    pub rewrite_language: String,

    /// Minimum view count; `0` disables the check entirely.
    pub min_views: u64,
    pub max_messages_per_channel: usize,
    pub max_posts_per_run: usize,
    pub post_cooldown_secs: u64,
    pub max_message_age_minutes: i64,
    /// Empty means the built-in default set applies.
    pub keywords_allow: Vec<String>,
    pub keywords_block: Vec<String>,
    pub history_scan_depth: usize,
    pub dry_run: bool,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("source_channels", &self.source_channels)
            .field("target_channel", &self.target_channel)
            .field("bot_token", &"[redacted]")
            .field("api_base", &self.api_base)
            .field("affiliate_api_endpoint", &self.affiliate_api_endpoint)
            .field(
                "affiliate_api_token",
                &self.affiliate_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("affiliate_api_timeout_secs", &self.affiliate_api_timeout_secs)
            .field("affiliate_portal_link", &self.affiliate_portal_link)
            .field("affiliate_link_prefix", &self.affiliate_link_prefix)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_api_base", &self.openai_api_base)
            .field("rewrite_language", &self.rewrite_language)
            .field("min_views", &self.min_views)
            .field("max_messages_per_channel", &self.max_messages_per_channel)
            .field("max_posts_per_run", &self.max_posts_per_run)
            .field("post_cooldown_secs", &self.post_cooldown_secs)
            .field("max_message_age_minutes", &self.max_message_age_minutes)
            .field("keywords_allow", &self.keywords_allow)
            .field("keywords_block", &self.keywords_block)
            .field("history_scan_depth", &self.history_scan_depth)
            .field("dry_run", &self.dry_run)
            .field("log_level", &self.log_level)
            .finish()
    }
}
