use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// `TG_SOURCE_CHANNELS` was set but parsed to zero channels (e.g. `","`).
    /// Fatal: the run must abort before contacting any collaborator.
    #[error("TG_SOURCE_CHANNELS parsed to an empty channel list")]
    EmptySourceChannels,
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got \"{other}\""),
            }),
        }
    };

    let source_channels = parse_list(&require("TG_SOURCE_CHANNELS")?);
    if source_channels.is_empty() {
        return Err(ConfigError::EmptySourceChannels);
    }

    let target_channel = require("TG_TARGET_CHANNEL")?;
    let bot_token = require("TG_BOT_TOKEN")?;
    let api_base = or_default("TG_API_BASE", "https://api.telegram.org");

    let affiliate_api_endpoint = optional("AFFILIATE_API_ENDPOINT");
    let affiliate_api_token = optional("AFFILIATE_API_TOKEN");
    let affiliate_api_timeout_secs = parse_u64("AFFILIATE_API_TIMEOUT_SECS", "15")?;
    let affiliate_portal_link = optional("AFFILIATE_PORTAL_LINK");
    let affiliate_link_prefix = optional("AFFILIATE_LINK_PREFIX");

    let openai_api_key = optional("OPENAI_API_KEY");
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o-mini");
    let openai_api_base = or_default("OPENAI_API_BASE", "https://api.openai.com/v1");
    let rewrite_language = or_default("REWRITE_LANGUAGE", "Hebrew");

    let min_views = parse_u64("MIN_VIEWS", "0")?;
    let max_messages_per_channel = parse_usize("MAX_MESSAGES_PER_CHANNEL", "50")?;
    let max_posts_per_run = parse_usize("MAX_POSTS_PER_RUN", "10")?;
    let post_cooldown_secs = parse_u64("POST_COOLDOWN_SECS", "2")?;
    let max_message_age_minutes = parse_i64("MAX_MESSAGE_AGE_MINUTES", "1440")?;

    let keywords_allow = parse_list(&or_default("KEYWORDS_ALLOW", ""));
    let keywords_block = parse_list(&or_default("KEYWORDS_BLOCK", ""));

    let history_scan_depth = parse_usize("HISTORY_SCAN_DEPTH", "200")?;
    let dry_run = parse_bool("DRY_RUN", "false")?;
    let log_level = or_default("LOG_LEVEL", "info");

    Ok(AppConfig {
        source_channels,
        target_channel,
        bot_token,
        api_base,
        affiliate_api_endpoint,
        affiliate_api_token,
        affiliate_api_timeout_secs,
        affiliate_portal_link,
        affiliate_link_prefix,
        openai_api_key,
        openai_model,
        openai_api_base,
        rewrite_language,
        min_views,
        max_messages_per_channel,
        max_posts_per_run,
        post_cooldown_secs,
        max_message_age_minutes,
        keywords_allow,
        keywords_block,
        history_scan_depth,
        dry_run,
        log_level,
    })
}

/// Splits a comma-separated list, trimming whitespace and dropping empty
/// entries. `","` therefore parses to an empty list.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("TG_SOURCE_CHANNELS", "deals_a,deals_b");
        m.insert("TG_TARGET_CHANNEL", "my_deals");
        m.insert("TG_BOT_TOKEN", "test-token");
        m
    }

    #[test]
    fn parse_list_splits_and_trims() {
        assert_eq!(parse_list("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn parse_list_single_comma_is_empty() {
        assert!(parse_list(",").is_empty());
    }

    #[test]
    fn parse_list_empty_string_is_empty() {
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn build_app_config_fails_without_source_channels() {
        let mut map = full_env();
        map.remove("TG_SOURCE_CHANNELS");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TG_SOURCE_CHANNELS"),
            "expected MissingEnvVar(TG_SOURCE_CHANNELS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_on_empty_channel_list() {
        let mut map = full_env();
        map.insert("TG_SOURCE_CHANNELS", ",");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::EmptySourceChannels)),
            "expected EmptySourceChannels, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_target_channel() {
        let mut map = full_env();
        map.remove("TG_TARGET_CHANNEL");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TG_TARGET_CHANNEL"),
            "expected MissingEnvVar(TG_TARGET_CHANNEL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.source_channels, vec!["deals_a", "deals_b"]);
        assert_eq!(cfg.target_channel, "my_deals");
        assert_eq!(cfg.api_base, "https://api.telegram.org");
        assert_eq!(cfg.min_views, 0);
        assert_eq!(cfg.max_messages_per_channel, 50);
        assert_eq!(cfg.max_posts_per_run, 10);
        assert_eq!(cfg.post_cooldown_secs, 2);
        assert_eq!(cfg.max_message_age_minutes, 1440);
        assert_eq!(cfg.history_scan_depth, 200);
        assert!(cfg.keywords_allow.is_empty());
        assert!(cfg.keywords_block.is_empty());
        assert!(cfg.affiliate_api_endpoint.is_none());
        assert!(!cfg.dry_run);
        assert_eq!(cfg.openai_model, "gpt-4o-mini");
        assert_eq!(cfg.rewrite_language, "Hebrew");
    }

    #[test]
    fn build_app_config_min_views_override() {
        let mut map = full_env();
        map.insert("MIN_VIEWS", "1500");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.min_views, 1500);
    }

    #[test]
    fn build_app_config_min_views_invalid() {
        let mut map = full_env();
        map.insert("MIN_VIEWS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MIN_VIEWS"),
            "expected InvalidEnvVar(MIN_VIEWS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_message_age_override() {
        let mut map = full_env();
        map.insert("MAX_MESSAGE_AGE_MINUTES", "240");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_message_age_minutes, 240);
    }

    #[test]
    fn build_app_config_dry_run_true_variants() {
        for raw in ["true", "1", "yes", "TRUE"] {
            let mut map = full_env();
            map.insert("DRY_RUN", raw);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert!(cfg.dry_run, "expected dry_run for DRY_RUN={raw}");
        }
    }

    #[test]
    fn build_app_config_dry_run_invalid() {
        let mut map = full_env();
        map.insert("DRY_RUN", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DRY_RUN"),
            "expected InvalidEnvVar(DRY_RUN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_blank_optional_treated_as_unset() {
        let mut map = full_env();
        map.insert("AFFILIATE_API_ENDPOINT", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.affiliate_api_endpoint.is_none());
    }

    #[test]
    fn build_app_config_keyword_lists_parsed() {
        let mut map = full_env();
        map.insert("KEYWORDS_ALLOW", "deal, sale");
        map.insert("KEYWORDS_BLOCK", "scam");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.keywords_allow, vec!["deal", "sale"]);
        assert_eq!(cfg.keywords_block, vec!["scam"]);
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut map = full_env();
        map.insert("AFFILIATE_API_TOKEN", "super-secret");
        map.insert("OPENAI_API_KEY", "sk-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("sk-secret"));
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("[redacted]"));
    }
}
