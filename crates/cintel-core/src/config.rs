use crate::app_config::{AnalysisMode, AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid. Missing API keys
/// are not an error here: the service starts and degrades every route to a
/// configuration-error response instead.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("CINTEL_ENV", "development"));
    let bind_addr = parse_addr("CINTEL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CINTEL_LOG_LEVEL", "info");

    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok().filter(|s| !s.is_empty());
    let anthropic_api_key = lookup("ANTHROPIC_API_KEY").ok().filter(|s| !s.is_empty());

    let analysis_mode = parse_analysis_mode(&or_default("CINTEL_ANALYSIS_MODE", "free_text"))?;
    let claude_model = or_default("CINTEL_CLAUDE_MODEL", "claude-3-haiku-20240307");
    let claude_max_tokens = parse_u32("CINTEL_CLAUDE_MAX_TOKENS", "2000")?;
    let comment_limit = parse_u32("CINTEL_COMMENT_LIMIT", "50")?;
    let youtube_timeout_secs = parse_u64("CINTEL_YOUTUBE_TIMEOUT_SECS", "30")?;
    let claude_timeout_secs = parse_u64("CINTEL_CLAUDE_TIMEOUT_SECS", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        anthropic_api_key,
        analysis_mode,
        claude_model,
        claude_max_tokens,
        comment_limit,
        youtube_timeout_secs,
        claude_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Parse the analysis mode. Unlike the environment, a typo here would
/// silently change analysis semantics, so unknown values are an error.
fn parse_analysis_mode(s: &str) -> Result<AnalysisMode, ConfigError> {
    match s {
        "free_text" => Ok(AnalysisMode::FreeText),
        "structured" => Ok(AnalysisMode::Structured),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CINTEL_ANALYSIS_MODE".to_string(),
            reason: format!("expected 'free_text' or 'structured', got '{other}'"),
        }),
    }
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

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("empty env is valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.youtube_api_key.is_none());
        assert!(cfg.anthropic_api_key.is_none());
        assert!(!cfg.is_configured());
        assert_eq!(cfg.analysis_mode, AnalysisMode::FreeText);
        assert_eq!(cfg.claude_model, "claude-3-haiku-20240307");
        assert_eq!(cfg.claude_max_tokens, 2000);
        assert_eq!(cfg.comment_limit, 50);
        assert_eq!(cfg.youtube_timeout_secs, 30);
        assert_eq!(cfg.claude_timeout_secs, 120);
    }

    #[test]
    fn build_app_config_reads_api_keys() {
        let mut map = HashMap::new();
        map.insert("YOUTUBE_API_KEY", "yt-key");
        map.insert("ANTHROPIC_API_KEY", "claude-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.youtube_api_key.as_deref(), Some("yt-key"));
        assert_eq!(cfg.anthropic_api_key.as_deref(), Some("claude-key"));
        assert!(cfg.is_configured());
    }

    #[test]
    fn build_app_config_treats_empty_key_as_missing() {
        let mut map = HashMap::new();
        map.insert("YOUTUBE_API_KEY", "");
        map.insert("ANTHROPIC_API_KEY", "claude-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.youtube_api_key.is_none());
        assert!(!cfg.is_configured());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("CINTEL_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CINTEL_BIND_ADDR"),
            "expected InvalidEnvVar(CINTEL_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_parses_structured_mode() {
        let mut map = HashMap::new();
        map.insert("CINTEL_ANALYSIS_MODE", "structured");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.analysis_mode, AnalysisMode::Structured);
    }

    #[test]
    fn build_app_config_rejects_unknown_analysis_mode() {
        let mut map = HashMap::new();
        map.insert("CINTEL_ANALYSIS_MODE", "yaml");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CINTEL_ANALYSIS_MODE"),
            "expected InvalidEnvVar(CINTEL_ANALYSIS_MODE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_limits() {
        let mut map = HashMap::new();
        map.insert("CINTEL_COMMENT_LIMIT", "fifty");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CINTEL_COMMENT_LIMIT"),
            "expected InvalidEnvVar(CINTEL_COMMENT_LIMIT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_overrides_timeouts() {
        let mut map = HashMap::new();
        map.insert("CINTEL_YOUTUBE_TIMEOUT_SECS", "10");
        map.insert("CINTEL_CLAUDE_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.youtube_timeout_secs, 10);
        assert_eq!(cfg.claude_timeout_secs, 60);
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let mut map = HashMap::new();
        map.insert("YOUTUBE_API_KEY", "super-secret");
        map.insert("ANTHROPIC_API_KEY", "also-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret"), "debug leaked key: {debug}");
        assert!(!debug.contains("also-secret"), "debug leaked key: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
