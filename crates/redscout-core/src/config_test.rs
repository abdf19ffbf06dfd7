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

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("REDDIT_CLIENT_ID", "test-client-id");
    m.insert("REDDIT_CLIENT_SECRET", "test-client-secret");
    m
}

#[test]
fn fails_without_client_id() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "REDDIT_CLIENT_ID"),
        "expected MissingEnvVar(REDDIT_CLIENT_ID), got: {result:?}"
    );
}

#[test]
fn fails_without_client_secret() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REDDIT_CLIENT_ID", "test-client-id");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "REDDIT_CLIENT_SECRET"),
        "expected MissingEnvVar(REDDIT_CLIENT_SECRET), got: {result:?}"
    );
}

#[test]
fn succeeds_with_all_required_vars_and_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.reddit_client_id, "test-client-id");
    assert_eq!(cfg.reddit_user_agent, "redscout/0.1 (research automation)");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.search_delay_ms, 500);
    assert_eq!(cfg.api_base_url, "https://oauth.reddit.com");
    assert_eq!(cfg.token_url, "https://www.reddit.com/api/v1/access_token");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn user_agent_override() {
    let mut map = full_env();
    map.insert("REDDIT_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.reddit_user_agent, "custom-agent/2.0");
}

#[test]
fn search_delay_ms_override() {
    let mut map = full_env();
    map.insert("REDSCOUT_SEARCH_DELAY_MS", "1000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_delay_ms, 1000);
}

#[test]
fn search_delay_ms_invalid() {
    let mut map = full_env();
    map.insert("REDSCOUT_SEARCH_DELAY_MS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REDSCOUT_SEARCH_DELAY_MS"),
        "expected InvalidEnvVar(REDSCOUT_SEARCH_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("REDSCOUT_REQUEST_TIMEOUT_SECS", "thirty");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REDSCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(REDSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn api_base_url_override() {
    let mut map = full_env();
    map.insert("REDSCOUT_API_BASE_URL", "http://127.0.0.1:9999");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9999");
}

#[test]
fn debug_redacts_client_secret() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("test-client-secret"));
    assert!(debug.contains("[redacted]"));
}
