use crate::ConfigError;

/// Environment-derived application configuration: Reddit credentials and
/// HTTP/pacing tuning knobs. The per-run research criteria live in
/// [`crate::ResearchConfig`] instead.
#[derive(Clone)]
pub struct AppConfig {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub request_timeout_secs: u64,
    /// Minimum interval between search calls, in milliseconds.
    pub search_delay_ms: u64,
    /// Base URL for authenticated API calls. Overridable so tests can
    /// point the client at a local mock server.
    pub api_base_url: String,
    /// Token-exchange endpoint. Overridable for the same reason.
    pub token_url: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("reddit_client_id", &self.reddit_client_id)
            .field("reddit_client_secret", &"[redacted]")
            .field("reddit_user_agent", &self.reddit_user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("search_delay_ms", &self.search_delay_ms)
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .field("log_level", &self.log_level)
            .finish()
    }
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

/// Load application configuration from environment variables already in
/// the process.
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

/// Build application configuration using the provided env-var lookup
/// function.
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let reddit_client_id = require("REDDIT_CLIENT_ID")?;
    let reddit_client_secret = require("REDDIT_CLIENT_SECRET")?;
    let reddit_user_agent = or_default("REDDIT_USER_AGENT", "redscout/0.1 (research automation)");

    let request_timeout_secs = parse_u64("REDSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let search_delay_ms = parse_u64("REDSCOUT_SEARCH_DELAY_MS", "500")?;
    let api_base_url = or_default("REDSCOUT_API_BASE_URL", "https://oauth.reddit.com");
    let token_url = or_default(
        "REDSCOUT_TOKEN_URL",
        "https://www.reddit.com/api/v1/access_token",
    );
    let log_level = or_default("REDSCOUT_LOG_LEVEL", "info");

    Ok(AppConfig {
        reddit_client_id,
        reddit_client_secret,
        reddit_user_agent,
        request_timeout_secs,
        search_delay_ms,
        api_base_url,
        token_url,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
