//! Per-run research configuration, loaded from a JSON file or stdin.
//!
//! Missing optional fields take the documented defaults at parse time, so
//! downstream code never sees a partially-populated config.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Per-page retrieval limits.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchLimits {
    /// Maximum posts requested per (subreddit, term) search.
    #[serde(default = "default_post_limit")]
    pub posts: u32,
    /// Maximum top-level comments fetched per post.
    #[serde(default = "default_comment_limit")]
    pub comments: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            posts: default_post_limit(),
            comments: default_comment_limit(),
        }
    }
}

/// A validated research run description. Immutable for the run's duration.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchConfig {
    /// Human-readable run label; also feeds the output file names.
    pub topic: String,
    /// Ordered search queries; the first 5 also drive the all-Reddit pass.
    pub search_terms: Vec<String>,
    /// Ordered subreddit names to search (without the `r/` prefix).
    pub subreddits: Vec<String>,
    /// Entity names whose mentions and sentiment are measured.
    #[serde(default)]
    pub entities_to_track: Vec<String>,
    #[serde(default = "default_keywords_positive")]
    pub keywords_positive: Vec<String>,
    #[serde(default = "default_keywords_negative")]
    pub keywords_negative: Vec<String>,
    #[serde(default)]
    pub limits: SearchLimits,
    /// Whether to run the supplementary all-Reddit pass after the
    /// subreddit cross-product.
    #[serde(default = "default_true")]
    pub include_all_reddit: bool,
    /// Post limit for the all-Reddit pass (comment limit is shared).
    #[serde(default = "default_all_reddit_limit")]
    pub all_reddit_limit: u32,
}

fn default_post_limit() -> u32 {
    50
}

fn default_comment_limit() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_all_reddit_limit() -> u32 {
    10
}

fn default_keywords_positive() -> Vec<String> {
    [
        "great",
        "excellent",
        "love",
        "perfect",
        "best",
        "amazing",
        "recommend",
        "helped",
        "worked",
        "worth it",
        "game changer",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_keywords_negative() -> Vec<String> {
    [
        "bad",
        "terrible",
        "hate",
        "worst",
        "avoid",
        "waste",
        "disappointed",
        "useless",
        "problem",
        "issue",
        "toxic",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Load and validate a research configuration from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_research_config(path: &Path) -> Result<ResearchConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ResearchFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_research_config(&content)
}

/// Parse and validate a research configuration from a JSON string.
///
/// # Errors
///
/// Returns `ConfigError` if the JSON does not parse or fails validation.
pub fn parse_research_config(json: &str) -> Result<ResearchConfig, ConfigError> {
    let config: ResearchConfig = serde_json::from_str(json)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ResearchConfig) -> Result<(), ConfigError> {
    if config.topic.trim().is_empty() {
        return Err(ConfigError::Validation(
            "topic must be non-empty".to_string(),
        ));
    }

    if config.search_terms.is_empty() {
        return Err(ConfigError::Validation(
            "search_terms must contain at least one term".to_string(),
        ));
    }
    if config.search_terms.iter().any(|t| t.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "search_terms must not contain empty terms".to_string(),
        ));
    }

    if config.subreddits.is_empty() {
        return Err(ConfigError::Validation(
            "subreddits must contain at least one subreddit".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for subreddit in &config.subreddits {
        if subreddit.trim().is_empty() {
            return Err(ConfigError::Validation(
                "subreddits must not contain empty names".to_string(),
            ));
        }
        if !seen.insert(subreddit.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate subreddit: '{subreddit}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "research_test.rs"]
mod tests;
