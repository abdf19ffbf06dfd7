//! Shared types and configuration for the redscout research pipeline.
//!
//! Holds the normalized [`Item`] model produced by collection, the
//! env-derived [`AppConfig`], and the per-run [`ResearchConfig`] loaded
//! from a JSON file or stdin.

use thiserror::Error;

pub mod config;
pub mod item;
pub mod research;

pub use config::{load_app_config, load_app_config_from_env, AppConfig};
pub use item::{format_epoch_date, DedupKey, Item, ItemKind, Sentiment, DELETED_AUTHOR};
pub use research::{load_research_config, parse_research_config, ResearchConfig, SearchLimits};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read research config {path}: {source}")]
    ResearchFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse research config: {0}")]
    ResearchFileParse(#[from] serde_json::Error),

    #[error("research config validation failed: {0}")]
    Validation(String),
}
