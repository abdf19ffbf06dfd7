//! Text heuristics and aggregation for collected research items.
//!
//! [`classify`] holds the pure keyword heuristics (entity mentions,
//! sentiment) applied per item; [`report`] derives the run's summary
//! statistics from the enriched collection. Neither performs retrieval.

pub mod classify;
pub mod report;

pub use classify::{classify_sentiment, enrich, find_entities};
pub use report::{
    analyze, AnalysisReport, DateRange, Engagement, EntitySentiment, SentimentTally,
    SubredditStats, TopPost,
};
