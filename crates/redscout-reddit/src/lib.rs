//! Reddit retrieval for the redscout research pipeline.
//!
//! [`RedditClient`] authenticates with client-credentials OAuth and
//! fetches one search's worth of posts and comments at a time
//! ([`RedditClient::search_items`]). [`session`] drives those calls
//! across the full subreddit × term cross-product with global
//! deduplication and inter-call pacing.

pub mod client;
pub mod error;
pub mod pacer;
pub mod raw;
pub mod session;

pub use client::{RedditClient, SearchScope};
pub use error::RedditError;
pub use pacer::Pacer;
pub use session::{collect_items, run_collection, CollectSession, ProgressEvent};
