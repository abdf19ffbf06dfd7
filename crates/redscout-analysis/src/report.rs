//! Aggregation of the enriched item collection into the run report.

use std::collections::BTreeMap;

use serde::Serialize;

use redscout_core::{format_epoch_date, Item, ItemKind, ResearchConfig, Sentiment};

/// How many posts the `top_posts` section keeps.
const TOP_POST_COUNT: usize = 10;

/// Sentiment breakdown for the items mentioning one entity.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntitySentiment {
    #[serde(rename = "Positive")]
    pub positive: u64,
    #[serde(rename = "Negative")]
    pub negative: u64,
    #[serde(rename = "Neutral")]
    pub neutral: u64,
    pub total: u64,
}

/// Run-wide sentiment tally across posts and comments alike.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SentimentTally {
    #[serde(rename = "Positive")]
    pub positive: u64,
    #[serde(rename = "Negative")]
    pub negative: u64,
    #[serde(rename = "Neutral")]
    pub neutral: u64,
}

impl SentimentTally {
    fn bump(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }
}

/// Per-subreddit aggregate over posts only.
#[derive(Debug, Clone, Serialize)]
pub struct SubredditStats {
    pub subreddit: String,
    pub posts: u64,
    pub avg_score: f64,
    pub avg_comments: f64,
}

/// Display projection of a high-scoring post.
#[derive(Debug, Clone, Serialize)]
pub struct TopPost {
    pub title: String,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: u64,
    pub url: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Engagement {
    pub total_posts: u64,
    pub total_comments: u64,
    /// Mean score across all items, rounded to 2 decimals.
    pub avg_score: f64,
    pub total_score: i64,
}

/// Earliest and latest item creation dates, `%Y-%m-%d`.
///
/// When every item carries the unknown-timestamp sentinel the range
/// degenerates to the epoch date on both ends.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DateRange {
    pub earliest: String,
    pub latest: String,
}

/// Immutable aggregation snapshot, computed once after collection.
///
/// The field set is the exporter contract: every key is always present,
/// even when its mapping or sequence is empty.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Mention counts per tracked entity; zero-match entities are
    /// omitted entirely, not reported as zero.
    pub entities: BTreeMap<String, u64>,
    pub entity_sentiment: BTreeMap<String, EntitySentiment>,
    pub sentiment: SentimentTally,
    /// Ordered by descending post count (subreddit name breaks ties).
    pub subreddits: Vec<SubredditStats>,
    /// At most 10 posts, descending score, insertion order breaks ties.
    pub top_posts: Vec<TopPost>,
    pub engagement: Engagement,
    pub date_range: DateRange,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the full report from the enriched item collection.
///
/// Pure derivation: no retrieval, no mutation of the input. Entity
/// matching re-scans each item's combined title and body so the counts
/// hold even if enrichment was skipped for some item.
#[must_use]
pub fn analyze(items: &[Item], config: &ResearchConfig) -> AnalysisReport {
    let mut entities = BTreeMap::new();
    let mut entity_sentiment = BTreeMap::new();
    for entity in &config.entities_to_track {
        let needle = entity.to_lowercase();
        let mut breakdown = SentimentTally::default();
        for item in items {
            if item.full_text().to_lowercase().contains(&needle) {
                breakdown.bump(item.sentiment);
            }
        }
        let total = breakdown.total();
        if total > 0 {
            entities.insert(entity.clone(), total);
            entity_sentiment.insert(
                entity.clone(),
                EntitySentiment {
                    positive: breakdown.positive,
                    negative: breakdown.negative,
                    neutral: breakdown.neutral,
                    total,
                },
            );
        }
    }

    let mut sentiment = SentimentTally::default();
    for item in items {
        sentiment.bump(item.sentiment);
    }

    let posts: Vec<&Item> = items.iter().filter(|i| i.kind == ItemKind::Post).collect();

    // Per-subreddit sums over posts; BTreeMap keeps ties deterministic.
    let mut by_subreddit: BTreeMap<&str, (u64, i64, u64)> = BTreeMap::new();
    for post in &posts {
        let entry = by_subreddit.entry(post.subreddit.as_str()).or_default();
        entry.0 += 1;
        entry.1 += post.score;
        entry.2 += post.num_comments;
    }
    #[allow(clippy::cast_precision_loss)]
    let mut subreddits: Vec<SubredditStats> = by_subreddit
        .into_iter()
        .map(|(name, (count, score_sum, comment_sum))| SubredditStats {
            subreddit: name.to_string(),
            posts: count,
            avg_score: round2(score_sum as f64 / count as f64),
            avg_comments: round2(comment_sum as f64 / count as f64),
        })
        .collect();
    subreddits.sort_by(|a, b| b.posts.cmp(&a.posts).then(a.subreddit.cmp(&b.subreddit)));

    // Stable sort: among equal scores, earlier retrieval order wins.
    let mut ranked = posts.clone();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    let top_posts = ranked
        .iter()
        .take(TOP_POST_COUNT)
        .map(|post| TopPost {
            title: post.title.clone(),
            subreddit: post.subreddit.clone(),
            score: post.score,
            num_comments: post.num_comments,
            url: post.url.clone(),
            sentiment: post.sentiment,
        })
        .collect();

    let total_score: i64 = items.iter().map(|i| i.score).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_score = if items.is_empty() {
        0.0
    } else {
        round2(total_score as f64 / items.len() as f64)
    };
    let engagement = Engagement {
        total_posts: posts.len() as u64,
        total_comments: items.iter().filter(|i| i.kind == ItemKind::Comment).count() as u64,
        avg_score,
        total_score,
    };

    let mut earliest = f64::INFINITY;
    let mut latest = f64::NEG_INFINITY;
    for item in items {
        earliest = earliest.min(item.created_utc);
        latest = latest.max(item.created_utc);
    }
    let date_range = if items.is_empty() {
        DateRange {
            earliest: format_epoch_date(0.0),
            latest: format_epoch_date(0.0),
        }
    } else {
        DateRange {
            earliest: format_epoch_date(earliest),
            latest: format_epoch_date(latest),
        }
    };

    tracing::debug!(
        items = items.len(),
        tracked_entities = config.entities_to_track.len(),
        matched_entities = entities.len(),
        "analysis complete"
    );

    AnalysisReport {
        entities,
        entity_sentiment,
        sentiment,
        subreddits,
        top_posts,
        engagement,
        date_range,
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
