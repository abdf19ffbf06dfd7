//! Normalized representation of a collected Reddit post or comment.
//!
//! ## Observed shape from the Reddit search API
//!
//! Search results arrive as listing children of kind `t3` (posts); the
//! `/comments/{article}` endpoint returns children of kind `t1`
//! (comments) mixed with `more` placeholders. Fields on either can be
//! missing or null for removed, edited, or rate-limited content, so every
//! field here documents the default it falls back to. `author` is a plain
//! string in the JSON but is absent or null for deleted accounts — the
//! [`DELETED_AUTHOR`] sentinel stands in for those.

use serde::Serialize;

/// Author sentinel used when the author field is absent or null.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Whether an [`Item`] originated as a post or a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Post,
    Comment,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Post => write!(f, "post"),
            ItemKind::Comment => write!(f, "comment"),
        }
    }
}

/// Keyword-heuristic sentiment label. Ties always resolve to `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Identity of an item within a run. Reddit ids are unique only within
/// their kind (a post and a comment can share an id), so the pair is the
/// dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub id: String,
    pub kind: ItemKind,
}

/// A collected post or comment, normalized and tolerant of missing
/// source fields.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// Reddit-assigned id, e.g. `"1abc2d"`. Unique only within `kind`.
    pub id: String,
    pub kind: ItemKind,
    /// Subreddit display name the item was found in.
    pub subreddit: String,
    /// Post title; always empty for comments.
    pub title: String,
    /// Selftext for posts, body for comments. May be empty.
    pub text: String,
    /// Author name, or [`DELETED_AUTHOR`] when unavailable.
    pub author: String,
    /// Net score; `0` when absent.
    pub score: i64,
    /// Posts only; `0.0` for comments and when absent.
    pub upvote_ratio: f64,
    /// Posts only; `0` for comments and when absent.
    pub num_comments: u64,
    /// Creation time in epoch seconds; `0.0` signals "unknown".
    pub created_utc: f64,
    /// Permalink-derived URL; empty when unconstructable.
    pub url: String,
    /// The search term responsible for the pass that yielded this item.
    /// First-seen wins: re-retrieval under another term never updates it.
    pub search_term: String,
    /// Comments only: id of the parent post.
    pub parent_id: String,
    /// Comments only: title of the parent post.
    pub parent_title: String,
    /// Tracked entities found in `title + text`. Filled by enrichment.
    pub entities_mentioned: Vec<String>,
    /// Keyword-heuristic sentiment. Filled by enrichment.
    pub sentiment: Sentiment,
}

impl Item {
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            id: self.id.clone(),
            kind: self.kind,
        }
    }

    /// Title and body joined for classification, matching how both
    /// classifiers and the aggregator look at an item's text.
    #[must_use]
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.text)
    }

    /// Creation date formatted `%Y-%m-%d`. The unknown sentinel `0.0`
    /// maps to `1970-01-01`.
    #[must_use]
    pub fn created_date(&self) -> String {
        format_epoch_date(self.created_utc)
    }
}

/// Formats epoch seconds as a `%Y-%m-%d` calendar date.
///
/// Out-of-range values (far future, NaN) fall back to the epoch date
/// rather than panicking; the collection layer never produces them but
/// the raw API could.
#[must_use]
pub fn format_epoch_date(epoch_secs: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let secs = if epoch_secs.is_finite() {
        epoch_secs as i64
    } else {
        0
    };
    chrono::DateTime::from_timestamp(secs, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Item {
        Item {
            id: id.to_string(),
            kind: ItemKind::Post,
            subreddit: "rust".to_string(),
            title: "A title".to_string(),
            text: "some body".to_string(),
            author: "someone".to_string(),
            score: 3,
            upvote_ratio: 0.9,
            num_comments: 2,
            created_utc: 1_700_000_000.0,
            url: String::new(),
            search_term: "rust".to_string(),
            parent_id: String::new(),
            parent_title: String::new(),
            entities_mentioned: Vec::new(),
            sentiment: Sentiment::Neutral,
        }
    }

    #[test]
    fn dedup_key_distinguishes_kinds() {
        let p = post("abc");
        let mut c = post("abc");
        c.kind = ItemKind::Comment;
        assert_ne!(p.dedup_key(), c.dedup_key());
    }

    #[test]
    fn full_text_joins_title_and_body() {
        assert_eq!(post("x").full_text(), "A title some body");
    }

    #[test]
    fn unknown_created_utc_formats_as_epoch_date() {
        let mut p = post("x");
        p.created_utc = 0.0;
        assert_eq!(p.created_date(), "1970-01-01");
    }

    #[test]
    fn created_date_formats_real_timestamps() {
        assert_eq!(post("x").created_date(), "2023-11-14");
    }

    #[test]
    fn non_finite_epoch_falls_back_to_epoch_date() {
        assert_eq!(format_epoch_date(f64::NAN), "1970-01-01");
    }
}
