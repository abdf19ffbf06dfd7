//! Defensive field extraction over raw listing JSON.
//!
//! Listing children for removed, edited, or rate-limited content can be
//! missing any field, carry `null`, or carry the wrong JSON type, so
//! items are built through total accessors: each one resolves a failed
//! read to its documented default instead of erroring. An unparseable
//! child therefore degrades to a mostly-empty [`Item`] rather than
//! aborting the search that found it.

use serde_json::Value;

use redscout_core::{Item, ItemKind, Sentiment, DELETED_AUTHOR};

/// String field, or `default` when absent, null, or not a string.
#[must_use]
pub fn str_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map_or_else(|| default.to_string(), str::to_string)
}

/// Integer field, or `default` when absent, null, or not an integer.
#[must_use]
pub fn i64_or(value: &Value, key: &str, default: i64) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(default)
}

/// Unsigned integer field, or `default` when absent, null, or negative.
#[must_use]
pub fn u64_or(value: &Value, key: &str, default: u64) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(default)
}

/// Numeric field as `f64`, or `default` when absent, null, or not a number.
#[must_use]
pub fn f64_or(value: &Value, key: &str, default: f64) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Author name, or [`DELETED_AUTHOR`] when the field is absent, null, or
/// empty (deleted and suspended accounts).
#[must_use]
pub fn author_or_deleted(value: &Value) -> String {
    match value.get("author").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DELETED_AUTHOR.to_string(),
    }
}

/// Full post URL from the `permalink` field, or empty when absent.
#[must_use]
pub fn post_url(value: &Value) -> String {
    match value.get("permalink").and_then(Value::as_str) {
        Some(permalink) if !permalink.is_empty() => format!("https://reddit.com{permalink}"),
        _ => String::new(),
    }
}

/// Builds a post [`Item`] from a `t3` listing child's `data` object.
///
/// `fallback_subreddit` fills in when the child does not carry its own
/// subreddit name (the scope we searched is the best remaining guess).
#[must_use]
pub fn post_item(data: &Value, fallback_subreddit: &str, search_term: &str) -> Item {
    Item {
        id: str_or(data, "id", ""),
        kind: ItemKind::Post,
        subreddit: str_or(data, "subreddit", fallback_subreddit),
        title: str_or(data, "title", ""),
        text: str_or(data, "selftext", ""),
        author: author_or_deleted(data),
        score: i64_or(data, "score", 0),
        upvote_ratio: f64_or(data, "upvote_ratio", 0.0),
        num_comments: u64_or(data, "num_comments", 0),
        created_utc: f64_or(data, "created_utc", 0.0),
        url: post_url(data),
        search_term: search_term.to_string(),
        parent_id: String::new(),
        parent_title: String::new(),
        entities_mentioned: Vec::new(),
        sentiment: Sentiment::Neutral,
    }
}

/// Builds a comment [`Item`] from a `t1` listing child's `data` object,
/// linked back to its parent post.
#[must_use]
pub fn comment_item(data: &Value, parent: &Item, search_term: &str) -> Item {
    let id = str_or(data, "id", "");
    let url = if parent.url.is_empty() || id.is_empty() {
        String::new()
    } else {
        format!("{}{}", parent.url, id)
    };
    Item {
        id,
        kind: ItemKind::Comment,
        subreddit: parent.subreddit.clone(),
        title: String::new(),
        text: str_or(data, "body", ""),
        author: author_or_deleted(data),
        score: i64_or(data, "score", 0),
        upvote_ratio: 0.0,
        num_comments: 0,
        created_utc: f64_or(data, "created_utc", 0.0),
        url,
        search_term: search_term.to_string(),
        parent_id: parent.id.clone(),
        parent_title: parent.title.clone(),
        entities_mentioned: Vec::new(),
        sentiment: Sentiment::Neutral,
    }
}
