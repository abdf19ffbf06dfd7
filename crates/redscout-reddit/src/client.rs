use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use redscout_core::{AppConfig, Item};

use crate::error::RedditError;
use crate::raw;

/// Where one search call looks: a single subreddit, or the site-wide
/// `all` pseudo-subreddit used by the supplementary pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    Subreddit(String),
    All,
}

impl SearchScope {
    /// The subreddit name as it appears in the search path (`all` for the
    /// site-wide scope).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            SearchScope::Subreddit(name) => name,
            SearchScope::All => "all",
        }
    }
}

impl std::fmt::Display for SearchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchScope::Subreddit(name) => write!(f, "r/{name}"),
            SearchScope::All => write!(f, "all"),
        }
    }
}

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client for the authenticated Reddit search API.
///
/// Construction performs the client-credentials token exchange; a failure
/// there is fatal for the run (no retrieval is possible without a token).
/// Individual API calls map non-2xx statuses to typed [`RedditError`]
/// variants; the collection session decides whether to continue past them.
pub struct RedditClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl RedditClient {
    /// Builds the HTTP client and exchanges client credentials for an
    /// access token.
    ///
    /// # Errors
    ///
    /// - [`RedditError::Http`] if the client cannot be constructed or the
    ///   token request fails at the network level.
    /// - [`RedditError::Auth`] if the token endpoint returns a non-2xx
    ///   status (bad credentials).
    /// - [`RedditError::Deserialize`] if the token response is malformed.
    pub async fn connect(config: &AppConfig) -> Result<Self, RedditError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.reddit_user_agent)
            .build()?;

        let token = fetch_token(&http, config).await?;

        Ok(Self {
            http,
            token,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the ordered items for one (scope, term) search: each post,
    /// immediately followed by up to `comment_limit` of its top-level
    /// comments in the API's native ordering.
    ///
    /// A failure fetching one post's comments is logged and that post
    /// contributes no comments; the post itself and the rest of the page
    /// are unaffected.
    ///
    /// # Errors
    ///
    /// - [`RedditError::Unauthorized`] — token rejected (401).
    /// - [`RedditError::NotFound`] — unknown subreddit (404).
    /// - [`RedditError::RateLimited`] — 429 with the server's retry hint.
    /// - [`RedditError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`RedditError::Http`] / [`RedditError::Deserialize`] — transport
    ///   or body-shape failure on the search call itself.
    pub async fn search_items(
        &self,
        scope: &SearchScope,
        term: &str,
        post_limit: u32,
        comment_limit: u32,
    ) -> Result<Vec<Item>, RedditError> {
        let listing = self
            .api_get(
                &format!("/r/{}/search", scope.name()),
                &[
                    ("q", term.to_string()),
                    ("restrict_sr", "true".to_string()),
                    ("sort", "relevance".to_string()),
                    ("limit", post_limit.to_string()),
                ],
            )
            .await?;

        let children = listing
            .get("data")
            .and_then(|d| d.get("children"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut items = Vec::new();
        for child in &children {
            let data = child.get("data").cloned().unwrap_or(Value::Null);
            let post = raw::post_item(&data, scope.name(), term);

            let comments = if post.id.is_empty() || comment_limit == 0 {
                Vec::new()
            } else {
                match self.fetch_comments(&post, comment_limit, term).await {
                    Ok(comments) => comments,
                    Err(e) => {
                        tracing::warn!(
                            post_id = %post.id,
                            error = %e,
                            "comment fetch failed; keeping post without comments"
                        );
                        Vec::new()
                    }
                }
            };

            items.push(post);
            items.extend(comments);
        }

        tracing::debug!(scope = %scope, term, items = items.len(), "search completed");
        Ok(items)
    }

    /// Fetches up to `limit` top-level comments for a post.
    ///
    /// The `/comments/{article}` response is a two-element array: the post
    /// listing, then the comment listing. Children that are not `t1`
    /// (e.g. `more` placeholders) or lack a body are skipped. Ordering is
    /// the API's native ordering; no resorting.
    async fn fetch_comments(
        &self,
        post: &Item,
        limit: u32,
        term: &str,
    ) -> Result<Vec<Item>, RedditError> {
        let value = self
            .api_get(
                &format!("/comments/{}", post.id),
                &[("limit", limit.to_string()), ("depth", "1".to_string())],
            )
            .await?;

        let children = value
            .get(1)
            .and_then(|l| l.get("data"))
            .and_then(|d| d.get("children"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut comments = Vec::new();
        for child in &children {
            if comments.len() >= limit as usize {
                break;
            }
            if child.get("kind").and_then(Value::as_str) != Some("t1") {
                continue;
            }
            let Some(data) = child.get("data") else {
                continue;
            };
            if data.get("body").and_then(Value::as_str).is_none() {
                continue;
            }
            comments.push(raw::comment_item(data, post, term));
        }

        Ok(comments)
    }

    async fn api_get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, RedditError> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RedditError::Unauthorized);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RedditError::NotFound { url });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(RedditError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(RedditError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RedditError::Deserialize {
            context: url,
            source: e,
        })
    }
}

async fn fetch_token(http: &reqwest::Client, config: &AppConfig) -> Result<String, RedditError> {
    let response = http
        .post(&config.token_url)
        .basic_auth(&config.reddit_client_id, Some(&config.reddit_client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RedditError::Auth {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| RedditError::Deserialize {
            context: config.token_url.clone(),
            source: e,
        })?;

    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_names() {
        assert_eq!(SearchScope::Subreddit("rust".to_string()).name(), "rust");
        assert_eq!(SearchScope::All.name(), "all");
    }

    #[test]
    fn scope_display_prefixes_subreddits() {
        assert_eq!(
            SearchScope::Subreddit("rust".to_string()).to_string(),
            "r/rust"
        );
        assert_eq!(SearchScope::All.to_string(), "all");
    }
}
