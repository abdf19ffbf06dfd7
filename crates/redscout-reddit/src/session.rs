//! Collection session: drives retrieval across the full subreddit × term
//! cross-product, owning the global dedup set and the pacing policy.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use redscout_core::{DedupKey, Item, ResearchConfig};

use crate::client::{RedditClient, SearchScope};
use crate::error::RedditError;
use crate::pacer::Pacer;

/// The supplementary all-Reddit pass only searches the first 5 terms;
/// later terms are skipped entirely. A fixed cutoff, not a configurable
/// policy.
pub const ALL_PASS_TERM_CAP: usize = 5;

/// Emitted after each search call. Consumption is optional and has no
/// feedback effect on the session.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Display form of the searched scope (`r/name` or `all`).
    pub scope: String,
    pub term: String,
    /// Items from this call that were not already in the collection.
    pub new_items: usize,
}

/// Future returned by a session fetcher, borrowing the client for `'a`.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Item>, RedditError>> + 'a>>;

/// Session-owned dedup state: the seen-key set and the append-only item
/// collection. Constructed per run and never shared.
#[derive(Debug, Default)]
pub struct CollectSession {
    seen: HashSet<DedupKey>,
    items: Vec<Item>,
}

impl CollectSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the unseen items of `batch` and returns how many were new.
    ///
    /// First-seen wins: a re-delivered `(id, kind)` is discarded, keeping
    /// the already-recorded item and its `search_term` attribution.
    pub fn absorb(&mut self, batch: Vec<Item>) -> usize {
        let mut new_items = 0;
        for item in batch {
            if self.seen.insert(item.dedup_key()) {
                self.items.push(item);
                new_items += 1;
            }
        }
        new_items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

/// Runs the full collection: every subreddit × term pair in
/// subreddit-major order, then (when enabled) the supplementary
/// all-Reddit pass over the first [`ALL_PASS_TERM_CAP`] terms with its
/// own post limit, all against one dedup set and one pacer.
///
/// A failed search call is logged and contributes zero items; the run
/// continues with the next pair. The caller treats an empty final
/// collection as its own terminal condition.
///
/// Generic over the client and fetcher so tests can script retrieval
/// without a network; [`collect_items`] supplies the real fetcher.
pub async fn run_collection<C, F, P>(
    client: &C,
    config: &ResearchConfig,
    pacer: &mut Pacer,
    fetch: F,
    mut on_progress: P,
) -> Vec<Item>
where
    F: for<'a> Fn(&'a C, SearchScope, String, u32, u32) -> FetchFuture<'a>,
    P: FnMut(&ProgressEvent),
{
    let mut session = CollectSession::new();

    let total = config.subreddits.len() * config.search_terms.len();
    tracing::info!(combinations = total, "starting subreddit searches");

    for subreddit in &config.subreddits {
        for term in &config.search_terms {
            let scope = SearchScope::Subreddit(subreddit.clone());
            let new_items = run_one(
                client,
                &fetch,
                &mut session,
                pacer,
                scope,
                term,
                config.limits.posts,
                config.limits.comments,
            )
            .await;
            on_progress(&ProgressEvent {
                scope: format!("r/{subreddit}"),
                term: term.clone(),
                new_items,
            });
        }
    }

    if config.include_all_reddit {
        tracing::info!("starting all-Reddit pass");
        for term in config.search_terms.iter().take(ALL_PASS_TERM_CAP) {
            let new_items = run_one(
                client,
                &fetch,
                &mut session,
                pacer,
                SearchScope::All,
                term,
                config.all_reddit_limit,
                config.limits.comments,
            )
            .await;
            on_progress(&ProgressEvent {
                scope: "all".to_string(),
                term: term.clone(),
                new_items,
            });
        }
    }

    session.into_items()
}

#[allow(clippy::too_many_arguments)]
async fn run_one<C, F>(
    client: &C,
    fetch: &F,
    session: &mut CollectSession,
    pacer: &mut Pacer,
    scope: SearchScope,
    term: &str,
    post_limit: u32,
    comment_limit: u32,
) -> usize
where
    F: for<'a> Fn(&'a C, SearchScope, String, u32, u32) -> FetchFuture<'a>,
{
    pacer.pace().await;

    let scope_label = scope.to_string();
    let batch = match fetch(client, scope, term.to_string(), post_limit, comment_limit).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(
                scope = %scope_label,
                term,
                error = %e,
                "search failed; continuing with next pair"
            );
            Vec::new()
        }
    };

    let new_items = session.absorb(batch);
    tracing::debug!(scope = %scope_label, term, new_items, "search absorbed");
    new_items
}

/// Collects all items for `config` using the real Reddit client.
pub async fn collect_items<P>(
    client: &RedditClient,
    config: &ResearchConfig,
    pacer: &mut Pacer,
    on_progress: P,
) -> Vec<Item>
where
    P: FnMut(&ProgressEvent),
{
    run_collection(client, config, pacer, real_fetch, on_progress).await
}

fn real_fetch(
    client: &RedditClient,
    scope: SearchScope,
    term: String,
    post_limit: u32,
    comment_limit: u32,
) -> FetchFuture<'_> {
    Box::pin(async move {
        client
            .search_items(&scope, &term, post_limit, comment_limit)
            .await
    })
}
