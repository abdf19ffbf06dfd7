//! Minimum-interval gate between outbound search calls.

use std::time::Duration;

use tokio::time::Instant;

/// Paces a sequence of calls so that consecutive calls start at least
/// `min_interval` apart. The first call never waits. The pacing policy is
/// a value the session consults, so it can be swapped (e.g. for adaptive
/// backoff) without touching the driving loop.
#[derive(Debug)]
pub struct Pacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Waits until at least `min_interval` has elapsed since the previous
    /// `pace` returned, then records the new mark.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        self.last = Some(Instant::now());
    }
}
