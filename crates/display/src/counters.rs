//! Public search counters kept current from the analytics push feed.
//!
//! Updates may arrive twice or out of order. The total only ever grows to
//! the largest value seen, and the unique count is re-derived from the full
//! list of found searches instead of being adjusted incrementally.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use advising_core::errors::AdvisingResult;
use advising_core::models::analytics::{CounterUpdate, Counters};
use advising_db::services::{CountersFeed, ScheduleLookup};

#[derive(Debug)]
pub struct CountersTracker {
    counters: watch::Sender<Counters>,
}

impl Default for CountersTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CountersTracker {
    pub fn new() -> Self {
        let (counters, _) = watch::channel(Counters::default());
        Self { counters }
    }

    pub fn subscribe(&self) -> watch::Receiver<Counters> {
        self.counters.subscribe()
    }

    pub fn current(&self) -> Counters {
        *self.counters.borrow()
    }

    pub async fn load_initial(&self, feed: &dyn CountersFeed) -> AdvisingResult<Counters> {
        let counters = feed.fetch_initial_counters().await?;
        self.counters.send_replace(counters);
        Ok(counters)
    }

    /// Folds one pushed update into the counters and returns the result.
    pub async fn apply_update(&self, feed: &dyn CountersFeed, update: CounterUpdate) -> Counters {
        let unique_found = match feed.found_student_ids().await {
            Ok(ids) => Some(ids.iter().collect::<HashSet<_>>().len() as u64),
            Err(e) => {
                debug!("Error fetching unique IDs: {}", e);
                None
            }
        };

        self.counters.send_if_modified(|counters| {
            let next = Counters {
                total_searches: counters.total_searches.max(update.total_searches),
                unique_found: unique_found.unwrap_or(counters.unique_found),
            };
            if next == *counters {
                return false;
            }
            *counters = next;
            true
        });

        self.current()
    }

    /// Consumes the push feed until `cancel` fires or the feed closes.
    pub async fn run(
        &self,
        feed: Arc<dyn CountersFeed>,
        cancel: CancellationToken,
    ) -> AdvisingResult<()> {
        let mut updates = feed.subscribe().await?;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Counters feed shutting down");
                    break;
                }
                update = updates.recv() => match update {
                    Some(update) => {
                        let counters = self.apply_update(feed.as_ref(), update).await;
                        debug!(
                            "Counters now {} searches, {} unique students found",
                            counters.total_searches, counters.unique_found
                        );
                    }
                    None => {
                        warn!("Counters feed closed");
                        break;
                    }
                },
            }
        }

        Ok(())
    }
}

/// State of the connection indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStatus {
    Checking,
    Connected { total_students: u64 },
    Error,
}

pub async fn check_database_status(lookup: &dyn ScheduleLookup) -> DbStatus {
    match lookup.record_count().await {
        Ok(total_students) => DbStatus::Connected { total_students },
        Err(e) => {
            warn!("Database connection error: {}", e);
            DbStatus::Error
        }
    }
}
