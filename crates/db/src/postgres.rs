//! Postgres-backed collaborators.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use advising_core::errors::{AdvisingError, AdvisingResult};
use advising_core::models::analytics::{CounterUpdate, Counters};
use advising_core::models::schedule::ScheduleRecord;

use crate::models::DbSearchAnalytics;
use crate::repositories::{counters, schedule, search_log};
use crate::services::{CountersFeed, ScheduleLookup, SearchLogging};
use crate::DbPool;

const UPDATE_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl ScheduleLookup for PgStore {
    async fn find_schedule(&self, student_id: &str) -> AdvisingResult<Option<ScheduleRecord>> {
        let row = schedule::get_schedule_by_student_id(&self.pool, student_id).await?;
        Ok(row.map(ScheduleRecord::from))
    }

    async fn record_count(&self) -> AdvisingResult<u64> {
        let count = schedule::count_schedules(&self.pool).await?;
        Ok(non_negative(count))
    }
}

#[async_trait]
impl SearchLogging for PgStore {
    async fn record_search_attempt(&self, student_id: &str, found: bool) -> AdvisingResult<()> {
        search_log::log_search(&self.pool, student_id, found)
            .await
            .map_err(|e| AdvisingError::Analytics(e.to_string()))?;
        search_log::increment_search_counter(&self.pool, found)
            .await
            .map_err(|e| AdvisingError::Analytics(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CountersFeed for PgStore {
    async fn fetch_initial_counters(&self) -> AdvisingResult<Counters> {
        let total_searches = counters::get_total_searches(&self.pool).await?;
        let found_ids = counters::get_found_student_ids(&self.pool).await?;
        let unique_found = found_ids.iter().collect::<HashSet<_>>().len() as u64;

        Ok(Counters {
            total_searches: non_negative(total_searches),
            unique_found,
        })
    }

    async fn found_student_ids(&self) -> AdvisingResult<Vec<String>> {
        Ok(counters::get_found_student_ids(&self.pool).await?)
    }

    async fn subscribe(&self) -> AdvisingResult<mpsc::Receiver<CounterUpdate>> {
        let mut listener = counters::listen_for_analytics(&self.pool).await?;
        let (tx, rx) = mpsc::channel(UPDATE_BUFFER);

        tokio::spawn(async move {
            loop {
                let notification = match listener.recv().await {
                    Ok(notification) => notification,
                    Err(e) => {
                        warn!("Analytics listener stopped: {}", e);
                        break;
                    }
                };

                let row = match serde_json::from_str::<DbSearchAnalytics>(notification.payload()) {
                    Ok(row) => row,
                    Err(e) => {
                        debug!("Skipping analytics notification: {}", e);
                        continue;
                    }
                };

                let update = CounterUpdate {
                    total_searches: non_negative(row.total_searches),
                };
                if tx.send(update).await.is_err() {
                    debug!("Counter subscriber dropped, closing listener");
                    break;
                }
            }
        });

        Ok(rx)
    }
}
