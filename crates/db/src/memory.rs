//! Collaborators backed by a JSON file of schedule records, kept in memory.
//!
//! Search analytics live only for the lifetime of the process. Every
//! recorded search pushes the new total to all live subscribers.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use advising_core::errors::AdvisingResult;
use advising_core::models::analytics::{CounterUpdate, Counters};
use advising_core::models::schedule::ScheduleRecord;

use crate::services::{CountersFeed, ScheduleLookup, SearchLogging};

const UPDATE_BUFFER: usize = 64;

#[derive(Debug, Default)]
struct Analytics {
    total_searches: u64,
    found_ids: Vec<String>,
    subscribers: Vec<mpsc::Sender<CounterUpdate>>,
}

#[derive(Debug)]
pub struct InMemoryStore {
    records: HashMap<String, ScheduleRecord>,
    analytics: Mutex<Analytics>,
}

impl InMemoryStore {
    /// Later records win when two share a student id.
    pub fn new(records: Vec<ScheduleRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.student_id.clone(), record))
            .collect();

        Self {
            records,
            analytics: Mutex::new(Analytics::default()),
        }
    }

    /// Parses a JSON array of schedule records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ScheduleRecord> =
            serde_json::from_str(json).wrap_err("Invalid schedule records JSON")?;
        Ok(Self::new(records))
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read schedules file {}", path.display()))?;
        let store = Self::from_json_str(&json)
            .wrap_err_with(|| format!("Failed to load schedules file {}", path.display()))?;

        info!("Loaded {} schedule records from {}", store.records.len(), path.display());
        Ok(store)
    }
}

#[async_trait]
impl ScheduleLookup for InMemoryStore {
    async fn find_schedule(&self, student_id: &str) -> AdvisingResult<Option<ScheduleRecord>> {
        Ok(self.records.get(student_id).cloned())
    }

    async fn record_count(&self) -> AdvisingResult<u64> {
        Ok(self.records.len() as u64)
    }
}

#[async_trait]
impl SearchLogging for InMemoryStore {
    async fn record_search_attempt(&self, student_id: &str, found: bool) -> AdvisingResult<()> {
        let mut analytics = self.analytics.lock().await;
        analytics.total_searches += 1;
        if found {
            analytics.found_ids.push(student_id.to_string());
        }

        let update = CounterUpdate {
            total_searches: analytics.total_searches,
        };
        analytics.subscribers.retain(|subscriber| match subscriber.try_send(update) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("Counter subscriber lagging, update dropped");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });

        Ok(())
    }
}

#[async_trait]
impl CountersFeed for InMemoryStore {
    async fn fetch_initial_counters(&self) -> AdvisingResult<Counters> {
        let analytics = self.analytics.lock().await;
        let unique_found = analytics.found_ids.iter().collect::<HashSet<_>>().len() as u64;

        Ok(Counters {
            total_searches: analytics.total_searches,
            unique_found,
        })
    }

    async fn found_student_ids(&self) -> AdvisingResult<Vec<String>> {
        Ok(self.analytics.lock().await.found_ids.clone())
    }

    async fn subscribe(&self) -> AdvisingResult<mpsc::Receiver<CounterUpdate>> {
        let (tx, rx) = mpsc::channel(UPDATE_BUFFER);
        self.analytics.lock().await.subscribers.push(tx);
        Ok(rx)
    }
}
