//! Collaborator interfaces of the advising display.
//!
//! Implementations map transport failures to `AdvisingError::Connection`
//! and analytics write failures to `AdvisingError::Analytics`. A missing
//! student record is `Ok(None)`, never an error.

use async_trait::async_trait;
use tokio::sync::mpsc;

use advising_core::errors::AdvisingResult;
use advising_core::models::analytics::{CounterUpdate, Counters};
use advising_core::models::schedule::ScheduleRecord;

#[async_trait]
pub trait ScheduleLookup: Send + Sync {
    async fn find_schedule(&self, student_id: &str) -> AdvisingResult<Option<ScheduleRecord>>;

    /// Number of stored student records, shown by the connection indicator.
    async fn record_count(&self) -> AdvisingResult<u64>;
}

#[async_trait]
pub trait SearchLogging: Send + Sync {
    /// Records one lookup attempt and bumps the matching counter.
    async fn record_search_attempt(&self, student_id: &str, found: bool) -> AdvisingResult<()>;
}

#[async_trait]
pub trait CountersFeed: Send + Sync {
    async fn fetch_initial_counters(&self) -> AdvisingResult<Counters>;

    /// Student ids of every search that found a record, duplicates included.
    async fn found_student_ids(&self) -> AdvisingResult<Vec<String>>;

    /// Push updates of the analytics row. Delivery is at least once and
    /// unordered; the channel closes when the feed goes away.
    async fn subscribe(&self) -> AdvisingResult<mpsc::Receiver<CounterUpdate>>;
}
