use async_trait::async_trait;
use mockall::mock;
use tokio::sync::mpsc;

use advising_core::errors::AdvisingResult;
use advising_core::models::analytics::{CounterUpdate, Counters};
use advising_core::models::schedule::ScheduleRecord;

use crate::services::{CountersFeed, ScheduleLookup, SearchLogging};

// Mock collaborators for testing
mock! {
    pub Lookup {}

    #[async_trait]
    impl ScheduleLookup for Lookup {
        async fn find_schedule(&self, student_id: &str) -> AdvisingResult<Option<ScheduleRecord>>;

        async fn record_count(&self) -> AdvisingResult<u64>;
    }
}

mock! {
    pub SearchLog {}

    #[async_trait]
    impl SearchLogging for SearchLog {
        async fn record_search_attempt(&self, student_id: &str, found: bool) -> AdvisingResult<()>;
    }
}

mock! {
    pub Feed {}

    #[async_trait]
    impl CountersFeed for Feed {
        async fn fetch_initial_counters(&self) -> AdvisingResult<Counters>;

        async fn found_student_ids(&self) -> AdvisingResult<Vec<String>>;

        async fn subscribe(&self) -> AdvisingResult<mpsc::Receiver<CounterUpdate>>;
    }
}
