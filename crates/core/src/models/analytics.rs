use serde::{Deserialize, Serialize};

/// Public search counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub total_searches: u64,
    pub unique_found: u64,
}

/// A pushed snapshot of the analytics row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterUpdate {
    pub total_searches: u64,
}
