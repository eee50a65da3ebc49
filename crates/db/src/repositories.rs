pub mod counters;
pub mod schedule;
pub mod search_log;
