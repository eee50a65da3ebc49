pub mod analytics;
pub mod calendar;
pub mod phase;
pub mod schedule;
pub mod student;
