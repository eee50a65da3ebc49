//! # Advising Core
//!
//! Pure time logic for the advising slot tracker: parsing of stored schedule
//! strings, the global phase windows shown on the public timeline, the
//! per-student slot state machine and calendar event derivation.
//!
//! Nothing in this crate performs I/O. Every function takes "now" as an
//! argument, so results are reproducible for any instant.

pub mod calendar;
pub mod errors;
pub mod models;
pub mod phase_window;
pub mod state_machine;
pub mod time_parsing;
