use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::phase::{EventPhase, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub phase: EventPhase,
    pub slot: Slot,
    pub title: String,
    pub description: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub location: String,
}
