use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AdvisingError, AdvisingResult};

/// Whole days, hours, minutes and seconds left until a target instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownDuration {
    pub fn total_seconds(&self) -> u64 {
        ((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }
}

/// An admin-defined registration window shown on the public timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub phase: u8,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl PhaseWindow {
    pub fn new(
        phase: u8,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> AdvisingResult<Self> {
        if start > end {
            return Err(AdvisingError::Validation(format!(
                "Phase {} starts at {} after it ends at {}",
                phase, start, end
            )));
        }

        Ok(Self { phase, start, end })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseWindowStatus {
    Upcoming { countdown: CountdownDuration },
    Live,
    Ended,
}

impl PhaseWindowStatus {
    pub fn countdown(&self) -> Option<CountdownDuration> {
        match self {
            PhaseWindowStatus::Upcoming { countdown } => Some(*countdown),
            PhaseWindowStatus::Live | PhaseWindowStatus::Ended => None,
        }
    }
}

/// The five time-ordered states of a student's advising day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StudentPhase {
    #[serde(rename = "WAITING_SLOT_1")]
    WaitingSlot1,
    #[serde(rename = "SLOT_1_LIVE")]
    Slot1Live,
    #[serde(rename = "WAITING_SLOT_2")]
    WaitingSlot2,
    #[serde(rename = "SLOT_2_LIVE")]
    Slot2Live,
    #[serde(rename = "ENDED")]
    Ended,
}

impl StudentPhase {
    pub const ALL: [StudentPhase; 5] = [
        StudentPhase::WaitingSlot1,
        StudentPhase::Slot1Live,
        StudentPhase::WaitingSlot2,
        StudentPhase::Slot2Live,
        StudentPhase::Ended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentPhase::WaitingSlot1 => "WAITING_SLOT_1",
            StudentPhase::Slot1Live => "SLOT_1_LIVE",
            StudentPhase::WaitingSlot2 => "WAITING_SLOT_2",
            StudentPhase::Slot2Live => "SLOT_2_LIVE",
            StudentPhase::Ended => "ENDED",
        }
    }

    pub fn countdown_label(&self) -> &'static str {
        match self {
            StudentPhase::WaitingSlot1 => "TIME UNTIL SLOT 1",
            StudentPhase::Slot1Live => "SLOT 1 ENDS IN",
            StudentPhase::WaitingSlot2 => "TIME UNTIL SLOT 2",
            StudentPhase::Slot2Live => "SLOT 2 ENDS IN",
            StudentPhase::Ended => "ADVISING ENDED",
        }
    }
}

impl fmt::Display for StudentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved state of a student at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentPhaseState {
    pub phase: StudentPhase,
    pub countdown_target: Option<DateTime<FixedOffset>>,
    pub countdown_label: &'static str,
}

/// Badge shown next to each slot in the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Upcoming,
    Live,
    Passed,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Upcoming => "UPCOMING",
            SlotStatus::Live => "LIVE",
            SlotStatus::Passed => "PASSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub fn number(&self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }
}

/// Advising phases that carry per-student slots. Phase 3 uses random slots
/// and has no calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventPhase {
    One,
    Two,
}

impl EventPhase {
    pub fn number(&self) -> u8 {
        match self {
            EventPhase::One => 1,
            EventPhase::Two => 2,
        }
    }
}
