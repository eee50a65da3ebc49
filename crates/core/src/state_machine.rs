//! # Student Phase State Machine
//!
//! Resolves where a student stands in their advising day from the resolved
//! schedule and the current instant:
//!
//! ```text
//! WAITING_SLOT_1 -> SLOT_1_LIVE -> WAITING_SLOT_2 -> SLOT_2_LIVE -> ENDED
//! ```
//!
//! Every boundary is half-open: a state begins exactly at its start instant
//! and is left exactly at its end instant. The machine keeps no memory, so
//! resolving again for the same instant always gives the same answer.

use chrono::{DateTime, FixedOffset};

use crate::models::phase::{CountdownDuration, Slot, SlotStatus, StudentPhase, StudentPhaseState};
use crate::models::schedule::ResolvedStudentSchedule;
use crate::time_parsing::time_left;

pub fn resolve(schedule: &ResolvedStudentSchedule, now: DateTime<FixedOffset>) -> StudentPhaseState {
    let (phase, countdown_target) = if now < schedule.slot1_start {
        (StudentPhase::WaitingSlot1, Some(schedule.slot1_start))
    } else if now < schedule.slot1_end {
        (StudentPhase::Slot1Live, Some(schedule.slot1_end))
    } else if now < schedule.slot2_start {
        (StudentPhase::WaitingSlot2, Some(schedule.slot2_start))
    } else if now < schedule.slot2_end {
        (StudentPhase::Slot2Live, Some(schedule.slot2_end))
    } else {
        (StudentPhase::Ended, None)
    };

    StudentPhaseState {
        phase,
        countdown_target,
        countdown_label: phase.countdown_label(),
    }
}

/// Badge for `slot` while the student is in `phase`.
pub fn slot_status(phase: StudentPhase, slot: Slot) -> SlotStatus {
    match (slot, phase) {
        (Slot::One, StudentPhase::Slot1Live) => SlotStatus::Live,
        (Slot::One, StudentPhase::WaitingSlot2 | StudentPhase::Slot2Live | StudentPhase::Ended) => {
            SlotStatus::Passed
        }
        (Slot::Two, StudentPhase::Slot2Live) => SlotStatus::Live,
        (Slot::Two, StudentPhase::Ended) => SlotStatus::Passed,
        _ => SlotStatus::Upcoming,
    }
}

impl StudentPhaseState {
    /// Time left until the countdown target, all zero once advising ended.
    pub fn time_left(&self, now: DateTime<FixedOffset>) -> CountdownDuration {
        time_left(self.countdown_target, now)
    }
}
