use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{AdvisingError, AdvisingResult};
use crate::models::phase::Slot;
use crate::time_parsing::{combine, parse_calendar_date, parse_time_range};

/// A student's advising record as stored by the lookup service.
///
/// Dates are either `YYYY-MM-DD` or `DD-Mon-YYYY`; slot ranges look like
/// `"8:32 AM - 8:52 AM"` and apply to both phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub student_id: String,
    pub probation_flag: bool,
    pub phase1_date: String,
    pub phase2_date: String,
    pub slot1_range: String,
    pub slot2_range: String,
}

/// A [`ScheduleRecord`] converted into absolute instants.
///
/// Slot instants are anchored to the phase 1 date. Invariant:
/// `slot1_start < slot1_end <= slot2_start < slot2_end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStudentSchedule {
    pub student_id: String,
    pub probation_flag: bool,
    pub phase1_date: NaiveDate,
    pub phase2_date: NaiveDate,
    pub slot1_label: String,
    pub slot2_label: String,
    pub slot1_start: DateTime<FixedOffset>,
    pub slot1_end: DateTime<FixedOffset>,
    pub slot2_start: DateTime<FixedOffset>,
    pub slot2_end: DateTime<FixedOffset>,
}

impl ResolvedStudentSchedule {
    /// Parses every stored string of `record` and anchors both slots to the
    /// phase 1 date in `offset`.
    ///
    /// # Errors
    ///
    /// * `AdvisingError::MalformedInput` - a date or range has an unknown shape,
    ///   or the slots are empty, reversed or overlapping
    pub fn resolve(record: &ScheduleRecord, offset: FixedOffset) -> AdvisingResult<Self> {
        let phase1_date = parse_calendar_date(&record.phase1_date)?;
        let phase2_date = parse_calendar_date(&record.phase2_date)?;
        let slot1 = parse_time_range(&record.slot1_range)?;
        let slot2 = parse_time_range(&record.slot2_range)?;

        let ordered = slot1.start < slot1.end && slot1.end <= slot2.start && slot2.start < slot2.end;
        if !ordered {
            return Err(AdvisingError::MalformedInput(format!(
                "Slots for student {} are not ordered: '{}' then '{}'",
                record.student_id, record.slot1_range, record.slot2_range
            )));
        }

        Ok(Self {
            student_id: record.student_id.clone(),
            probation_flag: record.probation_flag,
            phase1_date,
            phase2_date,
            slot1_label: record.slot1_range.trim().to_string(),
            slot2_label: record.slot2_range.trim().to_string(),
            slot1_start: combine(phase1_date, slot1.start, offset),
            slot1_end: combine(phase1_date, slot1.end, offset),
            slot2_start: combine(phase1_date, slot2.start, offset),
            slot2_end: combine(phase1_date, slot2.end, offset),
        })
    }

    pub fn offset(&self) -> FixedOffset {
        *self.slot1_start.offset()
    }

    /// Start and end of `slot` on the phase 1 date.
    pub fn slot(&self, slot: Slot) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        match slot {
            Slot::One => (self.slot1_start, self.slot1_end),
            Slot::Two => (self.slot2_start, self.slot2_end),
        }
    }

    pub fn slot_label(&self, slot: Slot) -> &str {
        match slot {
            Slot::One => &self.slot1_label,
            Slot::Two => &self.slot2_label,
        }
    }

    pub fn phase1_weekday(&self) -> String {
        self.phase1_date.format("%A").to_string()
    }

    pub fn phase1_date_label(&self) -> String {
        self.phase1_date.format("%b %-d, %Y").to_string()
    }

    pub fn phase2_weekday(&self) -> String {
        self.phase2_date.format("%A").to_string()
    }

    pub fn phase2_date_label(&self) -> String {
        self.phase2_date.format("%b %-d, %Y").to_string()
    }
}
