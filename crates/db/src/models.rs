use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use advising_core::models::schedule::ScheduleRecord;

/// A `student_schedules` row. Slot times are stored as separate
/// `"8:32 AM"` style columns and dates as text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudentSchedule {
    pub student_id: String,
    pub probation_flag: bool,
    pub phase1_date: String,
    pub phase2_date: String,
    pub slot1_start_time: String,
    pub slot1_end_time: String,
    pub slot2_start_time: String,
    pub slot2_end_time: String,
}

impl From<DbStudentSchedule> for ScheduleRecord {
    fn from(row: DbStudentSchedule) -> Self {
        Self {
            student_id: row.student_id,
            probation_flag: row.probation_flag,
            phase1_date: row.phase1_date,
            phase2_date: row.phase2_date,
            slot1_range: format!("{} - {}", row.slot1_start_time, row.slot1_end_time),
            slot2_range: format!("{} - {}", row.slot2_start_time, row.slot2_end_time),
        }
    }
}

/// Payload of the `advising_search_analytics` change notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DbSearchAnalytics {
    pub total_searches: i64,
}
