use advising_core::models::schedule::ScheduleRecord;
use advising_db::models::{DbSearchAnalytics, DbStudentSchedule};
use pretty_assertions::assert_eq;

#[test]
fn test_row_joins_slot_columns_into_ranges() {
    let row = DbStudentSchedule {
        student_id: "2212345".to_string(),
        probation_flag: true,
        phase1_date: "2026-01-12".to_string(),
        phase2_date: "2026-01-14".to_string(),
        slot1_start_time: "8:32 AM".to_string(),
        slot1_end_time: "8:52 AM".to_string(),
        slot2_start_time: "9:40 AM".to_string(),
        slot2_end_time: "10:00 AM".to_string(),
    };

    let record = ScheduleRecord::from(row);

    assert_eq!(
        record,
        ScheduleRecord {
            student_id: "2212345".to_string(),
            probation_flag: true,
            phase1_date: "2026-01-12".to_string(),
            phase2_date: "2026-01-14".to_string(),
            slot1_range: "8:32 AM - 8:52 AM".to_string(),
            slot2_range: "9:40 AM - 10:00 AM".to_string(),
        }
    );
}

#[test]
fn test_analytics_notification_payload() {
    let row: DbSearchAnalytics = serde_json::from_str(r#"{"total_searches": 17}"#).unwrap();

    assert_eq!(row.total_searches, 17);
}
