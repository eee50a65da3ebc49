use advising_core::{
    errors::AdvisingError,
    models::analytics::{CounterUpdate, Counters},
    models::phase::{CountdownDuration, PhaseWindowStatus, SlotStatus, StudentPhase},
    models::schedule::ScheduleRecord,
    models::student::{StudentId, STUDENT_ID_LEN},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

#[test]
fn test_schedule_record_serialization() {
    let value = json!({
        "student_id": "2212345",
        "probation_flag": true,
        "phase1_date": "12-Jan-2026",
        "phase2_date": "14-Jan-2026",
        "slot1_range": "8:32 AM - 8:52 AM",
        "slot2_range": "9:40 AM - 10:00 AM"
    });

    let record: ScheduleRecord = serde_json::from_value(value.clone()).unwrap();

    assert_eq!(record.student_id, "2212345");
    assert!(record.probation_flag);
    assert_eq!(serde_json::to_value(&record).unwrap(), value);
}

#[test]
fn test_phase_window_status_serialization() {
    let upcoming = PhaseWindowStatus::Upcoming {
        countdown: CountdownDuration {
            days: 1,
            hours: 2,
            minutes: 3,
            seconds: 4,
        },
    };

    assert_eq!(
        serde_json::to_value(upcoming).unwrap(),
        json!({
            "status": "upcoming",
            "countdown": { "days": 1, "hours": 2, "minutes": 3, "seconds": 4 }
        })
    );
    assert_eq!(
        serde_json::to_value(PhaseWindowStatus::Live).unwrap(),
        json!({ "status": "live" })
    );
}

#[rstest]
#[case(StudentPhase::WaitingSlot1, "WAITING_SLOT_1")]
#[case(StudentPhase::Slot1Live, "SLOT_1_LIVE")]
#[case(StudentPhase::WaitingSlot2, "WAITING_SLOT_2")]
#[case(StudentPhase::Slot2Live, "SLOT_2_LIVE")]
#[case(StudentPhase::Ended, "ENDED")]
fn test_student_phase_names(#[case] phase: StudentPhase, #[case] name: &str) {
    assert_eq!(phase.as_str(), name);
    assert_eq!(phase.to_string(), name);
    assert_eq!(serde_json::to_value(phase).unwrap(), json!(name));
}

#[test]
fn test_student_phases_are_ordered() {
    let mut sorted = StudentPhase::ALL;
    sorted.sort();

    assert_eq!(sorted, StudentPhase::ALL);
    assert_eq!(
        serde_json::to_value(SlotStatus::Passed).unwrap(),
        json!("PASSED")
    );
}

#[test]
fn test_countdown_total_seconds() {
    let countdown = CountdownDuration {
        days: 1,
        hours: 1,
        minutes: 1,
        seconds: 1,
    };

    assert_eq!(countdown.total_seconds(), 90_061);
    assert!(!countdown.is_zero());
    assert!(CountdownDuration::default().is_zero());
}

#[rstest]
#[case("2212345", true)]
#[case("221-2345", true)]
#[case(" 22 12 345 ", true)]
#[case("221234", false)]
#[case("22123456", false)]
#[case("abcdefg", false)]
fn test_student_id_completeness(#[case] input: &str, #[case] complete: bool) {
    assert_eq!(StudentId::is_complete(input), complete);
}

#[test]
fn test_student_id_parse() {
    let id = StudentId::parse("221-2345").unwrap();

    assert_eq!(id.as_str(), "2212345");
    assert_eq!(id.as_str().len(), STUDENT_ID_LEN);
    assert_eq!(StudentId::sanitize("a1b2c3"), "123");
    assert!(matches!(
        StudentId::parse("12345"),
        Err(AdvisingError::Validation(_))
    ));
}

#[test]
fn test_student_id_serde_validates() {
    let id: StudentId = serde_json::from_value(json!("2212345")).unwrap();
    assert_eq!(serde_json::to_value(&id).unwrap(), json!("2212345"));

    assert!(serde_json::from_value::<StudentId>(json!("12")).is_err());
}

#[test]
fn test_counter_payloads() {
    let update: CounterUpdate = serde_json::from_str(r#"{"total_searches": 42}"#).unwrap();
    assert_eq!(update.total_searches, 42);

    assert_eq!(
        serde_json::to_value(Counters::default()).unwrap(),
        json!({ "total_searches": 0, "unique_found": 0 })
    );
}
