use std::collections::HashMap;
use std::path::PathBuf;

use advising_display::config::{parse_utc_offset, DataSource, DisplayConfig};
use chrono::{DateTime, FixedOffset};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<DisplayConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    DisplayConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_with_schedules_file() {
    let config = config_from(&[("ADVISING_SCHEDULES_FILE", "schedules.json")]).unwrap();

    assert_eq!(
        config.data_source,
        DataSource::JsonFile {
            path: PathBuf::from("schedules.json"),
        }
    );
    assert_eq!(config.utc_offset, FixedOffset::east_opt(6 * 3600).unwrap());
    assert_eq!(config.student_id, None);
    assert_eq!(config.log_level, Level::INFO);

    let phases: Vec<u8> = config.phase_windows.iter().map(|w| w.phase).collect();
    assert_eq!(phases, vec![1, 2, 3]);
    assert_eq!(
        config.phase_windows[0].start,
        DateTime::parse_from_rfc3339("2026-01-12T08:32:00+06:00").unwrap()
    );
    assert_eq!(
        config.phase_windows[2].end,
        DateTime::parse_from_rfc3339("2026-01-19T17:59:59Z").unwrap()
    );
}

#[test]
fn test_database_url_takes_precedence() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/advising"),
        ("ADVISING_SCHEDULES_FILE", "schedules.json"),
        ("ADVISING_STUDENT_ID", "221-2345"),
        ("LOG_LEVEL", "debug"),
    ])
    .unwrap();

    assert_eq!(
        config.data_source,
        DataSource::Postgres {
            database_url: "postgres://localhost/advising".to_string(),
        }
    );
    assert_eq!(config.student_id.unwrap().as_str(), "2212345");
    assert_eq!(config.log_level, Level::DEBUG);
}

#[test]
fn test_phase_override() {
    let config = config_from(&[
        ("ADVISING_SCHEDULES_FILE", "schedules.json"),
        ("PHASE2_START", "2026-02-01T03:00:00Z"),
        ("PHASE2_END", "2026-02-02T03:00:00Z"),
    ])
    .unwrap();

    assert_eq!(
        config.phase_windows[1].start,
        DateTime::parse_from_rfc3339("2026-02-01T03:00:00Z").unwrap()
    );
    assert_eq!(
        config.phase_windows[0].start,
        DateTime::parse_from_rfc3339("2026-01-12T02:32:00Z").unwrap()
    );
}

#[rstest]
#[case(&[])]
#[case(&[("ADVISING_SCHEDULES_FILE", "s.json"), ("ADVISING_UTC_OFFSET", "6")])]
#[case(&[("ADVISING_SCHEDULES_FILE", "s.json"), ("ADVISING_STUDENT_ID", "123")])]
#[case(&[("ADVISING_SCHEDULES_FILE", "s.json"), ("PHASE1_START", "tomorrow")])]
#[case(&[("ADVISING_SCHEDULES_FILE", "s.json"), ("PHASE3_START", "2026-02-01T00:00:00Z")])]
fn test_invalid_configuration(#[case] vars: &[(&str, &str)]) {
    assert!(config_from(vars).is_err());
}

#[rstest]
#[case("+06:00", 6 * 3600)]
#[case("-05:30", -(5 * 3600 + 30 * 60))]
#[case("+00:00", 0)]
#[case("Z", 0)]
fn test_parse_utc_offset(#[case] text: &str, #[case] seconds: i32) {
    assert_eq!(
        parse_utc_offset(text).unwrap(),
        FixedOffset::east_opt(seconds).unwrap()
    );
}

#[rstest]
#[case("06:00")]
#[case("+6")]
#[case("+06:75")]
#[case("+30:00")]
fn test_parse_utc_offset_rejects_malformed(#[case] text: &str) {
    assert!(parse_utc_offset(text).is_err());
}
