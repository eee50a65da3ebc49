use advising_core::{
    errors::AdvisingError,
    models::phase::CountdownDuration,
    time_parsing::{
        combine, decompose, parse_calendar_date, parse_calendar_date_or_now, parse_clock_time,
        parse_time_range, time_left, time_until,
    },
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn campus_offset() -> FixedOffset {
    FixedOffset::east_opt(6 * 3600).unwrap()
}

fn at(text: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(text).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[rstest]
#[case("12:00 AM", 0, 0)]
#[case("12:00 PM", 12, 0)]
#[case("1:00 PM", 13, 0)]
#[case("1:05 PM", 13, 5)]
#[case("11:59 PM", 23, 59)]
#[case("6:30 AM", 6, 30)]
#[case("12:30 AM", 0, 30)]
#[case("  8:32 AM ", 8, 32)]
#[case("14:30", 14, 30)]
fn test_parse_clock_time(#[case] text: &str, #[case] hour: u32, #[case] minute: u32) {
    assert_eq!(parse_clock_time(text).unwrap(), hm(hour, minute));
}

#[rstest]
#[case("")]
#[case("8.32 AM")]
#[case("8:32 am")]
#[case("13:00 PM")]
#[case("13:00 AM")]
#[case("4294967295:00 PM")]
#[case("8:61 AM")]
#[case("8:32 AM sharp")]
#[case("eight:32 AM")]
fn test_parse_clock_time_rejects_malformed(#[case] text: &str) {
    let err = parse_clock_time(text).unwrap_err();
    assert!(matches!(err, AdvisingError::MalformedInput(_)), "{text}: {err}");
}

#[rstest]
#[case("2026-01-12", 2026, 1, 12)]
#[case("12-Jan-2026", 2026, 1, 12)]
#[case("1-Feb-2026", 2026, 2, 1)]
#[case("05-Dec-2025", 2025, 12, 5)]
#[case(" 2026-01-14 ", 2026, 1, 14)]
fn test_parse_calendar_date(
    #[case] text: &str,
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
) {
    assert_eq!(
        parse_calendar_date(text).unwrap(),
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    );
}

#[rstest]
#[case("")]
#[case("12-jan-2026")]
#[case("12-January-2026")]
#[case("2026/01/12")]
#[case("31-Feb-2026")]
#[case("Jan 12 2026")]
#[case("12-Jan")]
fn test_parse_calendar_date_rejects_malformed(#[case] text: &str) {
    let err = parse_calendar_date(text).unwrap_err();
    assert!(matches!(err, AdvisingError::MalformedInput(_)), "{text}: {err}");
}

#[test]
fn test_lenient_date_parsing_returns_midnight() {
    let now = at("2026-01-10T15:45:12+06:00");

    assert_eq!(
        parse_calendar_date_or_now("14-Jan-2026", now),
        at("2026-01-14T00:00:00+06:00")
    );
}

#[test]
fn test_lenient_date_parsing_falls_back_to_now() {
    let now = at("2026-01-10T15:45:12+06:00");

    assert_eq!(parse_calendar_date_or_now("not a date", now), now);
}

#[test]
fn test_parse_time_range() {
    let range = parse_time_range("8:32 AM - 8:52 AM").unwrap();
    assert_eq!(range.start, hm(8, 32));
    assert_eq!(range.end, hm(8, 52));

    let range = parse_time_range("11:40 AM - 12:00 PM").unwrap();
    assert_eq!(range.start, hm(11, 40));
    assert_eq!(range.end, hm(12, 0));
}

#[rstest]
#[case("8:32 AM-8:52 AM")]
#[case("8:32 AM")]
#[case("8:32 AM - late")]
fn test_parse_time_range_rejects_malformed(#[case] text: &str) {
    assert!(matches!(
        parse_time_range(text),
        Err(AdvisingError::MalformedInput(_))
    ));
}

#[test]
fn test_combine_zeroes_seconds() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
    let time = NaiveTime::from_hms_milli_opt(8, 32, 45, 500).unwrap();

    let instant = combine(date, time, campus_offset());

    assert_eq!(instant, at("2026-01-12T08:32:00+06:00"));
    assert_eq!(instant, at("2026-01-12T02:32:00Z"));
    assert_eq!(*instant.offset(), campus_offset());
}

#[test]
fn test_decompose_splits_units() {
    // 1 day, 1 hour, 1 minute, 1.999 seconds
    assert_eq!(
        decompose(90_061_999),
        CountdownDuration {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1,
        }
    );
}

#[rstest]
#[case(-1)]
#[case(-86_400_000)]
#[case(0)]
fn test_decompose_clamps_to_zero(#[case] millis: i64) {
    assert_eq!(decompose(millis), CountdownDuration::default());
}

#[rstest]
#[case(999)]
#[case(1_000)]
#[case(59_999)]
#[case(3_600_000)]
#[case(86_399_999)]
#[case(86_400_000)]
#[case(1_234_567_890)]
fn test_decompose_recomposes_to_whole_seconds(#[case] millis: i64) {
    let countdown = decompose(millis);

    let recomposed =
        ((((countdown.days * 24 + countdown.hours) * 60 + countdown.minutes) * 60)
            + countdown.seconds)
            * 1000;

    assert_eq!(recomposed as i64, millis - millis % 1000);
    assert!(countdown.hours < 24 && countdown.minutes < 60 && countdown.seconds < 60);
}

#[test]
fn test_time_until_and_time_left() {
    let now = at("2026-01-11T08:00:00+06:00");
    let target = at("2026-01-12T08:32:00+06:00");

    assert_eq!(
        time_until(target, now),
        CountdownDuration {
            days: 1,
            hours: 0,
            minutes: 32,
            seconds: 0,
        }
    );
    assert_eq!(time_until(now, target), CountdownDuration::default());
    assert_eq!(time_left(None, now), CountdownDuration::default());
    assert_eq!(time_left(Some(target), now), time_until(target, now));
}
