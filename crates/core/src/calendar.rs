//! # Calendar Events
//!
//! Builds a calendar event for one (phase, slot) selection of a resolved
//! schedule and exports it as an iCalendar document or as a deep link into
//! Google, Outlook or Yahoo calendars.
//!
//! Phase 2 reuses the slot times of phase 1 on its own date. Each endpoint is
//! re-anchored separately from its clock time, never shifted by a day count.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::models::calendar::CalendarEvent;
use crate::models::phase::{EventPhase, Slot};
use crate::models::schedule::ResolvedStudentSchedule;
use crate::time_parsing::combine;

pub const EVENT_LOCATION: &str = "NSU Portal - rds3.northsouth.edu";

const ICS_PRODUCT_ID: &str = "-//NSU Nexus//Advising Slot//EN";
const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render?action=TEMPLATE";
const OUTLOOK_CALENDAR_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";
const YAHOO_CALENDAR_URL: &str = "https://calendar.yahoo.com/?v=60";

/// Reminders attached to exported events, in minutes before the start.
const REMINDER_MINUTES: [u32; 2] = [1, 5];

/// Derives the event for `phase` and `slot`.
///
/// Returns `None` when no schedule has been resolved; callers treat that as
/// a no-op.
pub fn derive(
    schedule: Option<&ResolvedStudentSchedule>,
    phase: EventPhase,
    slot: Slot,
) -> Option<CalendarEvent> {
    let schedule = schedule?;
    let (base_start, base_end) = schedule.slot(slot);

    let (start, end) = match phase {
        EventPhase::One => (base_start, base_end),
        EventPhase::Two => (
            reanchor(base_start, schedule),
            reanchor(base_end, schedule),
        ),
    };

    Some(CalendarEvent {
        phase,
        slot,
        title: format!("NSU Advising - Phase {} Slot {}", phase.number(), slot.number()),
        description: format!(
            "Student ID: {}\nSlot Time: {}\nPhase {} Advising\n\nDon't forget to log in to NSU Portal!",
            schedule.student_id,
            schedule.slot_label(slot),
            phase.number()
        ),
        start,
        end,
        location: EVENT_LOCATION.to_string(),
    })
}

fn reanchor(
    instant: DateTime<FixedOffset>,
    schedule: &ResolvedStudentSchedule,
) -> DateTime<FixedOffset> {
    combine(schedule.phase2_date, instant.time(), schedule.offset())
}

impl CalendarEvent {
    /// File name offered when downloading the iCalendar document.
    pub fn ics_file_name(&self) -> String {
        format!(
            "NSU_Advising_Phase{}_Slot{}.ics",
            self.phase.number(),
            self.slot.number()
        )
    }

    /// Renders the event as an iCalendar (RFC 5545) document.
    pub fn to_ics(&self) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", ICS_PRODUCT_ID),
            "BEGIN:VEVENT".to_string(),
            format!("DTSTART:{}", compact_utc(self.start)),
            format!("DTEND:{}", compact_utc(self.end)),
            format!("SUMMARY:{}", escape_ics_text(&self.title)),
            format!("DESCRIPTION:{}", escape_ics_text(&self.description)),
            format!("LOCATION:{}", escape_ics_text(&self.location)),
        ];

        for minutes in REMINDER_MINUTES {
            let unit = if minutes == 1 { "minute" } else { "minutes" };
            lines.push("BEGIN:VALARM".to_string());
            lines.push(format!("TRIGGER:-PT{}M", minutes));
            lines.push("ACTION:DISPLAY".to_string());
            lines.push(format!(
                "DESCRIPTION:Your advising slot starts in {} {}!",
                minutes, unit
            ));
            lines.push("END:VALARM".to_string());
        }

        lines.push("END:VEVENT".to_string());
        lines.push("END:VCALENDAR".to_string());

        let mut ics = lines.join("\r\n");
        ics.push_str("\r\n");
        ics
    }

    pub fn google_calendar_url(&self) -> String {
        format!(
            "{}&text={}&details={}&location={}&dates={}/{}",
            GOOGLE_CALENDAR_URL,
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.description),
            urlencoding::encode(&self.location),
            compact_utc(self.start),
            compact_utc(self.end)
        )
    }

    pub fn outlook_url(&self) -> String {
        format!(
            "{}?subject={}&body={}&startdt={}&enddt={}&location={}",
            OUTLOOK_CALENDAR_URL,
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.description),
            self.start
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            urlencoding::encode(&self.location)
        )
    }

    pub fn yahoo_url(&self) -> String {
        format!(
            "{}&title={}&desc={}&st={}&et={}&in_loc={}",
            YAHOO_CALENDAR_URL,
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.description),
            self.start.with_timezone(&Utc).format("%Y%m%dT%H%M%S"),
            self.end.with_timezone(&Utc).format("%Y%m%dT%H%M%S"),
            urlencoding::encode(&self.location)
        )
    }
}

/// `20260112T023200Z` form used by iCalendar and Google.
fn compact_utc(instant: DateTime<FixedOffset>) -> String {
    instant
        .with_timezone(&Utc)
        .format("%Y%m%dT%H%M%SZ")
        .to_string()
}

fn escape_ics_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_ics_special_characters() {
        assert_eq!(
            escape_ics_text("a;b,c\\d\ne"),
            "a\\;b\\,c\\\\d\\ne"
        );
    }

    #[test]
    fn compact_utc_converts_offset() {
        let instant = DateTime::parse_from_rfc3339("2026-01-12T08:32:00+06:00").unwrap();
        assert_eq!(compact_utc(instant), "20260112T023200Z");
    }
}
