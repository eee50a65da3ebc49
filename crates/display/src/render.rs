//! Plain text rendering of tick reports.

use std::io::Write;

use eyre::{Result, WrapErr};

use advising_core::models::analytics::Counters;
use advising_core::models::phase::{CountdownDuration, PhaseWindowStatus};

use crate::counters::DbStatus;
use crate::refresh::{DisplaySink, StudentUpdate, TickReport};

pub fn format_countdown(countdown: &CountdownDuration) -> String {
    format!(
        "{}d {:02}h {:02}m {:02}s",
        countdown.days, countdown.hours, countdown.minutes, countdown.seconds
    )
}

pub fn status_line(status: &DbStatus) -> String {
    match status {
        DbStatus::Checking => "Database: checking...".to_string(),
        DbStatus::Connected { total_students } => {
            format!("Database: connected ({} students)", total_students)
        }
        DbStatus::Error => "Database: connection error".to_string(),
    }
}

pub fn counters_line(counters: &Counters) -> String {
    format!(
        "Searches: {} total, {} unique students found",
        counters.total_searches, counters.unique_found
    )
}

fn phase_line(phase: u8, status: &PhaseWindowStatus, active: bool) -> String {
    let marker = if active { '>' } else { ' ' };
    let status = match status {
        PhaseWindowStatus::Upcoming { countdown } => {
            format!("starts in {}", format_countdown(countdown))
        }
        PhaseWindowStatus::Live => "LIVE".to_string(),
        PhaseWindowStatus::Ended => "ENDED".to_string(),
    };
    format!("{} Phase {}: {}", marker, phase, status)
}

fn student_lines(update: &StudentUpdate) -> Vec<String> {
    match update {
        StudentUpdate::Render {
            schedule,
            state,
            slot1,
            slot2,
            countdown,
        } => {
            let probation = if schedule.probation_flag {
                " (probation)"
            } else {
                ""
            };
            vec![
                format!("Student {}{} - {}", schedule.student_id, probation, state.phase),
                format!(
                    "  Phase 1: {}, {}",
                    schedule.phase1_weekday(),
                    schedule.phase1_date_label()
                ),
                format!(
                    "  Phase 2: {}, {}",
                    schedule.phase2_weekday(),
                    schedule.phase2_date_label()
                ),
                format!("  Slot 1: {} [{}]", schedule.slot1_label, slot1.as_str()),
                format!("  Slot 2: {} [{}]", schedule.slot2_label, slot2.as_str()),
                format!("  {}: {}", state.countdown_label, format_countdown(countdown)),
            ]
        }
        StudentUpdate::Countdown { label, countdown } => {
            vec![format!("  {}: {}", label, format_countdown(countdown))]
        }
        StudentUpdate::Cleared => vec!["Search cleared".to_string()],
    }
}

/// Writes each report as text lines.
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DisplaySink for TerminalSink<W> {
    fn show(&mut self, report: &TickReport) -> Result<()> {
        let mut lines: Vec<String> = report
            .phases
            .iter()
            .map(|(phase, status)| phase_line(*phase, status, report.active_phase == Some(*phase)))
            .collect();
        if let Some(counters) = &report.counters {
            lines.push(counters_line(counters));
        }
        if let Some(update) = &report.student {
            lines.extend(student_lines(update));
        }

        for line in lines {
            writeln!(self.out, "{}", line).wrap_err("Failed to write display line")?;
        }
        self.out.flush().wrap_err("Failed to flush display")?;
        Ok(())
    }
}
