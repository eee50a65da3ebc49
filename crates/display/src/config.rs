//! # Display Configuration Module
//!
//! Loads the display configuration from environment variables.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string for the lookup service
//! - `ADVISING_SCHEDULES_FILE`: JSON file of schedule records, used when
//!   `DATABASE_URL` is not set
//! - `ADVISING_UTC_OFFSET`: campus offset such as `+06:00` (default: "+06:00")
//! - `ADVISING_STUDENT_ID`: student looked up at startup (optional)
//! - `PHASE1_START` .. `PHASE3_END`: RFC 3339 bounds overriding the default
//!   registration windows
//! - `LOG_LEVEL`: Logging level (default: "info")

use advising_core::models::phase::PhaseWindow;
use advising_core::models::student::StudentId;
use chrono::{DateTime, FixedOffset};
use eyre::{eyre, Result, WrapErr};
use std::env;
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_UTC_OFFSET: &str = "+06:00";

/// Default registration windows as `(phase, start, end)`.
pub const DEFAULT_PHASE_WINDOWS: [(u8, &str, &str); 3] = [
    (1, "2026-01-12T02:32:00Z", "2026-01-13T17:59:59Z"),
    (2, "2026-01-14T02:32:00Z", "2026-01-15T17:59:59Z"),
    (3, "2026-01-17T04:00:00Z", "2026-01-19T17:59:59Z"),
];

/// Where schedule records and search analytics come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Postgres { database_url: String },
    JsonFile { path: PathBuf },
}

/// Configuration for the advising display.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub data_source: DataSource,

    /// Offset of the campus; every local instant is built in it
    pub utc_offset: FixedOffset,

    pub student_id: Option<StudentId>,

    /// Registration windows in phase order
    pub phase_windows: Vec<PhaseWindow>,

    pub log_level: Level,
}

impl DisplayConfig {
    /// Creates a new DisplayConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - Neither DATABASE_URL nor ADVISING_SCHEDULES_FILE is set
    /// - ADVISING_UTC_OFFSET or ADVISING_STUDENT_ID is malformed
    /// - A phase bound is not RFC 3339, or a window starts after it ends
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_source = match (lookup("DATABASE_URL"), lookup("ADVISING_SCHEDULES_FILE")) {
            (Some(database_url), _) => DataSource::Postgres { database_url },
            (None, Some(path)) => DataSource::JsonFile {
                path: PathBuf::from(path),
            },
            (None, None) => {
                return Err(eyre!(
                    "Either DATABASE_URL or ADVISING_SCHEDULES_FILE must be set"
                ));
            }
        };

        let utc_offset = parse_utc_offset(
            &lookup("ADVISING_UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string()),
        )
        .wrap_err("Invalid ADVISING_UTC_OFFSET value")?;

        let student_id = lookup("ADVISING_STUDENT_ID")
            .map(|id| StudentId::parse(&id))
            .transpose()
            .wrap_err("Invalid ADVISING_STUDENT_ID value")?;

        let mut phase_windows = Vec::with_capacity(DEFAULT_PHASE_WINDOWS.len());
        for (phase, default_start, default_end) in DEFAULT_PHASE_WINDOWS {
            let start = phase_bound(&lookup, &format!("PHASE{}_START", phase), default_start)?;
            let end = phase_bound(&lookup, &format!("PHASE{}_END", phase), default_end)?;
            let window = PhaseWindow::new(
                phase,
                start.with_timezone(&utc_offset),
                end.with_timezone(&utc_offset),
            )
            .wrap_err_with(|| format!("Invalid phase {} window", phase))?;
            phase_windows.push(window);
        }

        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            data_source,
            utc_offset,
            student_id,
            phase_windows,
            log_level,
        })
    }
}

fn phase_bound<F>(lookup: &F, key: &str, default: &str) -> Result<DateTime<FixedOffset>>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    DateTime::parse_from_rfc3339(&value).wrap_err_with(|| format!("Invalid {} value", key))
}

/// Parses `+HH:MM`, `-HH:MM` or `Z`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    let text = text.trim();
    if text == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(|| eyre!("Invalid UTC offset"));
    }

    let (sign, rest) = match text.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(eyre!("UTC offset must start with + or -: '{}'", text)),
    };

    let (hours, minutes) = rest
        .split_once(':')
        .ok_or_else(|| eyre!("UTC offset must look like +HH:MM: '{}'", text))?;
    let hours: u32 = hours
        .parse()
        .wrap_err_with(|| format!("Invalid offset hours in '{}'", text))?;
    let minutes: u32 = minutes
        .parse()
        .wrap_err_with(|| format!("Invalid offset minutes in '{}'", text))?;
    if minutes >= 60 {
        return Err(eyre!("Invalid offset minutes in '{}'", text));
    }

    let seconds = i32::try_from(u64::from(hours) * 3600 + u64::from(minutes) * 60)
        .wrap_err_with(|| format!("UTC offset out of range: '{}'", text))?;
    FixedOffset::east_opt(sign * seconds)
        .ok_or_else(|| eyre!("UTC offset out of range: '{}'", text))
}
