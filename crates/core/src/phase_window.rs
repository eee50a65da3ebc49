//! Status of the global registration windows shown on the public timeline.

use chrono::{DateTime, FixedOffset};

use crate::models::phase::{PhaseWindow, PhaseWindowStatus};
use crate::time_parsing::time_until;

/// Resolves a window against `now`. Both ends are inclusive: a window is
/// still live at exactly its end instant.
pub fn resolve(window: &PhaseWindow, now: DateTime<FixedOffset>) -> PhaseWindowStatus {
    if now < window.start {
        PhaseWindowStatus::Upcoming {
            countdown: time_until(window.start, now),
        }
    } else if now <= window.end {
        PhaseWindowStatus::Live
    } else {
        PhaseWindowStatus::Ended
    }
}

/// Resolves every window independently, keeping their order.
pub fn resolve_all(
    windows: &[PhaseWindow],
    now: DateTime<FixedOffset>,
) -> Vec<(u8, PhaseWindowStatus)> {
    windows
        .iter()
        .map(|window| (window.phase, resolve(window, now)))
        .collect()
}

/// The phase the timeline expands: the first window that has not yet
/// reached its end, or `None` once all of them have.
pub fn active_phase(windows: &[PhaseWindow], now: DateTime<FixedOffset>) -> Option<u8> {
    windows
        .iter()
        .find(|window| now < window.end)
        .map(|window| window.phase)
}
