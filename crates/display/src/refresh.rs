//! # Refresh Loop
//!
//! Re-evaluates the registration windows and the student state once per
//! second and hands the result to a [`DisplaySink`].
//!
//! Each tick reads the latest session snapshot from the lookup controller;
//! nothing computed on an earlier tick is reused except the previous phase,
//! which decides between a full redraw and a countdown-only update.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use eyre::Result;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use advising_core::models::analytics::Counters;
use advising_core::models::phase::{
    CountdownDuration, PhaseWindow, PhaseWindowStatus, Slot, SlotStatus, StudentPhase,
    StudentPhaseState,
};
use advising_core::models::schedule::ResolvedStudentSchedule;
use advising_core::phase_window::{active_phase, resolve_all};
use advising_core::state_machine::{self, slot_status};

use crate::clock::Clock;
use crate::session::SessionState;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the student result view needs on one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentUpdate {
    /// The phase changed or a new schedule arrived: redraw everything.
    Render {
        schedule: Arc<ResolvedStudentSchedule>,
        state: StudentPhaseState,
        slot1: SlotStatus,
        slot2: SlotStatus,
        countdown: CountdownDuration,
    },
    /// Same phase as the previous tick: only the digits move.
    Countdown {
        label: &'static str,
        countdown: CountdownDuration,
    },
    /// The schedule went away since the previous tick.
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub now: DateTime<FixedOffset>,
    pub phases: Vec<(u8, PhaseWindowStatus)>,
    pub active_phase: Option<u8>,
    pub student: Option<StudentUpdate>,
    /// Latest public search counters, when the loop is fed them.
    pub counters: Option<Counters>,
}

/// Receives one report per tick.
pub trait DisplaySink: Send {
    fn show(&mut self, report: &TickReport) -> Result<()>;
}

/// The pure part of a tick.
#[derive(Debug)]
pub struct Refresher {
    windows: Vec<PhaseWindow>,
    last: Option<(Arc<ResolvedStudentSchedule>, StudentPhase)>,
}

impl Refresher {
    pub fn new(windows: Vec<PhaseWindow>) -> Self {
        Self {
            windows,
            last: None,
        }
    }

    pub fn tick(&mut self, now: DateTime<FixedOffset>, session: &SessionState) -> TickReport {
        let student = match session.schedule() {
            Some(schedule) => Some(self.student_update(schedule, now)),
            None => self.last.take().map(|_| StudentUpdate::Cleared),
        };

        TickReport {
            now,
            phases: resolve_all(&self.windows, now),
            active_phase: active_phase(&self.windows, now),
            student,
            counters: None,
        }
    }

    fn student_update(
        &mut self,
        schedule: &Arc<ResolvedStudentSchedule>,
        now: DateTime<FixedOffset>,
    ) -> StudentUpdate {
        let state = state_machine::resolve(schedule, now);
        let countdown = state.time_left(now);

        let unchanged = matches!(
            &self.last,
            Some((previous, phase)) if Arc::ptr_eq(previous, schedule) && *phase == state.phase
        );
        if unchanged {
            return StudentUpdate::Countdown {
                label: state.countdown_label,
                countdown,
            };
        }

        self.last = Some((Arc::clone(schedule), state.phase));
        StudentUpdate::Render {
            schedule: Arc::clone(schedule),
            state,
            slot1: slot_status(state.phase, Slot::One),
            slot2: slot_status(state.phase, Slot::Two),
            countdown,
        }
    }
}

pub struct RefreshLoop<S> {
    refresher: Refresher,
    clock: Arc<dyn Clock>,
    session: watch::Receiver<SessionState>,
    counters: Option<watch::Receiver<Counters>>,
    sink: S,
}

impl<S: DisplaySink> RefreshLoop<S> {
    pub fn new(
        windows: Vec<PhaseWindow>,
        clock: Arc<dyn Clock>,
        session: watch::Receiver<SessionState>,
        sink: S,
    ) -> Self {
        Self {
            refresher: Refresher::new(windows),
            clock,
            session,
            counters: None,
            sink,
        }
    }

    /// Attaches the live search counters to every report.
    pub fn with_counters(mut self, counters: watch::Receiver<Counters>) -> Self {
        self.counters = Some(counters);
        self
    }

    /// Ticks until `cancel` fires, then hands the sink back.
    pub async fn run(mut self, cancel: CancellationToken) -> S {
        let mut ticker = tokio::time::interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Refresh loop shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let session = self.session.borrow().clone();
                    let mut report = self.refresher.tick(self.clock.now(), &session);
                    report.counters = self.counters.as_ref().map(|counters| *counters.borrow());
                    if let Err(e) = self.sink.show(&report) {
                        warn!("Display update failed: {}", e);
                    }
                }
            }
        }

        self.sink
    }
}
