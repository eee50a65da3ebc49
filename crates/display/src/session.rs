//! # Lookup Session
//!
//! The loading, result and error state of a student lookup. The state lives
//! in a `watch` channel and is only ever replaced as a whole, so readers see
//! either the previous outcome or the new one, never a mix of both.

use std::sync::Arc;

use chrono::FixedOffset;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use advising_core::errors::AdvisingError;
use advising_core::models::schedule::ResolvedStudentSchedule;
use advising_core::models::student::StudentId;
use advising_db::services::{ScheduleLookup, SearchLogging};

/// Why a lookup ended without a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    NotFound,
    Connection,
    Malformed,
}

impl LookupFailure {
    /// Message shown to the student.
    pub fn message(&self) -> &'static str {
        match self {
            LookupFailure::NotFound => "Advising data not found for you.",
            LookupFailure::Connection => "Connection failed. Please try again.",
            LookupFailure::Malformed => "Advising data for you could not be read.",
        }
    }
}

impl From<&AdvisingError> for LookupFailure {
    fn from(err: &AdvisingError) -> Self {
        match err {
            AdvisingError::NotFound(_) => LookupFailure::NotFound,
            AdvisingError::MalformedInput(_) => LookupFailure::Malformed,
            _ => LookupFailure::Connection,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading {
        student_id: StudentId,
    },
    Loaded(Arc<ResolvedStudentSchedule>),
    Failed {
        student_id: StudentId,
        failure: LookupFailure,
    },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn schedule(&self) -> Option<&Arc<ResolvedStudentSchedule>> {
        match self {
            SessionState::Loaded(schedule) => Some(schedule),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<LookupFailure> {
        match self {
            SessionState::Failed { failure, .. } => Some(*failure),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A lookup is already in progress")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] AdvisingError),
}

/// Runs lookups and publishes their outcome as a [`SessionState`].
pub struct SearchController {
    lookup: Arc<dyn ScheduleLookup>,
    search_log: Arc<dyn SearchLogging>,
    offset: FixedOffset,
    state: watch::Sender<SessionState>,
}

impl SearchController {
    pub fn new(
        lookup: Arc<dyn ScheduleLookup>,
        search_log: Arc<dyn SearchLogging>,
        offset: FixedOffset,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            lookup,
            search_log,
            offset,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Looks up `input` and publishes the outcome.
    ///
    /// At most one lookup runs at a time: the switch to `Loading` happens
    /// atomically with the check for a running lookup.
    ///
    /// # Errors
    ///
    /// * `SubmitError::Invalid` - `input` is not a student id
    /// * `SubmitError::Busy` - another lookup is still in flight
    pub async fn submit(&self, input: &str) -> Result<SessionState, SubmitError> {
        let student_id = StudentId::parse(input)?;

        let started = self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            *state = SessionState::Loading {
                student_id: student_id.clone(),
            };
            true
        });
        if !started {
            debug!("Rejected lookup for {} while another is running", student_id);
            return Err(SubmitError::Busy);
        }

        info!("Looking up advising schedule for {}", student_id);
        let outcome = match self.lookup.find_schedule(student_id.as_str()).await {
            Ok(Some(record)) => {
                self.record_search(&student_id, true);
                match ResolvedStudentSchedule::resolve(&record, self.offset) {
                    Ok(schedule) => SessionState::Loaded(Arc::new(schedule)),
                    Err(e) => {
                        warn!("Stored schedule for {} is unreadable: {}", student_id, e);
                        SessionState::Failed {
                            student_id,
                            failure: LookupFailure::Malformed,
                        }
                    }
                }
            }
            Ok(None) => {
                self.record_search(&student_id, false);
                SessionState::Failed {
                    student_id,
                    failure: LookupFailure::NotFound,
                }
            }
            Err(e) => {
                error!("Lookup for {} failed: {}", student_id, e);
                SessionState::Failed {
                    failure: LookupFailure::from(&e),
                    student_id,
                }
            }
        };

        self.state.send_replace(outcome.clone());
        Ok(outcome)
    }

    /// Drops the current result or error and returns to the search form.
    pub fn reset(&self) {
        self.state.send_replace(SessionState::Idle);
    }

    /// Hides a previous error once the student edits their input.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Failed { .. }) {
                *state = SessionState::Idle;
                true
            } else {
                false
            }
        });
    }

    fn record_search(&self, student_id: &StudentId, found: bool) {
        let search_log = Arc::clone(&self.search_log);
        let student_id = student_id.to_string();

        // Best effort; never delays or changes the lookup outcome
        tokio::spawn(async move {
            if let Err(e) = search_log.record_search_attempt(&student_id, found).await {
                debug!("Analytics log failed: {}", e);
            }
        });
    }
}
