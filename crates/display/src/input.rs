//! Student id input, one line at a time.
//!
//! Lookups run on their own task so a slow database never holds up the
//! input loop or shutdown. The controller rejects a second lookup while one
//! is still loading.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use advising_core::models::student::StudentId;

use crate::session::{SearchController, SessionState, SubmitError};

/// Reads standard input on its own thread into `tx`. A blocked read never
/// holds up shutdown.
pub fn spawn_stdin_reader(tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read student id: {}", e);
                    break;
                }
            }
        }
    });
}

/// Handles input lines until `cancel` fires or the input closes.
pub async fn run_input_loop(
    controller: Arc<SearchController>,
    mut lines: mpsc::UnboundedReceiver<String>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            line = lines.recv() => match line {
                Some(line) => dispatch(&controller, &line),
                None => {
                    info!("Input closed");
                    break;
                }
            },
        }
    }
}

/// An empty line clears the current result; a complete id starts a lookup.
fn dispatch(controller: &Arc<SearchController>, line: &str) {
    let input = line.trim();
    if input.is_empty() {
        controller.reset();
        return;
    }

    controller.clear_error();
    if !StudentId::is_complete(input) {
        warn!("Student ID must have 7 digits");
        return;
    }

    let controller = Arc::clone(controller);
    let input = input.to_string();
    tokio::spawn(async move {
        match controller.submit(&input).await {
            Ok(SessionState::Failed { failure, .. }) => warn!("{}", failure.message()),
            Ok(_) => {}
            Err(SubmitError::Busy) => warn!("Please wait for the current search to finish"),
            Err(e) => warn!("{}", e),
        }
    });
}
