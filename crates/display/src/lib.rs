use std::sync::Arc;

use eyre::{Result, WrapErr};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use advising_db::memory::InMemoryStore;
use advising_db::postgres::PgStore;
use advising_db::services::{CountersFeed, ScheduleLookup, SearchLogging};

pub mod clock;
pub mod config;
pub mod counters;
pub mod input;
pub mod refresh;
pub mod render;
pub mod session;

use crate::clock::SystemClock;
use crate::config::{DataSource, DisplayConfig};
use crate::counters::{check_database_status, CountersTracker, DbStatus};
use crate::input::{run_input_loop, spawn_stdin_reader};
use crate::refresh::RefreshLoop;
use crate::render::{status_line, TerminalSink};
use crate::session::SearchController;

struct Collaborators {
    lookup: Arc<dyn ScheduleLookup>,
    search_log: Arc<dyn SearchLogging>,
    feed: Arc<dyn CountersFeed>,
}

impl Collaborators {
    fn from_store<T>(store: T) -> Self
    where
        T: ScheduleLookup + SearchLogging + CountersFeed + 'static,
    {
        let store = Arc::new(store);
        Self {
            lookup: store.clone(),
            search_log: store.clone(),
            feed: store,
        }
    }

    async fn connect(source: &DataSource) -> Result<Self> {
        match source {
            DataSource::Postgres { database_url } => {
                let pool = advising_db::create_pool(database_url)
                    .await
                    .wrap_err("Failed to connect to the advising database")?;
                Ok(Self::from_store(PgStore::new(pool)))
            }
            DataSource::JsonFile { path } => {
                Ok(Self::from_store(InMemoryStore::from_json_file(path).await?))
            }
        }
    }
}

/// Start the advising display with the provided configuration.
///
/// Student ids are read from standard input, one per line; an empty line
/// clears the current result. Runs until Ctrl-C.
pub async fn start_display(config: DisplayConfig) -> Result<()> {
    info!("Starting advising display");

    let collaborators = Collaborators::connect(&config.data_source).await?;

    println!("{}", status_line(&DbStatus::Checking));
    let status = check_database_status(collaborators.lookup.as_ref()).await;
    println!("{}", status_line(&status));

    let cancel = CancellationToken::new();

    let counters = Arc::new(CountersTracker::new());
    if let Err(e) = counters.load_initial(collaborators.feed.as_ref()).await {
        warn!("Stats fetch error: {}", e);
    }
    let counters_task = {
        let counters = Arc::clone(&counters);
        let feed = Arc::clone(&collaborators.feed);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = counters.run(feed, cancel).await {
                warn!("Counters subscription failed: {}", e);
            }
        })
    };

    let controller = Arc::new(SearchController::new(
        collaborators.lookup,
        collaborators.search_log,
        config.utc_offset,
    ));

    let refresh = RefreshLoop::new(
        config.phase_windows.clone(),
        Arc::new(SystemClock::new(config.utc_offset)),
        controller.subscribe(),
        TerminalSink::new(std::io::stdout()),
    )
    .with_counters(counters.subscribe());
    let refresh_task = tokio::spawn(refresh.run(cancel.clone()));

    let (lines_tx, lines) = mpsc::unbounded_channel();
    if let Some(student_id) = &config.student_id {
        // The receiver is still held here, so this cannot fail
        let _ = lines_tx.send(student_id.to_string());
    }
    spawn_stdin_reader(lines_tx);
    let input_task = tokio::spawn(run_input_loop(controller, lines, cancel.clone()));

    let signal = tokio::signal::ctrl_c().await;

    info!("Shutting down advising display");
    cancel.cancel();
    input_task.await.wrap_err("Input loop panicked")?;
    refresh_task.await.wrap_err("Refresh loop panicked")?;
    counters_task.await.wrap_err("Counters task panicked")?;

    let totals = counters.current();
    info!(
        "Session totals: {} searches, {} unique students found",
        totals.total_searches, totals.unique_found
    );

    signal.wrap_err("Failed to listen for shutdown signal")?;
    Ok(())
}
