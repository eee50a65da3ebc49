use std::sync::Arc;

use advising_core::errors::AdvisingError;
use advising_core::models::analytics::{CounterUpdate, Counters};
use advising_db::mock::services::{MockFeed, MockLookup};
use advising_display::counters::{check_database_status, CountersTracker, DbStatus};
use eyre::eyre;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn feed_with_found(found: &'static [&'static str]) -> MockFeed {
    let mut feed = MockFeed::new();
    feed.expect_found_student_ids()
        .returning(move || Ok(ids(found)));
    feed
}

#[tokio::test]
async fn test_load_initial_counters() {
    let mut feed = MockFeed::new();
    feed.expect_fetch_initial_counters().times(1).returning(|| {
        Ok(Counters {
            total_searches: 120,
            unique_found: 37,
        })
    });
    let tracker = CountersTracker::new();

    let counters = tracker.load_initial(&feed).await.unwrap();

    assert_eq!(counters.total_searches, 120);
    assert_eq!(tracker.current(), counters);
}

#[tokio::test]
async fn test_update_rederives_unique_count_from_found_ids() {
    let feed = feed_with_found(&["2212345", "2212345", "2134567"]);
    let tracker = CountersTracker::new();

    let counters = tracker
        .apply_update(&feed, CounterUpdate { total_searches: 5 })
        .await;

    assert_eq!(
        counters,
        Counters {
            total_searches: 5,
            unique_found: 2,
        }
    );
}

#[tokio::test]
async fn test_duplicate_and_stale_updates_are_idempotent() {
    let feed = feed_with_found(&["2212345"]);
    let tracker = CountersTracker::new();

    tracker.apply_update(&feed, CounterUpdate { total_searches: 10 }).await;
    tracker.apply_update(&feed, CounterUpdate { total_searches: 10 }).await;
    let counters = tracker
        .apply_update(&feed, CounterUpdate { total_searches: 8 })
        .await;

    assert_eq!(
        counters,
        Counters {
            total_searches: 10,
            unique_found: 1,
        }
    );
}

#[tokio::test]
async fn test_failed_refetch_keeps_previous_unique_count() {
    let mut feed = MockFeed::new();
    feed.expect_fetch_initial_counters().returning(|| {
        Ok(Counters {
            total_searches: 3,
            unique_found: 2,
        })
    });
    feed.expect_found_student_ids()
        .returning(|| Err(AdvisingError::Connection(eyre!("timeout"))));
    let tracker = CountersTracker::new();
    tracker.load_initial(&feed).await.unwrap();

    let counters = tracker
        .apply_update(&feed, CounterUpdate { total_searches: 4 })
        .await;

    assert_eq!(
        counters,
        Counters {
            total_searches: 4,
            unique_found: 2,
        }
    );
}

#[tokio::test]
async fn test_run_applies_pushed_updates_until_cancelled() {
    let (tx, rx) = mpsc::channel(8);
    let mut feed = feed_with_found(&["2212345", "2134567"]);
    feed.expect_subscribe().return_once(move || Ok(rx));
    let tracker = Arc::new(CountersTracker::new());
    let mut counters = tracker.subscribe();
    let cancel = CancellationToken::new();

    let task = {
        let tracker = Arc::clone(&tracker);
        let cancel = cancel.clone();
        tokio::spawn(async move { tracker.run(Arc::new(feed), cancel).await })
    };

    tx.send(CounterUpdate { total_searches: 7 }).await.unwrap();
    counters
        .wait_for(|counters| counters.total_searches == 7)
        .await
        .unwrap();

    cancel.cancel();
    task.await.unwrap().unwrap();

    assert_eq!(tracker.current().unique_found, 2);
}

#[tokio::test]
async fn test_run_stops_when_feed_closes() {
    let (tx, rx) = mpsc::channel::<CounterUpdate>(1);
    let mut feed = MockFeed::new();
    feed.expect_subscribe().return_once(move || Ok(rx));
    drop(tx);

    let tracker = CountersTracker::new();
    tracker
        .run(Arc::new(feed), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(tracker.current(), Counters::default());
}

#[tokio::test]
async fn test_database_status() {
    let mut lookup = MockLookup::new();
    lookup.expect_record_count().times(1).returning(|| Ok(4210));
    assert_eq!(
        check_database_status(&lookup).await,
        DbStatus::Connected {
            total_students: 4210,
        }
    );

    let mut failing = MockLookup::new();
    failing
        .expect_record_count()
        .returning(|| Err(AdvisingError::Connection(eyre!("connection refused"))));
    assert_eq!(check_database_status(&failing).await, DbStatus::Error);
}
