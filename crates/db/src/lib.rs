//! # Advising Data Adapters
//!
//! The lookup, search logging and counters collaborators consumed by the
//! display, as async traits in [`services`], with a Postgres adapter
//! ([`postgres::PgStore`]), a JSON-file backed adapter
//! ([`memory::InMemoryStore`]) and mockall mocks ([`mock`]).

pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod schema;
pub mod services;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
