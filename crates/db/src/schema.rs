use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create student_schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS student_schedules (
            student_id VARCHAR(7) PRIMARY KEY,
            probation_flag BOOLEAN NOT NULL DEFAULT FALSE,
            phase1_date DATE NOT NULL,
            phase2_date DATE NOT NULL,
            slot1_start_time VARCHAR(16) NOT NULL,
            slot1_end_time VARCHAR(16) NOT NULL,
            slot2_start_time VARCHAR(16) NOT NULL,
            slot2_end_time VARCHAR(16) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create advising_search_logs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS advising_search_logs (
            id BIGSERIAL PRIMARY KEY,
            student_id VARCHAR(7) NOT NULL,
            found BOOLEAN NOT NULL,
            searched_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create the single-row advising_search_analytics table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS advising_search_analytics (
            id INTEGER PRIMARY KEY DEFAULT 1 CHECK (id = 1),
            total_searches BIGINT NOT NULL DEFAULT 0,
            valid_searches BIGINT NOT NULL DEFAULT 0,
            invalid_searches BIGINT NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO advising_search_analytics (id) VALUES (1)
        ON CONFLICT (id) DO NOTHING;
        "#,
    )
    .execute(pool)
    .await?;

    // Search logging functions
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION log_advising_search(p_student_id TEXT, p_found BOOLEAN)
        RETURNS VOID AS $$
            INSERT INTO advising_search_logs (student_id, found) VALUES (p_student_id, p_found);
        $$ LANGUAGE sql;
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION increment_valid_search()
        RETURNS VOID AS $$
            UPDATE advising_search_analytics
            SET total_searches = total_searches + 1, valid_searches = valid_searches + 1
            WHERE id = 1;
        $$ LANGUAGE sql;
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION increment_invalid_search()
        RETURNS VOID AS $$
            UPDATE advising_search_analytics
            SET total_searches = total_searches + 1, invalid_searches = invalid_searches + 1
            WHERE id = 1;
        $$ LANGUAGE sql;
        "#,
    )
    .execute(pool)
    .await?;

    // Push analytics changes to listeners
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION notify_advising_search_analytics()
        RETURNS TRIGGER AS $$
        BEGIN
            PERFORM pg_notify(
                'advising_search_analytics',
                json_build_object('total_searches', NEW.total_searches)::text
            );
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql;
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        DROP TRIGGER IF EXISTS advising_search_analytics_notify ON advising_search_analytics;
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER advising_search_analytics_notify
        AFTER INSERT OR UPDATE ON advising_search_analytics
        FOR EACH ROW EXECUTE FUNCTION notify_advising_search_analytics();
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_advising_search_logs_found ON advising_search_logs(found);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
