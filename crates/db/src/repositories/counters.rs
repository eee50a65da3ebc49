use eyre::Result;
use sqlx::postgres::PgListener;
use sqlx::{Pool, Postgres};

/// Channel notified with the new analytics row on every update.
pub const ANALYTICS_CHANNEL: &str = "advising_search_analytics";

pub async fn get_total_searches(pool: &Pool<Postgres>) -> Result<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT total_searches
        FROM advising_search_analytics
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(total.unwrap_or(0))
}

pub async fn get_found_student_ids(pool: &Pool<Postgres>) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT student_id
        FROM advising_search_logs
        WHERE found = true
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

pub async fn listen_for_analytics(pool: &Pool<Postgres>) -> Result<PgListener> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(ANALYTICS_CHANNEL).await?;

    Ok(listener)
}
