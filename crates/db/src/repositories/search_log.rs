use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn log_search(pool: &Pool<Postgres>, student_id: &str, found: bool) -> Result<()> {
    sqlx::query(
        r#"
        SELECT log_advising_search($1, $2)
        "#,
    )
    .bind(student_id)
    .bind(found)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn increment_search_counter(pool: &Pool<Postgres>, found: bool) -> Result<()> {
    let query = if found {
        "SELECT increment_valid_search()"
    } else {
        "SELECT increment_invalid_search()"
    };

    sqlx::query(query).execute(pool).await?;

    Ok(())
}
