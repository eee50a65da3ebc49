use crate::models::DbStudentSchedule;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_schedule_by_student_id(
    pool: &Pool<Postgres>,
    student_id: &str,
) -> Result<Option<DbStudentSchedule>> {
    tracing::debug!("Getting schedule for student: {}", student_id);

    // Dates may be stored as DATE or as text; both read back as text
    let schedule = sqlx::query_as::<_, DbStudentSchedule>(
        r#"
        SELECT student_id, probation_flag,
               phase1_date::text AS phase1_date,
               phase2_date::text AS phase2_date,
               slot1_start_time, slot1_end_time,
               slot2_start_time, slot2_end_time
        FROM student_schedules
        WHERE student_id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn count_schedules(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM student_schedules
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
