use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    errors::RequestError,
    models::{Enrollment, EnrollmentStatus, ProgramType},
};

pub async fn list_enrollments_in_db(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Enrollment>, RequestError> {
    let result = sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id, user_id, program_type, status, start_date
        FROM programs
        WHERE user_id = ?
        ORDER BY start_date ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(result)
}

/// Starts an active enrollment. A second active enrollment in the same
/// program violates `programs_one_active_per_type`.
pub async fn enroll_in_db(
    pool: &SqlitePool,
    user_id: i64,
    program_type: ProgramType,
) -> Result<Enrollment, RequestError> {
    let result = sqlx::query_as::<_, Enrollment>(
        r#"
        INSERT INTO programs (user_id, program_type, status, start_date)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, program_type, status, start_date
        "#,
    )
    .bind(user_id)
    .bind(program_type)
    .bind(EnrollmentStatus::Active)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(RequestError::from)
    .map_err(|e| {
        if e.is_unique_violation() {
            return RequestError::RunTimeError("Already enrolled in this program");
        }
        e
    })?;
    Ok(result)
}
