use chrono::Utc;
use sqlx::SqlitePool;

use crate::{data_formats::RecordStatRequest, errors::RequestError, models::HealthStat};

const STAT_COLUMNS: &str =
    "id, user_id, weight, steps, calories_burned, water_intake, bmi, recorded_at";

pub async fn insert_stat_in_db(
    pool: &SqlitePool,
    user_id: i64,
    stat: RecordStatRequest,
) -> Result<HealthStat, RequestError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        INSERT INTO health_stats (user_id, weight, steps, calories_burned, water_intake, bmi, recorded_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {STAT_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<_, HealthStat>(&query)
        .bind(user_id)
        .bind(stat.weight)
        .bind(stat.steps)
        .bind(stat.calories_burned)
        .bind(stat.water_intake)
        .bind(stat.bmi)
        .bind(stat.recorded_at.unwrap_or_else(Utc::now))
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

/// The `limit` most recent snapshots, oldest first.
pub async fn recent_stats_in_db(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<HealthStat>, RequestError> {
    let query = format!(
        r#"
        SELECT {STAT_COLUMNS} FROM (
            SELECT {STAT_COLUMNS} FROM health_stats
            WHERE user_id = ?
            ORDER BY recorded_at DESC, id DESC
            LIMIT ?
        )
        ORDER BY recorded_at ASC, id ASC
        "#
    );
    let result = sqlx::query_as::<_, HealthStat>(&query)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(result)
}
