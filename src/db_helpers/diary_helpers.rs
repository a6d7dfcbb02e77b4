use chrono::{NaiveDate, Utc};
use sqlx::{types::Json, SqlitePool};

use crate::{data_formats::DiaryRequest, errors::RequestError, models::DiaryEntry};

const DIARY_COLUMNS: &str =
    "id, user_id, entry_date, food_log, exercise_log, notes, created_at, updated_at";

pub async fn get_diary_entry_in_db(
    pool: &SqlitePool,
    user_id: i64,
    entry_date: NaiveDate,
) -> Result<Option<DiaryEntry>, RequestError> {
    let query =
        format!("SELECT {DIARY_COLUMNS} FROM diary_entries WHERE user_id = ? AND entry_date = ?");
    let result = sqlx::query_as::<_, DiaryEntry>(&query)
        .bind(user_id)
        .bind(entry_date)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn list_diary_entries_in_db(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<DiaryEntry>, RequestError> {
    let query = format!(
        "SELECT {DIARY_COLUMNS} FROM diary_entries WHERE user_id = ? ORDER BY entry_date DESC"
    );
    let result = sqlx::query_as::<_, DiaryEntry>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(result)
}

/// Writes the whole day. UNIQUE(user_id, entry_date) turns a second save of
/// the same day into an update of the existing row.
pub async fn save_diary_entry_in_db(
    pool: &SqlitePool,
    user_id: i64,
    entry_date: NaiveDate,
    DiaryRequest {
        food_log,
        exercise_log,
        notes,
    }: DiaryRequest,
) -> Result<DiaryEntry, RequestError> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();
    let query = format!(
        r#"
        INSERT INTO diary_entries (user_id, entry_date, food_log, exercise_log, notes, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id, entry_date) DO UPDATE
            SET food_log = excluded.food_log,
                exercise_log = excluded.exercise_log,
                notes = excluded.notes,
                updated_at = excluded.updated_at
        RETURNING {DIARY_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<_, DiaryEntry>(&query)
        .bind(user_id)
        .bind(entry_date)
        .bind(Json(food_log))
        .bind(Json(exercise_log))
        .bind(notes)
        .bind(now)
        .bind(now)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}
