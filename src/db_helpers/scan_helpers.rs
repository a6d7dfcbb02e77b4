use chrono::Utc;
use sqlx::{types::Json, SqlitePool};

use crate::{assistant::ScanCondition, errors::RequestError, models::ScanRecord};

const SCAN_COLUMNS: &str =
    "id, user_id, image_url, detected_condition, confidence, prevention_tips, created_at";

pub async fn insert_scan_in_db(
    pool: &SqlitePool,
    user_id: i64,
    image_url: &str,
    result: &ScanCondition,
) -> Result<ScanRecord, RequestError> {
    let mut tx = pool.begin().await?;
    let tips: Vec<String> = result.tips.iter().map(|tip| tip.to_string()).collect();
    let query = format!(
        r#"
        INSERT INTO scan_history (user_id, image_url, detected_condition, confidence, prevention_tips, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {SCAN_COLUMNS}
        "#
    );
    let record = sqlx::query_as::<_, ScanRecord>(&query)
        .bind(user_id)
        .bind(image_url)
        .bind(result.condition)
        .bind(i64::from(result.confidence))
        .bind(Json(tips))
        .bind(Utc::now())
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(record)
}

pub async fn list_scans_in_db(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<ScanRecord>, RequestError> {
    let query = format!(
        "SELECT {SCAN_COLUMNS} FROM scan_history WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    );
    let result = sqlx::query_as::<_, ScanRecord>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(result)
}
