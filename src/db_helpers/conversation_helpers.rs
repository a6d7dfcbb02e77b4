use chrono::Utc;
use sqlx::{types::Json, SqlitePool};

use crate::{
    errors::RequestError,
    models::{ChatMessage, Conversation},
};

pub async fn get_conversation_in_db(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<Conversation>, RequestError> {
    let result = sqlx::query_as::<_, Conversation>(
        r#"
        SELECT id, user_id, messages, created_at, updated_at
        FROM chat_conversations
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(result)
}

/// Replaces the user's stored messages. The UNIQUE(user_id) constraint keeps
/// this to a single row per user.
pub async fn save_conversation_in_db(
    pool: &SqlitePool,
    user_id: i64,
    messages: Vec<ChatMessage>,
) -> Result<Conversation, RequestError> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();
    let result = sqlx::query_as::<_, Conversation>(
        r#"
        INSERT INTO chat_conversations (user_id, messages, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE
            SET messages = excluded.messages, updated_at = excluded.updated_at
        RETURNING id, user_id, messages, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(Json(messages))
    .bind(now)
    .bind(now)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}
