use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    data_formats::{CreatePostRequest, CreateReplyRequest},
    errors::RequestError,
    models::{ForumPost, ForumReply},
};

const DEFAULT_CATEGORY: &str = "general";

const POST_SELECT: &str = r#"
    SELECT forum_posts.id, forum_posts.user_id, users.username AS author,
        forum_posts.title, forum_posts.content, forum_posts.category, forum_posts.likes,
        (SELECT COUNT(*) FROM forum_replies WHERE forum_replies.post_id = forum_posts.id) AS reply_count,
        forum_posts.created_at
    FROM forum_posts
    INNER JOIN users ON users.id = forum_posts.user_id
"#;

const REPLY_SELECT: &str = r#"
    SELECT forum_replies.id, forum_replies.post_id, forum_replies.user_id,
        users.username AS author, forum_replies.content, forum_replies.created_at
    FROM forum_replies
    INNER JOIN users ON users.id = forum_replies.user_id
"#;

async fn fetch_post<'e, E>(executor: E, post_id: i64) -> Result<Option<ForumPost>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let query = format!("{POST_SELECT} WHERE forum_posts.id = ?");
    sqlx::query_as::<_, ForumPost>(&query)
        .bind(post_id)
        .fetch_optional(executor)
        .await
}

// ----------------- Post Queries -----------------

pub async fn list_posts_in_db(pool: &SqlitePool) -> Result<Vec<ForumPost>, RequestError> {
    let query = format!("{POST_SELECT} ORDER BY forum_posts.created_at DESC, forum_posts.id DESC");
    let result = sqlx::query_as::<_, ForumPost>(&query)
        .fetch_all(pool)
        .await?;
    Ok(result)
}

pub async fn get_post_in_db(pool: &SqlitePool, post_id: i64) -> Result<ForumPost, RequestError> {
    match fetch_post(pool, post_id).await? {
        Some(post) => Ok(post),
        None => Err(RequestError::NotFound("Post not found")),
    }
}

pub async fn insert_post_in_db(
    pool: &SqlitePool,
    user_id: i64,
    CreatePostRequest {
        title,
        content,
        category,
    }: CreatePostRequest,
) -> Result<ForumPost, RequestError> {
    let category = category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let mut tx = pool.begin().await?;
    let (post_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO forum_posts (user_id, title, content, category, likes, created_at)
        VALUES (?, ?, ?, ?, 0, ?)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(title.trim())
    .bind(content.trim())
    .bind(category)
    .bind(Utc::now())
    .fetch_one(&mut tx)
    .await?;
    let post = fetch_post(&mut tx, post_id)
        .await?
        .ok_or(RequestError::ServerError)?;
    tx.commit().await?;
    Ok(post)
}

/// Increments the like counter in place, so concurrent likes are never lost.
pub async fn like_post_in_db(pool: &SqlitePool, post_id: i64) -> Result<ForumPost, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE forum_posts SET likes = likes + 1 WHERE id = ?")
        .bind(post_id)
        .execute(&mut tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RequestError::NotFound("Post not found"));
    }
    let post = fetch_post(&mut tx, post_id)
        .await?
        .ok_or(RequestError::ServerError)?;
    tx.commit().await?;
    Ok(post)
}
// ----------------- End Post Queries -----------------

// ----------------- Reply Queries -----------------

pub async fn list_replies_in_db(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<ForumReply>, RequestError> {
    let query = format!(
        "{REPLY_SELECT} WHERE forum_replies.post_id = ? ORDER BY forum_replies.created_at ASC, forum_replies.id ASC"
    );
    let result = sqlx::query_as::<_, ForumReply>(&query)
        .bind(post_id)
        .fetch_all(pool)
        .await?;
    Ok(result)
}

pub async fn insert_reply_in_db(
    pool: &SqlitePool,
    user_id: i64,
    post_id: i64,
    CreateReplyRequest { content }: CreateReplyRequest,
) -> Result<ForumReply, RequestError> {
    let mut tx = pool.begin().await?;
    let post: Option<(i64,)> = sqlx::query_as("SELECT id FROM forum_posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(&mut tx)
        .await?;
    if post.is_none() {
        return Err(RequestError::NotFound("Post not found"));
    }

    let (reply_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO forum_replies (post_id, user_id, content, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content.trim())
    .bind(Utc::now())
    .fetch_one(&mut tx)
    .await?;

    let query = format!("{REPLY_SELECT} WHERE forum_replies.id = ?");
    let reply = sqlx::query_as::<_, ForumReply>(&query)
        .bind(reply_id)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(reply)
}
// ----------------- End Reply Queries -----------------
