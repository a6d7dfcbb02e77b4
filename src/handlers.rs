use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::{StatusCode, Uri},
    Extension, Json,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    assistant::{responder, scanner},
    authentication::{
        get_jwt_token, hash_password_argon2, verify_password_argon2, AuthUser, MaybeUser,
    },
    catalog::PROGRAMS,
    config::Config,
    data_formats::*,
    db_helpers::*,
    errors::RequestError,
};

type JsonResult<T> = Result<Json<T>, RequestError>;

/// Snapshots returned by the progress endpoints.
const PROGRESS_WINDOW: i64 = 30;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

fn parse_entry_date(raw: &str) -> Result<NaiveDate, RequestError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| RequestError::BadRequest("Invalid date, expected YYYY-MM-DD"))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ----------------- User Handlers -----------------
pub async fn login_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Extension(config): Extension<Arc<Config>>,
    Json(UserWrapper { user: request }): Json<UserWrapper<LoginRequest>>,
) -> JsonResult<UserWrapper<UserResponse>> {
    let user = match get_user_by_email(&pool, &request.email).await? {
        Some(user) => user,
        None => return Err(RequestError::RunTimeError("Email not found")),
    };
    let is_password_correct = verify_password_argon2(request.password, user.password.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "password verification failed");
            RequestError::RunTimeError("Could not login user\nPlease Try again")
        })?;

    if !is_password_correct {
        return Err(RequestError::RunTimeError("Incorrect password"));
    }
    let token = get_jwt_token(user.id, &config.jwt_secret, config.token_ttl)
        .map_err(|_| RequestError::ServerError)?;
    tracing::info!(user_id = user.id, "user logged in");
    Ok(Json(UserWrapper::wrap_with_user_data(UserResponse::new(
        user, token,
    ))))
}

pub async fn register_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Extension(config): Extension<Arc<Config>>,
    Json(UserWrapper { mut user }): Json<UserWrapper<RegisterRequest>>,
) -> JsonResult<UserWrapper<UserResponse>> {
    if is_blank(&user.email) || is_blank(&user.username) || user.password.is_empty() {
        return Err(RequestError::BadRequest(
            "Email, username and password are required",
        ));
    }
    user.password = hash_password_argon2(user.password).await.map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        RequestError::RunTimeError("Could not register user\nPlease Try again")
    })?;

    let user = insert_user(&pool, &user).await.map_err(|e| {
        if e.is_unique_violation() {
            return RequestError::RunTimeError("Email or username already exists");
        }
        e
    })?;

    let token = get_jwt_token(user.id, &config.jwt_secret, config.token_ttl).map_err(|_| {
        RequestError::RunTimeError("Could not generate JWT successfully\nTry again later")
    })?;
    tracing::info!(user_id = user.id, "user registered");
    Ok(Json(UserWrapper::wrap_with_user_data(UserResponse::new(
        user, token,
    ))))
}

pub async fn get_current_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    AuthUser { id, token }: AuthUser,
) -> JsonResult<UserWrapper<UserResponse>> {
    let user = match get_user_by_id(&pool, id).await? {
        Some(user) => user,
        None => return Err(RequestError::NotFound("User not found")),
    };
    Ok(Json(UserWrapper::wrap_with_user_data(UserResponse::new(
        user, token,
    ))))
}
// ----------------- End User Handlers -----------------

// ----------------- Assistant Handlers -----------------
pub async fn chat(
    Extension(config): Extension<Arc<Config>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> JsonResult<ChatResponse> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "unreadable chat request");
        RequestError::Failed("Failed to process message")
    })?;
    let message = match request.message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(RequestError::BadRequest("No message provided")),
    };
    tracing::debug!(history = request.history.len(), "chat request");

    tokio::time::sleep(config.chat_delay).await;

    let response = responder::reply(&message, &mut rand::thread_rng());
    Ok(Json(ChatResponse {
        response: response.to_string(),
    }))
}

/// Returns a mock analysis. Signed-in callers also get the result appended
/// to their scan history. A token that fails verification is treated as
/// anonymous.
pub async fn scan(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Extension(config): Extension<Arc<Config>>,
    maybe_user: Result<MaybeUser, RequestError>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> JsonResult<ScanResponse> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "unreadable scan request");
        RequestError::Failed("Failed to analyze image")
    })?;
    let image = match request.image {
        Some(image) if !image.is_empty() => image,
        _ => return Err(RequestError::BadRequest("No image provided")),
    };

    tokio::time::sleep(config.scan_delay).await;

    let user_id = match maybe_user {
        Ok(maybe_user) => maybe_user.get_id(),
        Err(_) => {
            tracing::debug!("unverified token on scan, continuing anonymously");
            None
        }
    };

    let result = scanner::analyze(&mut rand::thread_rng());
    if let Some(user_id) = user_id {
        if let Err(e) = insert_scan_in_db(&pool, user_id, &image, result).await {
            tracing::warn!(error = %e, user_id, "could not store scan history");
        }
    }
    Ok(Json(ScanResponse::from(result)))
}

pub async fn list_scans(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<MultipleScansWrapper> {
    let scans = list_scans_in_db(&pool, user.id).await?;
    Ok(Json(MultipleScansWrapper {
        scans: scans.into_iter().map(ScanRecordResponse::from).collect(),
    }))
}

pub async fn get_conversation(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<ConversationWrapper> {
    let conversation = get_conversation_in_db(&pool, user.id).await?;
    Ok(Json(ConversationWrapper {
        conversation: conversation.map(ConversationResponse::from),
    }))
}

pub async fn save_conversation(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Json(request): Json<SaveConversationRequest>,
) -> JsonResult<ConversationWrapper> {
    let conversation = save_conversation_in_db(&pool, user.id, request.messages).await?;
    Ok(Json(ConversationWrapper {
        conversation: Some(conversation.into()),
    }))
}
// ----------------- End Assistant Handlers -----------------

// ----------------- Forum Handlers -----------------
pub async fn list_posts(
    Extension(pool): Extension<Arc<SqlitePool>>,
    _user: AuthUser,
) -> JsonResult<MultiplePostsWrapper> {
    let posts: Vec<PostResponse> = list_posts_in_db(&pool)
        .await?
        .into_iter()
        .map(PostResponse::from)
        .collect();
    Ok(Json(MultiplePostsWrapper {
        posts_count: posts.len(),
        posts,
    }))
}

pub async fn create_post(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> JsonResult<PostWrapper> {
    if is_blank(&request.title) || is_blank(&request.content) {
        return Err(RequestError::BadRequest("Title and content are required"));
    }
    let post = insert_post_in_db(&pool, user.id, request).await?;
    tracing::info!(post_id = post.id, user_id = user.id, "forum post created");
    Ok(Json(PostWrapper { post: post.into() }))
}

pub async fn get_post(
    Extension(pool): Extension<Arc<SqlitePool>>,
    _user: AuthUser,
    Path(post_id): Path<i64>,
) -> JsonResult<PostDetailWrapper> {
    let post = get_post_in_db(&pool, post_id).await?;
    let replies = list_replies_in_db(&pool, post_id).await?;
    Ok(Json(PostDetailWrapper {
        post: post.into(),
        replies: replies.into_iter().map(ReplyResponse::from).collect(),
    }))
}

pub async fn create_reply(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Path(post_id): Path<i64>,
    Json(request): Json<CreateReplyRequest>,
) -> JsonResult<ReplyWrapper> {
    if is_blank(&request.content) {
        return Err(RequestError::BadRequest("Reply content is required"));
    }
    let reply = insert_reply_in_db(&pool, user.id, post_id, request).await?;
    Ok(Json(ReplyWrapper {
        reply: reply.into(),
    }))
}

pub async fn like_post(
    Extension(pool): Extension<Arc<SqlitePool>>,
    _user: AuthUser,
    Path(post_id): Path<i64>,
) -> JsonResult<PostWrapper> {
    let post = like_post_in_db(&pool, post_id).await?;
    Ok(Json(PostWrapper { post: post.into() }))
}
// ----------------- End Forum Handlers -----------------

// ----------------- Diary Handlers -----------------
pub async fn list_diary(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<MultipleDiaryEntriesWrapper> {
    let entries = list_diary_entries_in_db(&pool, user.id).await?;
    Ok(Json(MultipleDiaryEntriesWrapper {
        entries: entries.into_iter().map(DiaryResponse::from).collect(),
    }))
}

pub async fn get_diary(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Path(date): Path<String>,
) -> JsonResult<DiaryWrapper> {
    let entry_date = parse_entry_date(&date)?;
    let diary = match get_diary_entry_in_db(&pool, user.id, entry_date).await? {
        Some(entry) => entry.into(),
        None => DiaryResponse::empty(entry_date),
    };
    Ok(Json(DiaryWrapper { diary }))
}

pub async fn save_diary(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Path(date): Path<String>,
    Json(request): Json<DiaryRequest>,
) -> JsonResult<DiaryWrapper> {
    let entry_date = parse_entry_date(&date)?;
    request.validate()?;
    let entry = save_diary_entry_in_db(&pool, user.id, entry_date, request).await?;
    Ok(Json(DiaryWrapper {
        diary: entry.into(),
    }))
}
// ----------------- End Diary Handlers -----------------

// ----------------- Program Handlers -----------------
pub async fn list_programs(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<ProgramsWrapper> {
    let enrollments = list_enrollments_in_db(&pool, user.id).await?;
    Ok(Json(ProgramsWrapper {
        programs: PROGRAMS
            .iter()
            .map(|program| ProgramResponse::new(program, &enrollments))
            .collect(),
    }))
}

pub async fn list_enrollments(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<MultipleEnrollmentsWrapper> {
    let enrollments = list_enrollments_in_db(&pool, user.id).await?;
    Ok(Json(MultipleEnrollmentsWrapper {
        enrollments: enrollments
            .into_iter()
            .map(EnrollmentResponse::from)
            .collect(),
    }))
}

pub async fn enroll(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Json(request): Json<EnrollRequest>,
) -> JsonResult<EnrollmentWrapper> {
    let enrollment = enroll_in_db(&pool, user.id, request.program_type).await?;
    tracing::info!(
        user_id = user.id,
        program = ?enrollment.program_type,
        "user enrolled in program"
    );
    Ok(Json(EnrollmentWrapper {
        enrollment: enrollment.into(),
    }))
}
// ----------------- End Program Handlers -----------------

// ----------------- Progress Handlers -----------------
pub async fn list_stats(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<MultipleStatsWrapper> {
    let stats = recent_stats_in_db(&pool, user.id, PROGRESS_WINDOW).await?;
    Ok(Json(MultipleStatsWrapper {
        stats: stats.into_iter().map(HealthStatResponse::from).collect(),
    }))
}

pub async fn record_stat(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
    Json(request): Json<RecordStatRequest>,
) -> JsonResult<StatWrapper> {
    request.validate()?;
    let stat = insert_stat_in_db(&pool, user.id, request).await?;
    Ok(Json(StatWrapper { stat: stat.into() }))
}

pub async fn progress_summary(
    Extension(pool): Extension<Arc<SqlitePool>>,
    user: AuthUser,
) -> JsonResult<ProgressWrapper> {
    let stats = recent_stats_in_db(&pool, user.id, PROGRESS_WINDOW).await?;
    Ok(Json(ProgressWrapper {
        progress: ProgressSummary::new(stats),
    }))
}
// ----------------- End Progress Handlers -----------------
