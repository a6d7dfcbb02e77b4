use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Conversation {
    pub id: i64,
    pub user_id: i64,
    pub messages: Json<Vec<ChatMessage>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Forum post joined with its author's username and reply count.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ForumPost {
    pub id: i64,
    pub user_id: i64,
    pub author: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub likes: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ForumReply {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub calories: i64,
    #[serde(default = "default_meal_time")]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub name: String,
    /// Minutes.
    pub duration: i64,
    #[serde(default)]
    pub calories: i64,
}

fn default_meal_time() -> String {
    "08:00".to_string()
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub user_id: i64,
    pub entry_date: NaiveDate,
    pub food_log: Json<Vec<FoodEntry>>,
    pub exercise_log: Json<Vec<ExerciseEntry>>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProgramType {
    WeightLoss,
    WeightGain,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub program_type: ProgramType,
    pub status: EnrollmentStatus,
    pub start_date: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HealthStat {
    pub id: i64,
    pub user_id: i64,
    pub weight: f64,
    pub steps: i64,
    pub calories_burned: i64,
    pub water_intake: f64,
    pub bmi: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScanRecord {
    pub id: i64,
    pub user_id: i64,
    pub image_url: String,
    pub detected_condition: String,
    pub confidence: i64,
    pub prevention_tips: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}
