use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RequestError;
use crate::models::{ChatMessage, ExerciseEntry, FoodEntry, ProgramType};

// ----------------- User Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

// ----------------- Assistant Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

/// `message` is optional so that a missing value maps to a 400, not a
/// deserialization failure.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ScanRequest {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SaveConversationRequest {
    pub messages: Vec<ChatMessage>,
}

// ----------------- Forum Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CreateReplyRequest {
    pub content: String,
}

// ----------------- Diary Request -----------------
/// Upper bound for the calories of a single food or exercise entry.
pub const MAX_ENTRY_CALORIES: i64 = 100_000;
/// Upper bound for a single exercise entry, in minutes.
pub const MAX_EXERCISE_MINUTES: i64 = 24 * 60;

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct DiaryRequest {
    pub food_log: Vec<FoodEntry>,
    pub exercise_log: Vec<ExerciseEntry>,
    pub notes: String,
}

impl DiaryRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        for food in &self.food_log {
            if food.name.trim().is_empty() {
                return Err(RequestError::BadRequest("Food entries need a name"));
            }
            if food.calories <= 0 {
                return Err(RequestError::BadRequest(
                    "Food entries need a positive calorie count",
                ));
            }
            if food.calories > MAX_ENTRY_CALORIES {
                return Err(RequestError::BadRequest("Food calorie count is too large"));
            }
        }
        for exercise in &self.exercise_log {
            if exercise.name.trim().is_empty() {
                return Err(RequestError::BadRequest("Exercise entries need a name"));
            }
            if exercise.duration <= 0 {
                return Err(RequestError::BadRequest(
                    "Exercise entries need a positive duration",
                ));
            }
            if exercise.duration > MAX_EXERCISE_MINUTES {
                return Err(RequestError::BadRequest("Exercise duration is too long"));
            }
            if exercise.calories < 0 {
                return Err(RequestError::BadRequest(
                    "Exercise calories cannot be negative",
                ));
            }
            if exercise.calories > MAX_ENTRY_CALORIES {
                return Err(RequestError::BadRequest(
                    "Exercise calorie count is too large",
                ));
            }
        }
        Ok(())
    }
}

// ----------------- Program Request -----------------
#[derive(Deserialize, Serialize, Debug)]
pub struct EnrollRequest {
    pub program_type: ProgramType,
}

// ----------------- Progress Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RecordStatRequest {
    pub weight: f64,
    pub steps: i64,
    pub calories_burned: i64,
    pub water_intake: f64,
    pub bmi: f64,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl RecordStatRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        let negative = self.weight < 0.0
            || self.steps < 0
            || self.calories_burned < 0
            || self.water_intake < 0.0
            || self.bmi < 0.0;
        if negative {
            return Err(RequestError::BadRequest(
                "Health statistics cannot be negative",
            ));
        }
        if !(self.weight.is_finite() && self.water_intake.is_finite() && self.bmi.is_finite()) {
            return Err(RequestError::BadRequest("Health statistics must be finite"));
        }
        Ok(())
    }
}
