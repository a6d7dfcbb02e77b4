use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::ScanCondition;
use crate::catalog::Program;
use crate::models::{
    ChatMessage, Conversation, DiaryEntry, Enrollment, EnrollmentStatus, ExerciseEntry,
    FoodEntry, ForumPost, ForumReply, HealthStat, ProgramType, ScanRecord, User,
};

const FIRST_WEEK_SNAPSHOTS: usize = 7;
const STEP_GOAL: i64 = 10_000;
const CONSISTENT_SNAPSHOTS: usize = 30;

#[derive(Deserialize, Serialize, Debug)]
pub struct UserResponse {
    pub email: String,
    pub token: String,
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

/// Scan result as returned by the scan endpoint.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ScanResponse {
    pub condition: String,
    pub confidence: i64,
    pub tips: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ConversationResponse {
    pub messages: Vec<ChatMessage>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PostResponse {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub likes: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReplyResponse {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq)]
pub struct DailyReport {
    pub calories_consumed: i64,
    pub calories_burned: i64,
    pub net_calories: i64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct DiaryResponse {
    pub entry_date: NaiveDate,
    pub food_log: Vec<FoodEntry>,
    pub exercise_log: Vec<ExerciseEntry>,
    pub notes: String,
    pub report: DailyReport,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProgramResponse {
    pub id: ProgramType,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub enrolled: bool,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub program_type: ProgramType,
    pub status: EnrollmentStatus,
    pub start_date: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct HealthStatResponse {
    pub id: i64,
    pub weight: f64,
    pub steps: i64,
    pub calories_burned: i64,
    pub water_intake: f64,
    pub bmi: f64,
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub title: String,
    pub achieved: bool,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProgressSummary {
    pub latest: HealthStatResponse,
    pub snapshot_count: usize,
    pub milestones: Vec<Milestone>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ScanRecordResponse {
    pub id: i64,
    pub image_url: String,
    pub detected_condition: String,
    pub confidence: i64,
    pub prevention_tips: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(User { username, email, .. }: User, token: String) -> Self {
        UserResponse {
            username,
            email,
            token,
        }
    }
}

impl From<&ScanCondition> for ScanResponse {
    fn from(result: &ScanCondition) -> Self {
        ScanResponse {
            condition: result.condition.to_string(),
            confidence: i64::from(result.confidence),
            tips: result.tips.iter().map(|tip| tip.to_string()).collect(),
        }
    }
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        ConversationResponse {
            messages: conversation.messages.0,
            updated_at: conversation.updated_at,
        }
    }
}

impl From<ForumPost> for PostResponse {
    fn from(
        ForumPost {
            id,
            author,
            title,
            content,
            category,
            likes,
            reply_count,
            created_at,
            ..
        }: ForumPost,
    ) -> Self {
        PostResponse {
            id,
            author,
            title,
            content,
            category,
            likes,
            reply_count,
            created_at,
        }
    }
}

impl From<ForumReply> for ReplyResponse {
    fn from(
        ForumReply {
            id,
            post_id,
            author,
            content,
            created_at,
            ..
        }: ForumReply,
    ) -> Self {
        ReplyResponse {
            id,
            post_id,
            author,
            content,
            created_at,
        }
    }
}

impl DailyReport {
    pub fn from_logs(food_log: &[FoodEntry], exercise_log: &[ExerciseEntry]) -> Self {
        let calories_consumed = food_log
            .iter()
            .fold(0i64, |total, food| total.saturating_add(food.calories));
        let calories_burned = exercise_log
            .iter()
            .fold(0i64, |total, exercise| total.saturating_add(exercise.calories));
        DailyReport {
            calories_consumed,
            calories_burned,
            net_calories: calories_consumed.saturating_sub(calories_burned),
        }
    }
}

impl DiaryResponse {
    /// An unsaved day: empty logs.
    pub fn empty(entry_date: NaiveDate) -> Self {
        DiaryResponse {
            entry_date,
            food_log: vec![],
            exercise_log: vec![],
            notes: String::new(),
            report: DailyReport::default(),
            updated_at: None,
        }
    }
}

impl From<DiaryEntry> for DiaryResponse {
    fn from(
        DiaryEntry {
            entry_date,
            food_log,
            exercise_log,
            notes,
            updated_at,
            ..
        }: DiaryEntry,
    ) -> Self {
        let report = DailyReport::from_logs(&food_log, &exercise_log);
        DiaryResponse {
            entry_date,
            food_log: food_log.0,
            exercise_log: exercise_log.0,
            notes,
            report,
            updated_at: Some(updated_at),
        }
    }
}

impl ProgramResponse {
    pub fn new(program: &Program, enrollments: &[Enrollment]) -> Self {
        let enrolled = enrollments.iter().any(|enrollment| {
            enrollment.program_type == program.id && enrollment.status == EnrollmentStatus::Active
        });
        ProgramResponse {
            id: program.id,
            title: program.title.to_string(),
            description: program.description.to_string(),
            benefits: program.benefits.iter().map(|b| b.to_string()).collect(),
            enrolled,
        }
    }
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(
        Enrollment {
            id,
            program_type,
            status,
            start_date,
            ..
        }: Enrollment,
    ) -> Self {
        EnrollmentResponse {
            id,
            program_type,
            status,
            start_date,
        }
    }
}

impl From<HealthStat> for HealthStatResponse {
    fn from(
        HealthStat {
            id,
            weight,
            steps,
            calories_burned,
            water_intake,
            bmi,
            recorded_at,
            ..
        }: HealthStat,
    ) -> Self {
        HealthStatResponse {
            id,
            weight,
            steps,
            calories_burned,
            water_intake,
            bmi,
            recorded_at: Some(recorded_at),
        }
    }
}

impl ProgressSummary {
    /// `stats` must be ordered oldest first.
    pub fn new(stats: Vec<HealthStat>) -> Self {
        let snapshot_count = stats.len();
        let hit_step_goal = stats.iter().any(|stat| stat.steps >= STEP_GOAL);
        let latest = stats
            .into_iter()
            .last()
            .map(HealthStatResponse::from)
            .unwrap_or_default();

        let milestones = [
            (
                "First Week Complete",
                snapshot_count >= FIRST_WEEK_SNAPSHOTS,
            ),
            ("10,000 Steps in a Day", hit_step_goal),
            (
                "Consistent for 30 Days",
                snapshot_count >= CONSISTENT_SNAPSHOTS,
            ),
            // No goal weight is stored anywhere yet.
            ("Goal Weight Reached", false),
        ]
        .into_iter()
        .map(|(title, achieved)| Milestone {
            title: title.to_string(),
            achieved,
        })
        .collect();

        ProgressSummary {
            latest,
            snapshot_count,
            milestones,
        }
    }
}

impl From<ScanRecord> for ScanRecordResponse {
    fn from(
        ScanRecord {
            id,
            image_url,
            detected_condition,
            confidence,
            prevention_tips,
            created_at,
            ..
        }: ScanRecord,
    ) -> Self {
        ScanRecordResponse {
            id,
            image_url,
            detected_condition,
            confidence,
            prevention_tips: prevention_tips.0,
            created_at,
        }
    }
}
