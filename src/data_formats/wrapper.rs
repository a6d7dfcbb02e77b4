use serde::{Deserialize, Serialize};

use super::response::{
    ConversationResponse, DiaryResponse, EnrollmentResponse, HealthStatResponse, PostResponse,
    ProgramResponse, ProgressSummary, ReplyResponse, ScanRecordResponse,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper<T> {
    pub user: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConversationWrapper {
    pub conversation: Option<ConversationResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostWrapper {
    pub post: PostResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostDetailWrapper {
    pub post: PostResponse,
    pub replies: Vec<ReplyResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultiplePostsWrapper {
    pub posts: Vec<PostResponse>,
    pub posts_count: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyWrapper {
    pub reply: ReplyResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DiaryWrapper {
    pub diary: DiaryResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleDiaryEntriesWrapper {
    pub entries: Vec<DiaryResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProgramsWrapper {
    pub programs: Vec<ProgramResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EnrollmentWrapper {
    pub enrollment: EnrollmentResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleEnrollmentsWrapper {
    pub enrollments: Vec<EnrollmentResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatWrapper {
    pub stat: HealthStatResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleStatsWrapper {
    pub stats: Vec<HealthStatResponse>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProgressWrapper {
    pub progress: ProgressSummary,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MultipleScansWrapper {
    pub scans: Vec<ScanRecordResponse>,
}

impl<T> UserWrapper<T> {
    pub fn wrap_with_user_data(request: T) -> UserWrapper<T> {
        UserWrapper { user: request }
    }
}
