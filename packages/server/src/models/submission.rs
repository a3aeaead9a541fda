use chrono::{DateTime, Utc};
use common::{ExecutionStatus, Language};
use serde::Serialize;

use crate::entity::submission;

/// Full submission record, as returned by history and id lookups.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    #[schema(example = 1)]
    pub id: i32,
    /// Public share token for this submission.
    #[schema(example = "k3v9x2ab")]
    pub share_id: String,
    /// Owner id, null for anonymous submissions.
    pub user_id: Option<i32>,
    pub code: String,
    pub language: Language,
    /// Numeric execution-engine id derived from the language.
    #[schema(example = 71)]
    pub engine_id: i32,
    pub input: String,
    pub output: String,
    pub status: ExecutionStatus,
    /// Milliseconds spent in the simulation call, null if unrecorded.
    pub execution_time: Option<i32>,
    /// Simulated memory figure in kilobytes, null if unrecorded.
    pub memory: Option<i32>,
    #[schema(example = "2026-08-01T14:30:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(model: submission::Model) -> Self {
        Self {
            id: model.id,
            share_id: model.share_id,
            user_id: model.user_id,
            code: model.code,
            language: model.language,
            engine_id: model.engine_id,
            input: model.stdin,
            output: model.output,
            status: model.status,
            execution_time: model.execution_time_ms,
            memory: model.memory_kb,
            created_at: model.created_at,
        }
    }
}

/// The caller's submission history.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionListResponse {
    /// Newest first, capped at 50.
    pub submissions: Vec<SubmissionResponse>,
}

/// Envelope for a single submission lookup.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionDetailResponse {
    pub submission: SubmissionResponse,
}

/// Confirmation of a deletion.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Submission deleted")]
    pub message: &'static str,
}
