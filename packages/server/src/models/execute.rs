use common::{ExecutionResult, ExecutionStatus, Language};
use engine::EngineMode;
use serde::{Deserialize, Serialize};

use crate::entity::submission;
use crate::error::AppError;

/// Request body for a simulated run.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    /// Source code to execute.
    #[schema(example = "print('Hello, World!')")]
    pub code: String,
    /// Language identifier.
    #[schema(example = "python")]
    pub language: String,
    /// Stdin for the program, one value per line.
    #[serde(default)]
    pub input: Option<String>,
}

/// Validate a run request and resolve the language against the registry.
///
/// The same registry rejects here and on the template endpoint, so an
/// unsupported language fails identically everywhere.
pub fn validate_run_request(payload: &RunRequest) -> Result<Language, AppError> {
    if payload.code.trim().is_empty() {
        return Err(AppError::Validation("Code and language are required".into()));
    }

    payload
        .language
        .trim()
        .parse::<Language>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// Response for a run.
///
/// Always 200: a program that fails to "run" is a normal outcome, reported
/// through `status`/`success`, never as an HTTP error. `submissionId` and
/// `shareId` are null when the attempt could not be persisted.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub success: bool,
    pub status: ExecutionStatus,
    pub output: String,
    /// Milliseconds spent in the simulation call.
    #[schema(example = 412)]
    pub execution_time: i32,
    /// Simulated memory figure in kilobytes.
    #[schema(example = 2048)]
    pub memory: i32,
    /// ID of the stored submission, null when persistence was unavailable.
    pub submission_id: Option<i32>,
    /// Share token of the stored submission, null when persistence was
    /// unavailable.
    pub share_id: Option<String>,
}

impl RunResponse {
    pub fn from_parts(result: ExecutionResult, record: Option<&submission::Model>) -> Self {
        Self {
            success: result.success,
            status: result.status,
            output: result.output,
            execution_time: result.execution_time_ms,
            memory: result.memory_kb,
            submission_id: record.map(|r| r.id),
            share_id: record.map(|r| r.share_id.clone()),
        }
    }
}

/// Starter snippet for a language.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TemplateResponse {
    pub template: String,
}

/// Reports whether the upstream model integration is configured.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ModeResponse {
    /// `ai` when a provider key is configured, `demo` otherwise.
    #[schema(example = "ai")]
    pub mode: &'static str,
    #[schema(example = "Using AI simulation for code execution")]
    pub message: &'static str,
}

impl From<EngineMode> for ModeResponse {
    fn from(mode: EngineMode) -> Self {
        let message = match mode {
            EngineMode::Ai => "Using AI simulation for code execution",
            EngineMode::Demo => {
                "Running in demo mode; configure an API key to enable AI execution"
            }
        };
        Self {
            mode: mode.as_str(),
            message,
        }
    }
}

/// Display-safe view of a shared submission.
///
/// Deliberately excludes the owner, the internal id, and resource figures:
/// share links grant read access to the code and its output, nothing else.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub code: String,
    pub language: Language,
    pub input: String,
    pub output: String,
    pub status: ExecutionStatus,
}

impl From<submission::Model> for ShareResponse {
    fn from(model: submission::Model) -> Self {
        Self {
            code: model.code,
            language: model.language,
            input: model.stdin,
            output: model.output,
            status: model.status,
        }
    }
}
