use axum::Json;
use axum::extract::{Path, State};
use common::{ExecutionRequest, Language};
use tracing::{info, instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::MaybeAuthUser;
use crate::extractors::json::AppJson;
use crate::models::execute::{
    ModeResponse, RunRequest, RunResponse, ShareResponse, TemplateResponse, validate_run_request,
};
use crate::state::AppState;
use crate::store::NewSubmission;

/// Run code through the simulated-execution engine.
///
/// The request moves through `validating -> executing -> persisting ->
/// responding`. Only validation can fail the request: the engine folds its
/// own failures into the result, and persistence is best-effort, degrading
/// the response (null ids) instead of failing it.
#[utoipa::path(
    post,
    path = "/run",
    tag = "Compile",
    operation_id = "runCode",
    summary = "Execute code via AI simulation",
    description = "Simulates running the submitted code and records the attempt. Anonymous \
                   calls are allowed; a bearer token attaches the submission to the caller.",
    request_body = RunRequest,
    responses(
        (status = 200, description = "Simulation result (including failed program runs)", body = RunResponse),
        (status = 400, description = "Missing code or unsupported language (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Present but invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, maybe_user, payload), fields(language = %payload.language))]
pub async fn run(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<RunRequest>,
) -> Result<Json<RunResponse>, AppError> {
    let language = validate_run_request(&payload)?;

    let request = ExecutionRequest {
        code: payload.code,
        language,
        stdin: payload.input.unwrap_or_default(),
    };

    info!(language = %language, "executing code via simulation engine");
    let result = state.engine.execute(&request).await;

    let record = match state
        .store
        .create(NewSubmission {
            user_id: maybe_user.user_id(),
            code: request.code,
            language,
            stdin: request.stdin,
            output: result.output.clone(),
            status: result.status,
            execution_time_ms: Some(result.execution_time_ms),
            memory_kb: Some(result.memory_kb),
        })
        .await
    {
        Ok(stored) => Some(stored),
        Err(err) => {
            // The user still gets their output; only the share link is lost.
            warn!(error = %err, "could not persist submission");
            None
        }
    };

    Ok(Json(RunResponse::from_parts(result, record.as_ref())))
}

/// Default starter template for a language.
#[utoipa::path(
    get,
    path = "/template/{language}",
    tag = "Compile",
    operation_id = "getTemplate",
    summary = "Get the starter snippet for a language",
    params(
        ("language" = String, Path, description = "Language identifier (c, cpp, python, java, javascript)")
    ),
    responses(
        (status = 200, description = "Starter snippet", body = TemplateResponse),
        (status = 400, description = "Unsupported language (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument]
pub async fn get_template(Path(language): Path<String>) -> Result<Json<TemplateResponse>, AppError> {
    let language: Language = language
        .parse()
        .map_err(|e: common::language::ParseLanguageError| AppError::Validation(e.to_string()))?;

    Ok(Json(TemplateResponse {
        template: language.template().to_string(),
    }))
}

/// Report whether the AI integration is configured.
#[utoipa::path(
    get,
    path = "/mode",
    tag = "Compile",
    operation_id = "getMode",
    summary = "Check whether AI execution is configured",
    responses(
        (status = 200, description = "Current engine mode", body = ModeResponse),
    ),
)]
pub async fn get_mode(State(state): State<AppState>) -> Json<ModeResponse> {
    Json(ModeResponse::from(state.engine.mode()))
}

/// Fetch a shared submission by its share token.
///
/// Unauthenticated by design; returns only display-safe fields and never
/// re-executes anything.
#[utoipa::path(
    get,
    path = "/share/{share_id}",
    tag = "Compile",
    operation_id = "getSharedCode",
    summary = "Fetch shared code by share token",
    params(
        ("share_id" = String, Path, description = "Share token from a share link")
    ),
    responses(
        (status = 200, description = "Shared code and its recorded output", body = ShareResponse),
        (status = 404, description = "Unknown share token (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (SERVICE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_shared(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<ShareResponse>, AppError> {
    let submission = state
        .store
        .find_by_share_id(&share_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Code not found".into()))?;

    Ok(Json(ShareResponse::from(submission)))
}
