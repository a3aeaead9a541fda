use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::submission::{
    DeleteResponse, SubmissionDetailResponse, SubmissionListResponse, SubmissionResponse,
};
use crate::state::AppState;

/// List the caller's own submissions.
#[utoipa::path(
    get,
    path = "/my",
    tag = "Submissions",
    operation_id = "listMySubmissions",
    summary = "List the caller's submission history",
    description = "Returns the caller's own submissions, newest first, capped at 50. \
                   Ownership is filtered in the query, never client-side.",
    responses(
        (status = 200, description = "The caller's submissions", body = SubmissionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (SERVICE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_submissions(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    let submissions = state.store.find_by_owner(auth_user.user_id).await?;

    Ok(Json(SubmissionListResponse {
        submissions: submissions.into_iter().map(SubmissionResponse::from).collect(),
    }))
}

/// Fetch a single submission by internal id.
///
/// No authentication and no ownership check: this mirrors the original
/// public contract. It exposes full records behind sequential ids, which
/// undercuts the unguessable share tokens; `/compile/share/{share_id}` is
/// the intended public surface.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get a submission by id",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "The submission", body = SubmissionDetailResponse),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (SERVICE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(submission_id = %id))]
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionDetailResponse>, AppError> {
    let submission = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    Ok(Json(SubmissionDetailResponse {
        submission: SubmissionResponse::from(submission),
    }))
}

/// Delete one of the caller's submissions.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "deleteSubmission",
    summary = "Delete one of the caller's submissions",
    description = "Deletes the submission only if the caller owns it. A submission that \
                   does not exist and one owned by someone else both report 404, so the \
                   endpoint never confirms foreign records exist.",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (SERVICE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(submission_id = %id, user_id = auth_user.user_id))]
pub async fn delete_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete_by_owner(id, auth_user.user_id).await?;

    if !deleted {
        return Err(AppError::NotFound(
            "Submission not found or unauthorized".into(),
        ));
    }

    Ok(Json(DeleteResponse {
        message: "Submission deleted",
    }))
}
