use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::tracker::{step_by_id, step_number, ArtifactRecord, BuildStep, StepStatus, SubmissionLinks};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepListResponse {
    pub steps: Vec<StepStatus>,
    pub completed: usize,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDetail {
    pub number: usize,
    #[serde(flatten)]
    pub step: BuildStep,
    pub complete: bool,
    pub artifact: Option<ArtifactRecord>,
    pub previous_step_complete: bool,
    pub can_navigate_next: bool,
}

#[derive(Deserialize)]
pub struct DraftQuery {
    #[serde(default)]
    pub draft: String,
}

#[derive(Deserialize)]
pub struct ArtifactRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct SubmissionResponse {
    pub submission: String,
}

/// GET /api/v1/tracker/steps
pub async fn handle_list_steps(State(state): State<AppState>) -> Json<StepListResponse> {
    let steps = state.tracker.all_steps_status().await;
    let completed = steps.iter().filter(|s| s.complete).count();
    Json(StepListResponse {
        total: steps.len(),
        completed,
        steps,
    })
}

/// GET /api/v1/tracker/steps/:id?draft=
pub async fn handle_get_step(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DraftQuery>,
) -> Result<Json<StepDetail>, AppError> {
    let step = step_by_id(&id).ok_or_else(|| AppError::NotFound(format!("Step {id} not found")))?;
    let tracker = &state.tracker;
    let artifact = tracker.artifact(&id).await;

    Ok(Json(StepDetail {
        number: step_number(&id),
        step: *step,
        complete: artifact.is_some(),
        artifact,
        previous_step_complete: tracker.is_previous_step_complete(&id).await,
        can_navigate_next: tracker.can_navigate_next(&id, &params.draft).await,
    }))
}

/// PUT /api/v1/tracker/steps/:id/artifact
pub async fn handle_save_artifact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ArtifactRequest>,
) -> Result<Json<ArtifactRecord>, AppError> {
    let record = state.tracker.save_artifact(&id, &req.content).await?;
    Ok(Json(record))
}

/// POST /api/v1/tracker/submission
pub async fn handle_submission(
    State(state): State<AppState>,
    Json(links): Json<SubmissionLinks>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let submission = state.tracker.submission(&links).await?;
    Ok(Json(SubmissionResponse { submission }))
}
