use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{BulletReview, Derivation};
use crate::errors::AppError;
use crate::models::ResumeModel;
use crate::render::{ColorTheme, PlainTextExport, RenderedResume, TemplateName};
use crate::session::{ResumeAction, SessionSnapshot, SkillSuggestOutcome};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResumeWithDerivation {
    pub model: ResumeModel,
    pub derivation: Derivation,
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
    pub theme: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateSelection {
    pub template: String,
}

#[derive(Deserialize)]
pub struct ThemeSelection {
    pub theme: String,
}

fn with_derivation(state: &AppState, model: ResumeModel) -> Json<ResumeWithDerivation> {
    let derivation = state.session.engine().derive(&model);
    Json(ResumeWithDerivation { model, derivation })
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

/// PUT /api/v1/resume
/// Accepts any known persisted shape; the body is normalized before storing.
pub async fn handle_replace_resume(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<ResumeWithDerivation>, AppError> {
    let model = state.session.replace(&raw).await?;
    Ok(with_derivation(&state, model))
}

/// DELETE /api/v1/resume
pub async fn handle_reset_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeWithDerivation>, AppError> {
    let model = state.session.reset().await?;
    Ok(with_derivation(&state, model))
}

/// POST /api/v1/resume/actions
pub async fn handle_apply_action(
    State(state): State<AppState>,
    Json(action): Json<ResumeAction>,
) -> Result<Json<ResumeWithDerivation>, AppError> {
    let model = state.session.apply(action).await?;
    Ok(with_derivation(&state, model))
}

/// GET /api/v1/resume/derivation
pub async fn handle_get_derivation(State(state): State<AppState>) -> Json<Derivation> {
    Json(state.session.derivation().await)
}

/// GET /api/v1/resume/bullets
pub async fn handle_get_bullets(State(state): State<AppState>) -> Json<Vec<BulletReview>> {
    Json(state.session.bullets().await)
}

/// GET /api/v1/resume/preview?template=&theme=
/// Query values override the stored selection for this render only.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewQuery>,
) -> Json<RenderedResume> {
    let template = params.template.as_deref().map(TemplateName::parse_lenient);
    let theme = params.theme.as_deref().map(ColorTheme::parse_lenient);
    Json(state.session.preview(template, theme).await)
}

/// PUT /api/v1/resume/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateSelection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .session
        .set_template(TemplateName::parse_lenient(&req.template))
        .await?;
    Ok(Json(state.session.snapshot().await))
}

/// PUT /api/v1/resume/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeSelection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .session
        .set_theme(ColorTheme::parse_lenient(&req.theme))
        .await?;
    Ok(Json(state.session.snapshot().await))
}

/// GET /api/v1/resume/export
pub async fn handle_export(State(state): State<AppState>) -> Json<PlainTextExport> {
    Json(state.session.export().await)
}

/// POST /api/v1/resume/skills/suggest
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
) -> Result<Json<SkillSuggestOutcome>, AppError> {
    let outcome = state
        .session
        .suggest_skills(state.skill_suggester.as_ref())
        .await?;
    Ok(Json(outcome))
}
