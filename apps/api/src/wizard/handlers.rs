//! Axum route handlers for the wizard screens.
//!
//! Every command handler returns the session as it stands after the command.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, EntryKind};
use crate::state::AppState;
use crate::wizard::controller::{
    JobDescriptionInput, PersonalInfoInput, Session, SkillsInput, WizardError, WizardStep,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StepView {
    pub number: u8,
    pub key: WizardStep,
    pub title: &'static str,
}

impl From<WizardStep> for StepView {
    fn from(step: WizardStep) -> Self {
        Self {
            number: step.number(),
            key: step,
            title: step.title(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub current_step: StepView,
    pub steps: Vec<StepView>,
    pub record: CandidateRecord,
    pub documents_ready: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            current_step: session.current_step.into(),
            steps: WizardStep::ALL.into_iter().map(StepView::from).collect(),
            record: session.record.clone(),
            documents_ready: session.documents.is_some(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_role: String,
    pub years_of_experience: String,
    pub skills: String,
    pub experience_entries: usize,
    pub education_entries: usize,
    pub project_entries: usize,
    pub certification_entries: usize,
    pub has_job_description: bool,
}

#[derive(Debug, Deserialize)]
pub struct GotoRequest {
    pub step: i64,
}

#[derive(Debug, Serialize)]
pub struct EntryAddedResponse {
    pub index: usize,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create().await;
    info!(
        "Started wizard session {} ({} active)",
        session.id,
        state.sessions.active_count().await
    );
    (StatusCode::CREATED, Json(SessionView::from(&session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionView::from(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!("Ended wizard session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryView>, AppError> {
    let record = state.sessions.get(id).await?.record;
    Ok(Json(SummaryView {
        skills: record.skills_line(),
        experience_entries: record.experience.len(),
        education_entries: record.education.len(),
        project_entries: record.projects.len(),
        certification_entries: record.certifications.len(),
        has_job_description: !record.job_description.trim().is_empty(),
        name: record.name,
        email: record.email,
        phone: record.phone,
        current_role: record.current_role,
        years_of_experience: record.years_of_experience,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/next
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| s.next().map(|_| ())).await
}

/// POST /api/v1/sessions/:id/previous
pub async fn handle_previous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| {
        s.previous();
        Ok(())
    })
    .await
}

/// POST /api/v1/sessions/:id/goto
pub async fn handle_goto(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GotoRequest>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| s.goto(req.step).map(|_| ())).await
}

// ────────────────────────────────────────────────────────────────────────────
// Step fields
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PersonalInfoInput>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| {
        s.update_personal_info(req);
        Ok(())
    })
    .await
}

/// PUT /api/v1/sessions/:id/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SkillsInput>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| {
        s.update_skills(&req);
        Ok(())
    })
    .await
}

/// PUT /api/v1/sessions/:id/job-description
pub async fn handle_update_job_description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobDescriptionInput>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| {
        s.update_job_description(req);
        Ok(())
    })
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Entry lists
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/entries/:kind
///
/// `{}` appends a blank entry, like the "Add" buttons of the form.
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, EntryKind)>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<EntryAddedResponse>), AppError> {
    let (index, session) = state
        .sessions
        .update(id, |s| {
            let index = s.add_entry(kind, payload)?;
            Ok::<_, WizardError>((index, SessionView::from(&*s)))
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntryAddedResponse { index, session }),
    ))
}

/// PUT /api/v1/sessions/:id/entries/:kind/:index
pub async fn handle_replace_entry(
    State(state): State<AppState>,
    Path((id, kind, index)): Path<(Uuid, EntryKind, usize)>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| s.replace_entry(kind, index, payload)).await
}

/// DELETE /api/v1/sessions/:id/entries/:kind/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, kind, index)): Path<(Uuid, EntryKind, usize)>,
) -> Result<Json<SessionView>, AppError> {
    command(&state, id, |s| s.remove_entry(kind, index).map(|_| ())).await
}

/// Applies `f` to the session and returns the resulting view.
async fn command<F>(state: &AppState, id: Uuid, f: F) -> Result<Json<SessionView>, AppError>
where
    F: FnOnce(&mut Session) -> Result<(), WizardError>,
{
    let view = state
        .sessions
        .update(id, |s| {
            f(s)?;
            Ok::<_, WizardError>(SessionView::from(&*s))
        })
        .await?;
    Ok(Json(view))
}
