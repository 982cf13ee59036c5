//! Axum route handlers for the wizard API.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::runner::start_analysis;
use crate::errors::AppError;
use crate::intake::{IntakeError, ResumeFile, UploadCandidate};
use crate::notice::Notice;
use crate::state::AppState;
use crate::wizard::session::SessionStore;
use crate::wizard::step::Step;
use crate::wizard::view::WizardView;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub step: Step,
}

#[derive(Debug, Deserialize)]
pub struct JobTextRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
}

/// Multipart field that carries the résumé.
const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create(State(state): State<AppState>) -> (StatusCode, Json<WizardView>) {
    (StatusCode::CREATED, Json(state.sessions.create().await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(state.sessions.view(session_id).await?))
}

/// DELETE /api/v1/sessions/:id
///
/// Discards the session and aborts any analysis still running for it.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/step
pub async fn handle_navigate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            session.wizard.go_to(request.step)?;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/resume
///
/// Multipart upload; the `file` field must declare `application/pdf`. A rejected file
/// leaves the wizard as it was and only replaces the session's notice.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<WizardView>, AppError> {
    // Unknown sessions fail before the body is read.
    state.sessions.view(session_id).await?;

    let candidate = surface_rejection(
        &state.sessions,
        session_id,
        read_file_field(multipart).await,
    )
    .await?;
    let submitted = ResumeFile::submit(candidate)
        .inspect_err(|e| warn!(%session_id, error = %e, "resume rejected"))
        .map_err(AppError::from);
    let resume = surface_rejection(&state.sessions, session_id, submitted).await?;

    let view = state
        .sessions
        .update(session_id, move |session| {
            info!(
                %session_id,
                file = %resume.name,
                bytes = resume.size(),
                "resume accepted"
            );
            session.notice = Some(resume.accepted_notice());
            session.wizard.accept_resume(resume);
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id/resume
pub async fn handle_remove_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            if let Some(removed) = session.wizard.remove_resume() {
                info!(%session_id, file = %removed.name, "resume removed");
            }
            session.notice = None;
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/job
///
/// Stores draft text as typed. Blank text is allowed here; it is rejected at analysis time.
pub async fn handle_set_job(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<JobTextRequest>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            session.wizard.set_job_text(request.text);
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/analyze
///
/// Starts an analysis and answers immediately; poll the session for the result.
///
/// A request without a JSON body analyzes the stored text. A body that is present but
/// malformed is rejected.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let text = match request {
        Ok(Json(request)) => request.text,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            let err = AppError::Validation(Notice::error("Invalid request", rejection.body_text()));
            return surface_rejection(&state.sessions, session_id, Err(err)).await;
        }
    };
    let started =
        start_analysis(&state.sessions, state.analyzer.clone(), session_id, text).await;
    let view = surface_rejection(&state.sessions, session_id, started).await?;
    Ok((StatusCode::ACCEPTED, Json(view)))
}

/// DELETE /api/v1/sessions/:id/analyze
pub async fn handle_cancel_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            session.cancel_analysis();
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/demo
pub async fn handle_demo(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            session.load_demo();
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}

/// Shows a validation failure's notice on the session without touching the wizard.
async fn surface_rejection<T>(
    sessions: &SessionStore,
    session_id: Uuid,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    if let Err(AppError::Validation(notice)) = &result {
        let notice = notice.clone();
        sessions
            .update(session_id, move |session| {
                session.notice = Some(notice);
                Ok(())
            })
            .await?;
    }
    result
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadCandidate, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(malformed_upload)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(malformed_upload)?;
        return Ok(UploadCandidate {
            name,
            content_type,
            data,
        });
    }
    Err(IntakeError::MissingFile.into())
}

fn malformed_upload(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(Notice::error(
        "Invalid upload",
        format!("Malformed upload: {err}"),
    ))
}
