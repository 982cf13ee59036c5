//! Axum route handlers for resource lookup.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::ResourceLookup;
use crate::errors::AppError;
use crate::state::AppState;
use crate::wizard::step::{Step, StepLocked};

#[derive(Debug, Deserialize)]
pub struct SkillsQuery {
    /// Comma-separated skill names.
    #[serde(default)]
    pub skills: String,
}

/// GET /api/v1/resources?skills=Docker,TypeScript
pub async fn handle_lookup(
    State(state): State<AppState>,
    Query(query): Query<SkillsQuery>,
) -> Json<ResourceLookup> {
    let skills: Vec<&str> = query
        .skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    Json(state.catalog.lookup(&skills))
}

/// GET /api/v1/sessions/:id/resources
///
/// Resources for the session report's missing and recommended skills.
pub async fn handle_session_resources(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResourceLookup>, AppError> {
    let skills = state
        .sessions
        .update(session_id, |session| {
            let report = session.wizard.report().ok_or(StepLocked {
                step: Step::Results,
                reason: "no analysis has completed yet",
            })?;
            Ok(report.skills_to_learn())
        })
        .await?;

    Ok(Json(state.catalog.lookup(&skills)))
}
