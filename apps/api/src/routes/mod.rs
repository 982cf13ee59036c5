pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard sessions
        .route("/api/v1/sessions", post(wizard::handle_create))
        .route(
            "/api/v1/sessions/:id",
            get(wizard::handle_get).delete(wizard::handle_delete),
        )
        .route("/api/v1/sessions/:id/step", put(wizard::handle_navigate))
        .route(
            "/api/v1/sessions/:id/resume",
            post(wizard::handle_upload).delete(wizard::handle_remove_resume),
        )
        .route("/api/v1/sessions/:id/job", put(wizard::handle_set_job))
        .route(
            "/api/v1/sessions/:id/analyze",
            post(wizard::handle_analyze).delete(wizard::handle_cancel_analysis),
        )
        .route("/api/v1/sessions/:id/demo", post(wizard::handle_demo))
        .route(
            "/api/v1/sessions/:id/resources",
            get(catalog::handle_session_resources),
        )
        // Catalog
        .route("/api/v1/resources", get(catalog::handle_lookup))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
