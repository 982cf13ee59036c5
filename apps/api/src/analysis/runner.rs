//! Analysis runner: starts an analysis as a spawned task owned by its session.
//!
//! Each run gets a fresh `run_id` and its `AbortHandle` is parked in the session. Deleting the
//! session, loading the demo, an explicit cancel, or expiry all abort the task; a run that
//! finishes anyway can only apply its result while it is still the session's current run.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::analysis::Analyzer;
use crate::errors::AppError;
use crate::intake::JobDescription;
use crate::wizard::session::SessionStore;
use crate::wizard::step::{Step, StepLocked};
use crate::wizard::view::WizardView;

/// Validates the request and spawns the analysis. Returns the view in its busy state.
///
/// `text` overrides the stored job text; `None` analyzes what was stored earlier.
/// On any validation failure nothing in the session changes.
pub async fn start_analysis(
    store: &SessionStore,
    analyzer: Arc<dyn Analyzer>,
    session_id: Uuid,
    text: Option<String>,
) -> Result<WizardView, AppError> {
    let task_store = store.clone();

    store
        .update(session_id, move |session| {
            let job = JobDescription::parse(
                text.unwrap_or_else(|| session.wizard.job_text().to_string()),
            )?;
            let resume = session.wizard.resume().cloned().ok_or(StepLocked {
                step: Step::Job,
                reason: "upload a PDF resume first",
            })?;
            if session.is_busy() {
                return Err(AppError::Busy);
            }

            session.wizard.set_job_text(job.as_str());
            session.notice = None;

            let run_id = Uuid::new_v4();
            info!(
                %session_id,
                %run_id,
                backend = analyzer.backend(),
                file = %resume.name,
                "analysis started"
            );

            let handle = tokio::spawn(async move {
                let result = analyzer.analyze(&resume, &job).await;
                task_store.complete_analysis(session_id, run_id, result).await;
            });
            session.begin_analysis(run_id, handle.abort_handle());

            Ok(session.view())
        })
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;

    use crate::analysis::sample::{sample_report, SampleAnalyzer};
    use crate::analysis::testing::TrackingAnalyzer;
    use crate::intake::{ResumeFile, UploadCandidate};
    use crate::wizard::session::AnalysisStatus;

    const DELAY: Duration = Duration::from_millis(2000);

    fn analyzer() -> Arc<dyn Analyzer> {
        Arc::new(SampleAnalyzer { delay: DELAY })
    }

    async fn session_with_resume(store: &SessionStore) -> Uuid {
        let id = store.create().await.session_id;
        store
            .update(id, |s| {
                s.wizard.accept_resume(
                    ResumeFile::submit(UploadCandidate {
                        name: "cv.pdf".into(),
                        content_type: Some("application/pdf".into()),
                        data: Bytes::from_static(b"%PDF"),
                    })
                    .unwrap(),
                );
                s.wizard.go_to(Step::Job)?;
                Ok(())
            })
            .await
            .unwrap();
        id
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_completes_and_moves_to_results() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;

        let busy = start_analysis(&store, analyzer(), id, Some("Rust engineer".into()))
            .await
            .unwrap();
        assert!(matches!(busy.analysis, AnalysisStatus::Running { .. }));
        assert_eq!(busy.step, Step::Job);

        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;

        let done = store.view(id).await.unwrap();
        assert_eq!(done.step, Step::Results);
        assert_eq!(done.report, Some(sample_report()));
        assert!(done.tabs.results);
        assert_eq!(done.job_text, "Rust engineer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_text_changes_nothing() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;

        for blank in ["", "   \n\t"] {
            let err = start_analysis(&store, analyzer(), id, Some(blank.into()))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        let view = store.view(id).await.unwrap();
        assert_eq!(view.step, Step::Job);
        assert_eq!(view.analysis, AnalysisStatus::Idle);
        assert_eq!(view.job_text, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stored_text_used_when_no_override() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;
        store
            .update(id, |s| {
                s.wizard.set_job_text("Kubernetes operator");
                Ok(())
            })
            .await
            .unwrap();

        assert!(start_analysis(&store, analyzer(), id, None).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_requires_resume() {
        let store = SessionStore::new();
        let id = store.create().await.session_id;
        let err = start_analysis(&store, analyzer(), id, Some("Rust".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StepLocked(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_while_busy_is_rejected() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;
        start_analysis(&store, analyzer(), id, Some("Rust".into()))
            .await
            .unwrap();
        let err = start_analysis(&store, analyzer(), id, Some("Go".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Busy));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_run_never_mutates_session() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;
        start_analysis(&store, analyzer(), id, Some("Rust".into()))
            .await
            .unwrap();

        store.update(id, |s| Ok(s.cancel_analysis())).await.unwrap();
        tokio::time::sleep(DELAY * 2).await;

        let view = store.view(id).await.unwrap();
        assert_eq!(view.step, Step::Job);
        assert!(view.report.is_none());
        assert_eq!(view.analysis, AnalysisStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_removing_session_aborts_running_task() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;
        let (tracking, finished) = TrackingAnalyzer::new(DELAY);
        start_analysis(&store, tracking, id, Some("Rust".into()))
            .await
            .unwrap();

        store.remove(id).await.unwrap();
        tokio::time::sleep(DELAY * 2).await;

        assert!(!finished.load(Ordering::SeqCst));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uncancelled_task_runs_to_completion() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;
        let (tracking, finished) = TrackingAnalyzer::new(DELAY);
        start_analysis(&store, tracking, id, Some("Rust".into()))
            .await
            .unwrap();

        tokio::time::sleep(DELAY * 2).await;

        assert!(finished.load(Ordering::SeqCst));
        assert_eq!(store.view(id).await.unwrap().step, Step::Results);
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_during_analysis_wins() {
        let store = SessionStore::new();
        let id = session_with_resume(&store).await;
        start_analysis(&store, analyzer(), id, Some("Rust".into()))
            .await
            .unwrap();

        store
            .update(id, |s| {
                s.load_demo();
                Ok(())
            })
            .await
            .unwrap();
        tokio::time::sleep(DELAY * 2).await;

        let view = store.view(id).await.unwrap();
        assert_eq!(view.report, Some(crate::wizard::demo::demo_report()));
    }
}
