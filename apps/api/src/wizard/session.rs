//! In-memory wizard sessions.
//!
//! One `Session` per visitor, keyed by UUID. Nothing is persisted: a restart discards every
//! session, the way a page reload discards browser state. Idle sessions are swept.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::MatchReport;
use crate::errors::AppError;
use crate::notice::Notice;
use crate::wizard::demo::{demo_notice, demo_report, demo_resume, SAMPLE_JOB_DESCRIPTION};
use crate::wizard::step::Wizard;
use crate::wizard::view::WizardView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisStatus {
    Idle,
    Running {
        started_at: DateTime<Utc>,
    },
    Completed {
        finished_at: DateTime<Utc>,
    },
    Failed {
        message: String,
        finished_at: DateTime<Utc>,
    },
}

#[derive(Debug)]
struct RunningAnalysis {
    run_id: Uuid,
    abort: AbortHandle,
    /// Status to restore if the run is cancelled.
    prior: AnalysisStatus,
}

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub wizard: Wizard,
    pub analysis: AnalysisStatus,
    /// Latest notification; replaced by the next one.
    pub notice: Option<Notice>,
    last_seen: Instant,
    running: Option<RunningAnalysis>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            wizard: Wizard::default(),
            analysis: AnalysisStatus::Idle,
            notice: None,
            last_seen: Instant::now(),
            running: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    pub fn begin_analysis(&mut self, run_id: Uuid, abort: AbortHandle) {
        let prior = std::mem::replace(
            &mut self.analysis,
            AnalysisStatus::Running {
                started_at: Utc::now(),
            },
        );
        self.running = Some(RunningAnalysis {
            run_id,
            abort,
            prior,
        });
    }

    /// Aborts the in-flight analysis, if any, and restores the status it replaced.
    /// Returns whether one was running.
    pub fn cancel_analysis(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };
        running.abort.abort();
        self.analysis = running.prior;
        info!(session_id = %self.id, run_id = %running.run_id, "analysis cancelled");
        true
    }

    /// Applies a finished run. Results from a run that is no longer current are dropped.
    pub fn finish_analysis(&mut self, run_id: Uuid, result: Result<MatchReport, AppError>) -> bool {
        match &self.running {
            Some(running) if running.run_id == run_id => {}
            _ => return false,
        }
        self.running = None;

        match result {
            Ok(report) => {
                info!(
                    session_id = %self.id,
                    %run_id,
                    match_score = report.match_score,
                    "analysis complete"
                );
                self.notice = Some(Notice::info(
                    "Analysis complete",
                    format!("Match score: {}%", report.match_score),
                ));
                self.wizard.complete_analysis(report);
                self.analysis = AnalysisStatus::Completed {
                    finished_at: Utc::now(),
                };
            }
            Err(e) => {
                let message = match e {
                    AppError::Analysis(msg) => msg,
                    other => other.to_string(),
                };
                warn!(session_id = %self.id, %run_id, error = %message, "analysis failed");
                self.notice = Some(Notice::error("Analysis failed", message.clone()));
                self.analysis = AnalysisStatus::Failed {
                    message,
                    finished_at: Utc::now(),
                };
            }
        }
        true
    }

    /// Populates every payload with the fixed sample data and jumps to results.
    pub fn load_demo(&mut self) {
        self.cancel_analysis();
        self.wizard.load(
            demo_resume(),
            SAMPLE_JOB_DESCRIPTION.to_string(),
            demo_report(),
        );
        self.analysis = AnalysisStatus::Completed {
            finished_at: Utc::now(),
        };
        self.notice = Some(demo_notice());
        info!(session_id = %self.id, "demo loaded");
    }

    pub fn view(&self) -> WizardView {
        WizardView::from(self)
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to all live sessions. Cheap to clone.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> WizardView {
        let session = Session::new();
        let view = session.view();
        self.sessions.write().await.insert(session.id, session);
        info!(session_id = %view.session_id, "session created");
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<WizardView, AppError> {
        self.update(id, |session| Ok(session.view())).await
    }

    /// Runs `f` against one session under the write lock. Counts as activity for expiry.
    pub async fn update<R, F>(&self, id: Uuid, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Session) -> Result<R, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.touch();
        f(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.cancel_analysis();
        info!(session_id = %id, "session discarded");
        Ok(())
    }

    /// Called by a finished analysis task.
    pub async fn complete_analysis(
        &self,
        id: Uuid,
        run_id: Uuid,
        result: Result<MatchReport, AppError>,
    ) {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&id) else {
            debug!(session_id = %id, %run_id, "session gone; dropping analysis result");
            return;
        };
        if !session.finish_analysis(run_id, result) {
            debug!(session_id = %id, %run_id, "stale analysis result dropped");
        }
    }

    /// Removes sessions idle for longer than `ttl`, cancelling their analyses.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let expired: Vec<Uuid> = sessions
            .values()
            .filter(|s| now.duration_since(s.last_seen) > ttl)
            .map(|s| s.id)
            .collect();

        for id in &expired {
            if let Some(mut session) = sessions.remove(id) {
                session.cancel_analysis();
            }
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "expired sessions swept");
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

pub fn spawn_sweeper(store: SessionStore, ttl: Duration, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = store.sweep_expired(ttl).await;
            if removed > 0 {
                let remaining = store.len().await;
                info!(removed, remaining, "session sweep");
            }
        }
    })
}
