use serde::Serialize;
use uuid::Uuid;

use crate::analysis::MatchReport;
use crate::intake::resume::ResumeSummary;
use crate::notice::Notice;
use crate::wizard::session::{AnalysisStatus, Session};
use crate::wizard::step::Step;

/// Which tabs a client may switch to right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tabs {
    pub upload: bool,
    pub job: bool,
    pub results: bool,
}

/// Everything a client needs to render the wizard.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub session_id: Uuid,
    pub step: Step,
    pub tabs: Tabs,
    pub resume: Option<ResumeSummary>,
    pub job_text: String,
    pub analysis: AnalysisStatus,
    pub report: Option<MatchReport>,
    pub notice: Option<Notice>,
}

impl From<&Session> for WizardView {
    fn from(session: &Session) -> Self {
        let wizard = &session.wizard;
        WizardView {
            session_id: session.id,
            step: wizard.step(),
            tabs: Tabs {
                upload: wizard.is_unlocked(Step::Upload),
                job: wizard.is_unlocked(Step::Job),
                results: wizard.is_unlocked(Step::Results),
            },
            resume: wizard.resume().map(|r| r.summary()),
            job_text: wizard.job_text().to_string(),
            analysis: session.analysis.clone(),
            report: wizard.report().cloned(),
            notice: session.notice.clone(),
        }
    }
}
