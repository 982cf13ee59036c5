use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::MatchReport;
use crate::intake::ResumeFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Upload,
    Job,
    Results,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Upload => "upload",
            Step::Job => "job",
            Step::Results => "results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the {step} step is locked: {reason}")]
pub struct StepLocked {
    pub step: Step,
    pub reason: &'static str,
}

/// The three-step wizard: upload -> job -> results.
///
/// Fields are private so every mutation goes through a guarded method. The invariants:
/// `step == Job` implies a résumé exists, `step == Results` implies a report exists.
/// Moving backwards clears nothing.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    resume: Option<ResumeFile>,
    job_text: String,
    report: Option<MatchReport>,
}

impl Default for Wizard {
    fn default() -> Self {
        Wizard {
            step: Step::Upload,
            resume: None,
            job_text: String::new(),
            report: None,
        }
    }
}

impl Wizard {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn job_text(&self) -> &str {
        &self.job_text
    }

    pub fn report(&self) -> Option<&MatchReport> {
        self.report.as_ref()
    }

    pub fn check(&self, step: Step) -> Result<(), StepLocked> {
        match step {
            Step::Upload => Ok(()),
            Step::Job if self.resume.is_none() => Err(StepLocked {
                step,
                reason: "upload a PDF resume first",
            }),
            Step::Results if self.report.is_none() => Err(StepLocked {
                step,
                reason: "no analysis has completed yet",
            }),
            Step::Job | Step::Results => Ok(()),
        }
    }

    pub fn is_unlocked(&self, step: Step) -> bool {
        self.check(step).is_ok()
    }

    pub fn go_to(&mut self, step: Step) -> Result<(), StepLocked> {
        self.check(step)?;
        self.step = step;
        Ok(())
    }

    /// Stores (or replaces) the résumé. The step does not change.
    pub fn accept_resume(&mut self, resume: ResumeFile) {
        self.resume = Some(resume);
    }

    /// Resets file intake to empty. Leaves the job step if it is no longer reachable.
    pub fn remove_resume(&mut self) -> Option<ResumeFile> {
        let removed = self.resume.take();
        if self.step == Step::Job {
            self.step = Step::Upload;
        }
        removed
    }

    pub fn set_job_text(&mut self, text: impl Into<String>) {
        self.job_text = text.into();
    }

    pub fn complete_analysis(&mut self, report: MatchReport) {
        self.report = Some(report);
        self.step = Step::Results;
    }

    /// Replaces every payload and jumps straight to results, regardless of prior state.
    pub fn load(&mut self, resume: ResumeFile, job_text: String, report: MatchReport) {
        self.resume = Some(resume);
        self.job_text = job_text;
        self.report = Some(report);
        self.step = Step::Results;
    }
}
