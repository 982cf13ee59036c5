//! SampleAnalyzer: simulated latency followed by a constant report.
//!
//! Both inputs are ignored. Useful for demos and for exercising the wizard without real PDFs.

use std::time::Duration;

use async_trait::async_trait;

use crate::analysis::report::owned;
use crate::analysis::{Analyzer, MatchReport};
use crate::errors::AppError;
use crate::intake::{JobDescription, ResumeFile};

pub struct SampleAnalyzer {
    pub delay: Duration,
}

/// The constant report every sample analysis resolves with.
pub fn sample_report() -> MatchReport {
    MatchReport {
        match_score: 78,
        experience_score: 85,
        education_score: 90,
        matched_skills: owned(&["React", "JavaScript", "Node.js", "Python", "SQL", "AWS"]),
        missing_skills: owned(&["Kubernetes", "Docker", "GraphQL", "TypeScript"]),
        recommended_skills: owned(&["Docker", "Kubernetes", "TypeScript", "GraphQL", "MongoDB"]),
    }
}

#[async_trait]
impl Analyzer for SampleAnalyzer {
    fn backend(&self) -> &'static str {
        "sample"
    }

    async fn analyze(
        &self,
        _resume: &ResumeFile,
        _job: &JobDescription,
    ) -> Result<MatchReport, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(sample_report())
    }
}
