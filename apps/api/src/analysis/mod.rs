//! Analysis: turns an accepted résumé and job description into a `MatchReport`.
//!
//! `Analyzer` is the seam: `AppState` holds an `Arc<dyn Analyzer>` chosen at startup
//! (`ANALYZER=keyword|sample`). The runner spawns analyses as cancellable tasks.

pub mod jd_parser;
pub mod keyword;
pub mod report;
pub mod runner;
pub mod sample;
pub mod skills;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AnalyzerBackend, Config};
use crate::errors::AppError;
use crate::intake::{JobDescription, ResumeFile};

pub use keyword::KeywordAnalyzer;
pub use report::MatchReport;
pub use sample::SampleAnalyzer;

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Short label for logs ("keyword" | "sample").
    fn backend(&self) -> &'static str;

    async fn analyze(
        &self,
        resume: &ResumeFile,
        job: &JobDescription,
    ) -> Result<MatchReport, AppError>;
}

pub fn build_analyzer(config: &Config) -> Arc<dyn Analyzer> {
    match config.analyzer {
        AnalyzerBackend::Keyword => Arc::new(KeywordAnalyzer),
        AnalyzerBackend::Sample => Arc::new(SampleAnalyzer {
            delay: config.analysis_delay,
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::Analyzer;
    use crate::analysis::sample::sample_report;
    use crate::analysis::MatchReport;
    use crate::errors::AppError;
    use crate::intake::{JobDescription, ResumeFile};

    /// Sample analyzer that records whether a run got past its delay.
    pub struct TrackingAnalyzer {
        delay: Duration,
        finished: Arc<AtomicBool>,
    }

    impl TrackingAnalyzer {
        pub fn new(delay: Duration) -> (Arc<Self>, Arc<AtomicBool>) {
            let finished = Arc::new(AtomicBool::new(false));
            let analyzer = TrackingAnalyzer {
                delay,
                finished: finished.clone(),
            };
            (Arc::new(analyzer), finished)
        }
    }

    #[async_trait]
    impl Analyzer for TrackingAnalyzer {
        fn backend(&self) -> &'static str {
            "tracking"
        }

        async fn analyze(
            &self,
            _resume: &ResumeFile,
            _job: &JobDescription,
        ) -> Result<MatchReport, AppError> {
            tokio::time::sleep(self.delay).await;
            self.finished.store(true, Ordering::SeqCst);
            Ok(sample_report())
        }
    }
}
