//! Intake: validated acceptance of user input into wizard state.
//!
//! Two inputs exist: the résumé file and the job-description text. Both reject
//! bad input with an `IntakeError` that carries its own user-facing notice and
//! never touches the wizard.

pub mod job;
pub mod resume;

use thiserror::Error;

use crate::notice::Notice;

pub use job::JobDescription;
pub use resume::{ResumeFile, UploadCandidate, ACCEPTED_MEDIA_TYPE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("unsupported media type '{content_type}' (expected {ACCEPTED_MEDIA_TYPE})")]
    UnsupportedType { content_type: String },

    #[error("no file was provided")]
    MissingFile,

    #[error("job description is blank")]
    BlankJobDescription,
}

impl IntakeError {
    pub fn notice(&self) -> Notice {
        match self {
            IntakeError::UnsupportedType { .. } => {
                Notice::error("Invalid file", "Please upload a PDF file.")
            }
            IntakeError::MissingFile => {
                Notice::error("Missing file", "Please choose a PDF file to upload.")
            }
            IntakeError::BlankJobDescription => Notice::error(
                "Missing information",
                "Please paste a job description to analyze.",
            ),
        }
    }
}
