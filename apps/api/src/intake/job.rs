use crate::intake::IntakeError;

/// Job-description text that has passed the non-blank check.
///
/// The original text is kept as typed; only the check trims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn parse(text: impl Into<String>) -> Result<Self, IntakeError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(IntakeError::BlankJobDescription);
        }
        Ok(JobDescription(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
