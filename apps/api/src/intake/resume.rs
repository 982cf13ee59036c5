use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::intake::IntakeError;
use crate::notice::Notice;

/// The only media type file intake accepts.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// A file as it arrives from the client, before validation.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// An accepted résumé. Contents are opaque to intake.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

/// What a wizard view shows about the current résumé.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub name: String,
    pub content_type: String,
    pub size_bytes: usize,
    /// Size in KiB with two decimals, e.g. "12.50".
    pub size_kb: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeFile {
    /// Validates a candidate and turns it into an accepted file.
    ///
    /// Only the declared media type is checked; parameters (`; charset=...`) and case are
    /// ignored. There is no size limit and no content inspection here.
    pub fn submit(candidate: UploadCandidate) -> Result<ResumeFile, IntakeError> {
        let declared = candidate.content_type.unwrap_or_default();
        if !is_pdf_media_type(&declared) {
            return Err(IntakeError::UnsupportedType {
                content_type: declared,
            });
        }

        Ok(ResumeFile {
            name: display_name(&candidate.name),
            content_type: ACCEPTED_MEDIA_TYPE.to_string(),
            data: candidate.data,
            uploaded_at: Utc::now(),
        })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size_bytes: self.size(),
            size_kb: format!("{:.2}", self.size() as f64 / 1024.0),
            uploaded_at: self.uploaded_at,
        }
    }

    pub fn accepted_notice(&self) -> Notice {
        Notice::info("Resume uploaded", format!("{} is ready for analysis.", self.name))
    }
}

fn is_pdf_media_type(declared: &str) -> bool {
    let essence = declared.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case(ACCEPTED_MEDIA_TYPE)
}

fn display_name(raw: &str) -> String {
    // Browsers may send a full path on some platforms.
    let base = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw).trim();
    if base.is_empty() {
        "resume.pdf".to_string()
    } else {
        base.to_string()
    }
}
