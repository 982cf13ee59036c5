//! KeywordAnalyzer: deterministic skill-overlap scoring between résumé text and a job description.
//!
//! Algorithm:
//! 1. Extract the résumé text from the PDF (`pdf-extract`, blocking thread).
//! 2. Parse the JD into weighted skills (`jd_parser`).
//! 3. match_score = Σ(weighted_score of skills found in the résumé) / Σ(weighted_score) × 100
//! 4. matched = JD skills in the résumé; missing = absent required skills;
//!    recommended = every absent skill, required first, each group by weighted score.
//! 5. Experience and education sub-scores compare stated years and degree levels.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::analysis::jd_parser::{degree_levels, parse_job, years_figures, DegreeLevel, JobSkill};
use crate::analysis::skills::find_skills;
use crate::analysis::{Analyzer, MatchReport};
use crate::errors::AppError;
use crate::intake::{JobDescription, ResumeFile};

pub struct KeywordAnalyzer;

#[async_trait]
impl Analyzer for KeywordAnalyzer {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    async fn analyze(
        &self,
        resume: &ResumeFile,
        job: &JobDescription,
    ) -> Result<MatchReport, AppError> {
        let resume_text = extract_resume_text(resume.data.clone()).await?;
        debug!(
            chars = resume_text.len(),
            file = %resume.name,
            "extracted resume text"
        );
        Ok(score_match(&resume_text, job.as_str()))
    }
}

/// Extracts the text layer of a PDF. Image-only PDFs yield an error, not an empty report.
pub async fn extract_resume_text(data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Analysis(format!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::Analysis(format!("Could not read the resume PDF: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Analysis(
            "No text could be extracted from the resume PDF".to_string(),
        ));
    }
    Ok(text)
}

/// Scores résumé text against a job description. Deterministic, no I/O.
pub fn score_match(resume_text: &str, job_text: &str) -> MatchReport {
    let parsed = parse_job(job_text);
    let resume_skills: Vec<&str> = find_skills(resume_text)
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    let (present, absent): (Vec<&JobSkill>, Vec<&JobSkill>) = parsed
        .skills
        .iter()
        .partition(|s| resume_skills.contains(&s.name));

    let total_weighted: f32 = parsed.skills.iter().map(|s| s.weighted_score).sum();
    let matched_weighted: f32 = present.iter().map(|s| s.weighted_score).sum();
    let match_score = if total_weighted > 0.0 {
        ((matched_weighted / total_weighted) * 100.0).round() as u32
    } else {
        0
    };

    let mut ranked_absent = absent;
    // Stable: ties keep first-appearance order.
    ranked_absent.sort_by(|a, b| {
        b.is_required
            .cmp(&a.is_required)
            .then(b.weighted_score.total_cmp(&a.weighted_score))
    });

    MatchReport {
        match_score: match_score.min(100),
        experience_score: experience_score(
            parsed.required_years,
            years_figures(resume_text).into_iter().max(),
        ),
        education_score: education_score(
            parsed.required_degree,
            degree_levels(resume_text).into_iter().max(),
        ),
        matched_skills: present.iter().map(|s| s.name.to_string()).collect(),
        missing_skills: ranked_absent
            .iter()
            .filter(|s| s.is_required)
            .map(|s| s.name.to_string())
            .collect(),
        recommended_skills: ranked_absent.iter().map(|s| s.name.to_string()).collect(),
    }
}

fn experience_score(required: Option<u32>, stated: Option<u32>) -> u32 {
    match (required, stated) {
        (None, _) => 100,
        (Some(_), None) => 50,
        (Some(required), Some(stated)) => {
            ((stated as f32 / required as f32) * 100.0).round().min(100.0) as u32
        }
    }
}

fn education_score(required: Option<DegreeLevel>, held: Option<DegreeLevel>) -> u32 {
    match (required, held) {
        (None, _) => 100,
        (Some(_), None) => 40,
        (Some(required), Some(held)) => match required as i32 - held as i32 {
            i32::MIN..=0 => 100,
            1 => 70,
            _ => 50,
        },
    }
}
