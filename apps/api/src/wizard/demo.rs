//! Fixed sample data for the "load demo" path.

use bytes::Bytes;
use chrono::Utc;

use crate::analysis::report::owned;
use crate::analysis::MatchReport;
use crate::intake::{ResumeFile, ACCEPTED_MEDIA_TYPE};
use crate::notice::Notice;

pub const DEMO_RESUME_NAME: &str = "demo-resume.pdf";
const DEMO_RESUME_CONTENT: &[u8] = b"sample resume content";

pub const SAMPLE_JOB_DESCRIPTION: &str = "Senior Full Stack Developer

We are seeking an experienced Full Stack Developer to join our growing team.

Required Skills:
- React, TypeScript, Node.js
- PostgreSQL, MongoDB
- Docker, Kubernetes
- AWS or Google Cloud Platform
- GraphQL, REST APIs
- Git, CI/CD pipelines

Preferred Skills:
- Python, Django or Flask
- Microservices architecture
- Test automation (Jest, Cypress)
- Agile/Scrum methodology

Requirements:
- Bachelor's degree in Computer Science or related field
- 5+ years of software development experience
- Strong problem-solving and communication skills";

pub fn demo_resume() -> ResumeFile {
    ResumeFile {
        name: DEMO_RESUME_NAME.to_string(),
        content_type: ACCEPTED_MEDIA_TYPE.to_string(),
        data: Bytes::from_static(DEMO_RESUME_CONTENT),
        uploaded_at: Utc::now(),
    }
}

pub fn demo_report() -> MatchReport {
    MatchReport {
        match_score: 78,
        experience_score: 85,
        education_score: 90,
        matched_skills: owned(&[
            "React",
            "JavaScript",
            "Node.js",
            "Python",
            "SQL",
            "AWS",
            "Git",
            "REST API",
            "Agile",
        ]),
        missing_skills: owned(&["Kubernetes", "Docker", "GraphQL", "TypeScript", "MongoDB"]),
        recommended_skills: owned(&[
            "Docker",
            "Kubernetes",
            "TypeScript",
            "GraphQL",
            "MongoDB",
            "Microservices",
        ]),
    }
}

pub fn demo_notice() -> Notice {
    Notice::info("Demo loaded!", "Viewing sample analysis results")
}
