//! JD Parser: deterministic extraction of skills, years of experience, and degree level
//! from a pasted job description.

use serde::Serialize;

use crate::analysis::skills::{contains_term, find_skills, normalize};

/// The part of a job description a line belongs to. Drives keyword position weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Title,
    Required,
    General,
    Preferred,
    About,
}

impl Section {
    /// title=1.0, required=0.8, general=0.6, preferred=0.4, about=0.3
    pub fn weight(self) -> f32 {
        match self {
            Section::Title => 1.0,
            Section::Required => 0.8,
            Section::General => 0.6,
            Section::Preferred => 0.4,
            Section::About => 0.3,
        }
    }

    /// Only the preferred section marks a skill optional.
    fn counts_as_required(self) -> bool {
        self != Section::Preferred
    }
}

const PREFERRED_HEADINGS: &[&str] = &["preferred", "nice to have", "nice-to-have", "bonus", "desired", "plus"];
const REQUIRED_HEADINGS: &[&str] = &["required", "requirements", "requirement", "must have", "must-have", "qualifications"];
const ABOUT_HEADINGS: &[&str] = &["about"];
const GENERAL_HEADINGS: &[&str] = &["responsibilities", "what you'll do", "what you will do", "the role", "overview"];

/// Longest text before a colon that still reads as a heading.
const MAX_HEADING_WORDS: usize = 5;

/// A skill the job description asks for.
#[derive(Debug, Clone, Serialize)]
pub struct JobSkill {
    pub name: &'static str,
    pub frequency: u32,
    /// Highest section weight the skill appeared under.
    pub position_weight: f32,
    /// frequency * position_weight
    pub weighted_score: f32,
    /// false when the skill only appears under preferred headings
    pub is_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Associate = 1,
    Bachelor = 2,
    Master = 3,
    Doctorate = 4,
}

const DEGREE_TERMS: &[(DegreeLevel, &[&str])] = &[
    (DegreeLevel::Associate, &["associate's", "associates degree", "associate degree"]),
    (
        DegreeLevel::Bachelor,
        &["bachelor's", "bachelors", "bachelor of", "b.s.", "bsc", "b.sc", "b.a.", "b.tech", "b.e."],
    ),
    (
        DegreeLevel::Master,
        &["master's", "masters", "master of", "m.s.", "msc", "m.sc", "mba", "m.tech"],
    ),
    (DegreeLevel::Doctorate, &["phd", "ph.d", "doctorate", "doctoral"]),
];

/// Full structured output of job-description parsing.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedJob {
    /// In order of first appearance.
    pub skills: Vec<JobSkill>,
    pub required_years: Option<u32>,
    pub required_degree: Option<DegreeLevel>,
}

pub fn parse_job(text: &str) -> ParsedJob {
    let mut skills: Vec<JobSkill> = Vec::new();

    for (section, segment) in segments(text) {
        for (name, count) in find_skills(segment) {
            match skills.iter_mut().find(|s| s.name == name) {
                Some(existing) => {
                    existing.frequency += count;
                    existing.position_weight = existing.position_weight.max(section.weight());
                    existing.is_required |= section.counts_as_required();
                }
                None => skills.push(JobSkill {
                    name,
                    frequency: count,
                    position_weight: section.weight(),
                    weighted_score: 0.0,
                    is_required: section.counts_as_required(),
                }),
            }
        }
    }

    for skill in &mut skills {
        skill.weighted_score = skill.frequency as f32 * skill.position_weight;
    }

    ParsedJob {
        skills,
        required_years: years_figures(text).into_iter().next(),
        required_degree: degree_levels(text).into_iter().min(),
    }
}

/// Splits a job description into (section, text) pieces.
///
/// The first non-empty line is the title unless it is itself a heading. A heading switches
/// the section for everything after it; text after a heading's colon belongs to the new
/// section ("Nice to have: Kafka").
fn segments(text: &str) -> Vec<(Section, &str)> {
    let mut out = Vec::new();
    let mut current = Section::General;
    let mut seen_title = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((section, rest)) = heading(trimmed) {
            current = section;
            seen_title = true;
            if !rest.trim().is_empty() {
                out.push((current, rest));
            }
            continue;
        }

        if !seen_title {
            seen_title = true;
            out.push((Section::Title, trimmed));
            continue;
        }

        out.push((current, trimmed));
    }

    out
}

fn heading(line: &str) -> Option<(Section, &str)> {
    let (label, rest) = match line.split_once(':') {
        Some((label, rest)) => (label, rest),
        None => (line, ""),
    };
    if label.split_whitespace().count() > MAX_HEADING_WORDS {
        return None;
    }
    // Without a colon only very short, skill-free lines that open with a heading term count.
    let bare = rest.is_empty() && !line.ends_with(':');
    if bare && (label.split_whitespace().count() > 3 || !find_skills(label).is_empty()) {
        return None;
    }

    let label = normalize(label);
    let label = label.trim_start_matches(|c: char| !c.is_alphanumeric());
    let is_heading = |terms: &[&str]| {
        terms.iter().any(|h| {
            if bare {
                starts_with_term(label, h)
            } else {
                contains_term(label, h)
            }
        })
    };
    let section = if is_heading(PREFERRED_HEADINGS) {
        Section::Preferred
    } else if is_heading(REQUIRED_HEADINGS) {
        Section::Required
    } else if is_heading(ABOUT_HEADINGS) {
        Section::About
    } else if is_heading(GENERAL_HEADINGS) {
        Section::General
    } else {
        return None;
    };
    Some((section, rest))
}

fn starts_with_term(label: &str, term: &str) -> bool {
    label
        .strip_prefix(term)
        .is_some_and(|tail| !tail.starts_with(|c: char| c.is_alphanumeric()))
}

/// Every "N years" / "N+ years" / "N-M years" figure in the text, in order.
pub fn years_figures(text: &str) -> Vec<u32> {
    let lowered = normalize(text);
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let mut figures = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        let token = token.trim_start_matches(|c: char| !c.is_ascii_digit());
        let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
        let Ok(n) = digits.parse::<u32>() else {
            continue;
        };
        if n == 0 || n > 50 {
            continue;
        }

        let rest = token[digits.len()..].trim_start_matches(|c: char| {
            c.is_ascii_digit() || matches!(c, '+' | '-' | '\u{2013}')
        });
        let unit = if rest.is_empty() {
            tokens.get(i + 1).copied().unwrap_or_default()
        } else {
            rest
        };
        if unit.starts_with("year") || unit.starts_with("yr") {
            figures.push(n);
        }
    }

    figures
}

/// Every degree level mentioned in the text.
pub fn degree_levels(text: &str) -> Vec<DegreeLevel> {
    let haystack = normalize(text);
    DEGREE_TERMS
        .iter()
        .filter(|(_, terms)| terms.iter().any(|t| contains_term(&haystack, t)))
        .map(|(level, _)| *level)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) const FULL_STACK_JD: &str = "Senior Full Stack Developer

We are seeking an experienced Full Stack Developer to join our growing team.

Required Skills:
- React, TypeScript, Node.js
- PostgreSQL, MongoDB
- Docker, Kubernetes

Preferred Skills:
- Python, Django or Flask
- Microservices architecture

Requirements:
- Bachelor's degree in Computer Science or related field
- 5+ years of software development experience";

    fn skill<'a>(parsed: &'a ParsedJob, name: &str) -> &'a JobSkill {
        parsed
            .skills
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("{name} not parsed"))
    }

    #[test]
    fn test_sections_assign_required_and_preferred() {
        let parsed = parse_job(FULL_STACK_JD);
        assert!(skill(&parsed, "React").is_required);
        assert!(skill(&parsed, "Kubernetes").is_required);
        assert!(!skill(&parsed, "Django").is_required);
        assert!(!skill(&parsed, "Microservices").is_required);
    }

    #[test]
    fn test_position_weights() {
        let parsed = parse_job(FULL_STACK_JD);
        assert!((skill(&parsed, "Docker").position_weight - 0.8).abs() < f32::EPSILON);
        assert!((skill(&parsed, "Flask").position_weight - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_title_line_weight() {
        let parsed = parse_job("Senior Rust Engineer\nWe build things.");
        let rust = skill(&parsed, "Rust");
        assert!((rust.position_weight - 1.0).abs() < f32::EPSILON);
        assert!(rust.is_required);
    }

    #[test]
    fn test_weighted_score_is_freq_times_weight() {
        let parsed = parse_job("Platform Engineer\nRequired: Docker\nDocker images, Docker compose");
        let docker = skill(&parsed, "Docker");
        assert_eq!(docker.frequency, 3);
        assert!((docker.weighted_score - 3.0 * 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_short_skill_line_is_not_a_heading() {
        let parsed = parse_job("Engineer\nPreferred:\n- Rust required");
        assert!(skill(&parsed, "Rust").frequency == 1);
    }

    #[test]
    fn test_inline_heading_text_belongs_to_new_section() {
        let parsed = parse_job("Backend Engineer\nNice to have: Kafka experience.");
        assert!(!skill(&parsed, "Kafka").is_required);
    }

    #[test]
    fn test_about_section_skills_stay_required() {
        let parsed = parse_job("Backend Engineer\nAbout us:\nWe run everything on Kafka.");
        let kafka = skill(&parsed, "Kafka");
        assert!(kafka.is_required);
        assert!((kafka.position_weight - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_heading_word_mid_line_does_not_switch_section() {
        let parsed = parse_job("Backend Engineer\nSalary plus equity\nRust, Kafka and Docker daily.");
        for name in ["Rust", "Kafka", "Docker"] {
            let found = skill(&parsed, name);
            assert!(found.is_required, "{name} should be required");
            assert!((found.position_weight - 0.6).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_bare_line_opening_with_heading_term_is_a_heading() {
        let parsed = parse_job("Backend Engineer\nBonus points\nKafka");
        assert!(!skill(&parsed, "Kafka").is_required);
    }

    #[test]
    fn test_skills_keep_first_appearance_order() {
        let parsed = parse_job("Engineer\nKubernetes then Docker then Kubernetes");
        let order: Vec<&str> = parsed.skills.iter().map(|s| s.name).collect();
        assert_eq!(order, vec!["Kubernetes", "Docker"]);
    }

    #[test]
    fn test_required_years_and_degree() {
        let parsed = parse_job(FULL_STACK_JD);
        assert_eq!(parsed.required_years, Some(5));
        assert_eq!(parsed.required_degree, Some(DegreeLevel::Bachelor));
    }

    #[test]
    fn test_lowest_degree_is_the_requirement() {
        let parsed = parse_job("Role\nMaster's or Bachelor's degree required");
        assert_eq!(parsed.required_degree, Some(DegreeLevel::Bachelor));
    }

    #[test]
    fn test_years_figure_variants() {
        assert_eq!(years_figures("5+ years"), vec![5]);
        assert_eq!(years_figures("3-5 years of Rust"), vec![3]);
        assert_eq!(years_figures("7 yrs"), vec![7]);
        assert_eq!(years_figures("(10+years)"), vec![10]);
        assert!(years_figures("In 2019 we shipped 4 products").is_empty());
    }

    #[test]
    fn test_scrum_master_is_not_a_degree() {
        assert!(degree_levels("Certified Scrum Master").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let parsed = parse_job("");
        assert!(parsed.skills.is_empty());
        assert_eq!(parsed.required_years, None);
        assert_eq!(parsed.required_degree, None);
    }
}
