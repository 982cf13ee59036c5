use serde::{Deserialize, Serialize};

/// The skill-overlap result shown on the results step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_score: u32,      // 0 – 100
    pub experience_score: u32, // 0 – 100
    pub education_score: u32,  // 0 – 100
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommended_skills: Vec<String>,
}

impl MatchReport {
    /// Missing skills followed by recommended ones: the input for resource lookup.
    pub fn skills_to_learn(&self) -> Vec<String> {
        self.missing_skills
            .iter()
            .chain(self.recommended_skills.iter())
            .cloned()
            .collect()
    }
}

pub(crate) fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
