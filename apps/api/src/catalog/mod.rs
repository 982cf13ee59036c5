//! Learning-resource catalog.
//!
//! Fixed at startup (built-in entries or a JSON file from `CATALOG_PATH`) and never mutated.
//! Lookup keeps declaration order and includes an entry when any requested skill contains the
//! entry's skill as a case-insensitive substring.

pub mod builtin;
pub mod handlers;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Course,
    Video,
    Article,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub skill: String,
    pub platform: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub duration: String,
    pub level: String,
    pub url: String,
}

/// Platforms suggested alongside every lookup.
pub const FALLBACK_PLATFORMS: &[&str] = &[
    "Coursera",
    "Udemy",
    "Pluralsight",
    "LinkedIn Learning",
    "edX",
    "Codecademy",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupFallback {
    pub message: String,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceLookup {
    pub resources: Vec<LearningResource>,
    /// Present only when nothing matched.
    pub fallback: Option<LookupFallback>,
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<LearningResource>,
}

impl Catalog {
    pub fn new(entries: Vec<LearningResource>) -> Self {
        Catalog { entries }
    }

    pub fn builtin() -> Self {
        Catalog::new(builtin::entries())
    }

    /// Loads a catalog from a JSON array of resources.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let entries: Vec<LearningResource> = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file {} is not valid JSON", path.display()))?;
        Ok(Catalog::new(entries))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose skill is a case-insensitive substring of any requested skill.
    pub fn matching<S: AsRef<str>>(&self, skills: &[S]) -> Vec<LearningResource> {
        let wanted: Vec<String> = skills.iter().map(|s| s.as_ref().to_lowercase()).collect();
        self.entries
            .iter()
            .filter(|entry| {
                let target = entry.skill.to_lowercase();
                wanted.iter().any(|skill| skill.contains(&target))
            })
            .cloned()
            .collect()
    }

    pub fn lookup<S: AsRef<str>>(&self, skills: &[S]) -> ResourceLookup {
        let resources = self.matching(skills);
        let fallback = resources.is_empty().then(|| LookupFallback {
            message: "No specific resources found for your skills.".to_string(),
            hint: "Try searching on popular learning platforms.".to_string(),
        });
        ResourceLookup {
            resources,
            fallback,
            platforms: FALLBACK_PLATFORMS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
