//! Skill vocabulary and token-boundary term matching.
//!
//! Matching is done on `normalize`d text: lowercase, typographic apostrophes folded to `'`.
//! A term only matches when the characters on both sides of it are not alphanumeric, so
//! "java" does not fire inside "javascript" and "sql" does not fire inside "postgresql".

use std::collections::BTreeSet;

/// A canonical skill name with the lowercase spellings that identify it.
#[derive(Debug, Clone, Copy)]
pub struct SkillDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub const VOCABULARY: &[SkillDef] = &[
    SkillDef { name: "JavaScript", aliases: &["javascript", "ecmascript"] },
    SkillDef { name: "TypeScript", aliases: &["typescript"] },
    SkillDef { name: "React", aliases: &["react", "react.js", "reactjs"] },
    SkillDef { name: "Angular", aliases: &["angular", "angularjs"] },
    SkillDef { name: "Vue", aliases: &["vue", "vue.js", "vuejs"] },
    SkillDef { name: "Node.js", aliases: &["node.js", "nodejs", "node"] },
    SkillDef { name: "Python", aliases: &["python"] },
    SkillDef { name: "Django", aliases: &["django"] },
    SkillDef { name: "Flask", aliases: &["flask"] },
    SkillDef { name: "Java", aliases: &["java"] },
    SkillDef { name: "Spring Boot", aliases: &["spring boot"] },
    SkillDef { name: "Kotlin", aliases: &["kotlin"] },
    SkillDef { name: "Go", aliases: &["golang"] },
    SkillDef { name: "Rust", aliases: &["rust"] },
    SkillDef { name: "C++", aliases: &["c++"] },
    SkillDef { name: "C#", aliases: &["c#"] },
    SkillDef { name: "Ruby", aliases: &["ruby"] },
    SkillDef { name: "Ruby on Rails", aliases: &["rails", "ruby on rails"] },
    SkillDef { name: "PHP", aliases: &["php"] },
    SkillDef { name: "SQL", aliases: &["sql"] },
    SkillDef { name: "PostgreSQL", aliases: &["postgresql", "postgres"] },
    SkillDef { name: "MySQL", aliases: &["mysql"] },
    SkillDef { name: "MongoDB", aliases: &["mongodb", "mongo"] },
    SkillDef { name: "Redis", aliases: &["redis"] },
    SkillDef { name: "Kafka", aliases: &["kafka"] },
    SkillDef { name: "GraphQL", aliases: &["graphql"] },
    SkillDef { name: "REST API", aliases: &["rest api", "rest apis", "restful"] },
    SkillDef { name: "Microservices", aliases: &["microservices", "microservice"] },
    SkillDef { name: "Docker", aliases: &["docker"] },
    SkillDef { name: "Kubernetes", aliases: &["kubernetes", "k8s"] },
    SkillDef { name: "Terraform", aliases: &["terraform"] },
    SkillDef { name: "AWS", aliases: &["aws", "amazon web services"] },
    SkillDef {
        name: "Google Cloud Platform",
        aliases: &["gcp", "google cloud platform", "google cloud"],
    },
    SkillDef { name: "Azure", aliases: &["azure"] },
    SkillDef { name: "Linux", aliases: &["linux"] },
    SkillDef { name: "Git", aliases: &["git"] },
    SkillDef { name: "CI/CD", aliases: &["ci/cd", "continuous integration"] },
    SkillDef { name: "Jest", aliases: &["jest"] },
    SkillDef { name: "Cypress", aliases: &["cypress"] },
    SkillDef { name: "HTML", aliases: &["html", "html5"] },
    SkillDef { name: "CSS", aliases: &["css", "css3"] },
    SkillDef { name: "Agile", aliases: &["agile"] },
    SkillDef { name: "Scrum", aliases: &["scrum"] },
    SkillDef { name: "Machine Learning", aliases: &["machine learning"] },
    SkillDef { name: "PyTorch", aliases: &["pytorch"] },
    SkillDef { name: "TensorFlow", aliases: &["tensorflow"] },
];

/// Lowercases and folds typographic apostrophes so aliases can be plain ASCII.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Byte offsets at which `term` occurs in `haystack` on token boundaries.
/// Both arguments must already be normalized.
pub fn term_positions(haystack: &str, term: &str) -> Vec<usize> {
    if term.is_empty() {
        return vec![];
    }
    haystack
        .match_indices(term)
        .filter(|(start, _)| {
            let before = haystack[..*start].chars().next_back();
            let after = haystack[start + term.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .map(|(start, _)| start)
        .collect()
}

pub fn contains_term(haystack: &str, term: &str) -> bool {
    !term_positions(haystack, term).is_empty()
}

/// Every vocabulary skill mentioned in `text` with its mention count, ordered by first mention.
///
/// Overlapping aliases that start at the same offset ("node" / "node.js") count once.
pub fn find_skills(text: &str) -> Vec<(&'static str, u32)> {
    let haystack = normalize(text);
    let mut found: Vec<(usize, &'static str, u32)> = VOCABULARY
        .iter()
        .filter_map(|def| {
            let starts: BTreeSet<usize> = def
                .aliases
                .iter()
                .flat_map(|alias| term_positions(&haystack, alias))
                .collect();
            let first = *starts.first()?;
            Some((first, def.name, starts.len() as u32))
        })
        .collect();
    found.sort_by_key(|(first, _, _)| *first);
    found.into_iter().map(|(_, name, count)| (name, count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<&'static str> {
        find_skills(text).into_iter().map(|(n, _)| n).collect()
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(names("Experienced with DOCKER and kubernetes"), vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn test_java_not_found_inside_javascript() {
        assert_eq!(names("JavaScript developer"), vec!["JavaScript"]);
    }

    #[test]
    fn test_sql_not_found_inside_postgresql_or_mysql() {
        assert_eq!(names("PostgreSQL, MySQL"), vec!["PostgreSQL", "MySQL"]);
        assert_eq!(names("PostgreSQL and raw SQL"), vec!["PostgreSQL", "SQL"]);
    }

    #[test]
    fn test_git_not_found_inside_github() {
        assert!(names("Profile on GitHub").is_empty());
    }

    #[test]
    fn test_overlapping_aliases_count_once() {
        let found = find_skills("Node.js services; more node.js; Node");
        assert_eq!(found, vec![("Node.js", 3)]);
    }

    #[test]
    fn test_symbol_skills() {
        assert_eq!(names("C++ and C# and CI/CD"), vec!["C++", "C#", "CI/CD"]);
    }

    #[test]
    fn test_slash_separated_skills() {
        assert_eq!(names("Agile/Scrum methodology"), vec!["Agile", "Scrum"]);
    }

    #[test]
    fn test_multi_word_alias() {
        assert_eq!(names("Deployed on Amazon Web Services"), vec!["AWS"]);
    }

    #[test]
    fn test_term_positions_respects_boundaries() {
        assert_eq!(term_positions("rust rusty rust.", "rust"), vec![0, 11]);
    }

    #[test]
    fn test_normalize_folds_curly_apostrophe() {
        assert_eq!(normalize("Bachelor\u{2019}s"), "bachelor's");
    }
}
