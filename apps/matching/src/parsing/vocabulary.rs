/// Built-in skill terms recognised in resume text, in reporting order.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Java",
    "Python",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "HTML",
    "CSS",
    "SQL",
    "NoSQL",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Spring",
    "ASP.NET",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "REST API",
    "GraphQL",
    "Machine Learning",
    "AI",
    "Data Analysis",
    "Agile",
    "Scrum",
    "DevOps",
    "CI/CD",
    "TDD",
    "Project Management",
    "Leadership",
    "Communication",
    "Teamwork",
    "Problem Solving",
];

/// Immutable, ordered table of skill terms.
///
/// Terms keep their canonical spelling; lookups against resume text are
/// case-insensitive. Order is significant: extracted skills are reported in
/// table order, not in the order they appear in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self {
            terms: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::empty().extended(terms)
    }

    fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    /// Returns a copy with `extra` appended. Blank terms and terms already
    /// present (compared case-insensitively) are skipped.
    pub fn extended<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for term in extra {
            let term: String = term.into();
            let term = term.trim();
            if term.is_empty() || self.contains(term) {
                continue;
            }
            self.terms.push(term.to_string());
        }
        self
    }

    pub fn contains(&self, term: &str) -> bool {
        let lower = term.to_lowercase();
        self.terms.iter().any(|t| t.to_lowercase() == lower)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete_and_ordered() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.len(), 42);
        assert_eq!(vocab.terms()[0], "Java");
        assert_eq!(vocab.terms()[4], "C++");
        assert_eq!(vocab.terms().last().map(String::as_str), Some("Problem Solving"));
    }

    #[test]
    fn test_extended_appends_in_order() {
        let vocab = SkillVocabulary::default().extended(["Rust", "Terraform"]);
        assert_eq!(vocab.len(), 44);
        assert_eq!(vocab.terms()[42], "Rust");
        assert_eq!(vocab.terms()[43], "Terraform");
    }

    #[test]
    fn test_extended_skips_duplicates_and_blanks() {
        let vocab = SkillVocabulary::default().extended(["java", "  ", "DOCKER"]);
        assert_eq!(vocab.len(), 42);
    }

    #[test]
    fn test_new_builds_custom_table() {
        let vocab = SkillVocabulary::new(["Rust", "rust", "Go"]);
        assert_eq!(vocab.terms(), &["Rust".to_string(), "Go".to_string()]);
        assert!(vocab.contains("GO"));
        assert!(!SkillVocabulary::new(Vec::<String>::new()).contains("Rust"));
    }
}
