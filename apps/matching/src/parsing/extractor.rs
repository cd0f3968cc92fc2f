//! Field extraction rules: name, email, phone and vocabulary skills.
//!
//! Every rule is best-effort. A miss yields the caller's default (name,
//! email) or the `PHONE_NOT_FOUND` sentinel, never an error.

use regex::{Regex, RegexBuilder};

use crate::errors::AppError;
use crate::parsing::vocabulary::SkillVocabulary;

/// Stored in place of a phone number when none is found.
pub const PHONE_NOT_FOUND: &str = "Not found in resume";

const NAME_PATTERN: &str = r"(?m)^([A-Z][a-z]+ [A-Z][a-z]+)";
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}";
const PHONE_PATTERN: &str = r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}";

/// Compiled extraction rules. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    name_re: Regex,
    email_re: Regex,
    phone_re: Regex,
    skill_matchers: Vec<SkillMatcher>,
}

#[derive(Debug, Clone)]
struct SkillMatcher {
    canonical: String,
    pattern: Regex,
}

impl SkillMatcher {
    fn new(term: &str) -> Result<Self, AppError> {
        // Escaped: "C++", "Node.js" and "CI/CD" are literals, not patterns.
        let pattern = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            canonical: term.to_string(),
            pattern,
        })
    }

    fn is_present(&self, text: &str) -> bool {
        self.pattern
            .find_iter(text)
            .any(|m| is_whole_word(text, m.start(), m.end()))
    }
}

impl FieldExtractor {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self, AppError> {
        let skill_matchers = vocabulary
            .terms()
            .iter()
            .map(|term| SkillMatcher::new(term))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name_re: Regex::new(NAME_PATTERN)?,
            email_re: Regex::new(EMAIL_PATTERN)?,
            phone_re: Regex::new(PHONE_PATTERN)?,
            skill_matchers,
        })
    }

    /// First line starting with two capitalised words, else `fallback`.
    pub fn extract_name(&self, text: &str, fallback: &str) -> String {
        self.name_re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn extract_email(&self, text: &str, fallback: &str) -> String {
        self.email_re
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn extract_phone(&self, text: &str) -> String {
        self.phone_re
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| PHONE_NOT_FOUND.to_string())
    }

    /// Vocabulary terms present in `text` as whole words, in vocabulary order
    /// and canonical spelling.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skill_matchers
            .iter()
            .filter(|matcher| matcher.is_present(text))
            .map(|matcher| matcher.canonical.clone())
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A match counts only when it is not glued to surrounding word characters.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
