//! Resume Parser: turns an uploaded resume buffer into structured fields.
//!
//! Pipeline: decode → normalise line endings → extract name/email/phone/skills
//! → locate and filter the experience and education sections.
//!
//! The parse is all-or-nothing: if any step fails, everything extracted so far
//! is discarded and the fallback fields are returned instead (directory name
//! and email, phone sentinel, empty lists). The failure is logged, not returned.

use regex::Regex;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::resume::ResumeFields;
use crate::parsing::extractor::{FieldExtractor, PHONE_NOT_FOUND};
use crate::parsing::sections::{
    locate_section, section_lines, EDUCATION_BOUNDARIES, EDUCATION_HEADERS, EXPERIENCE_BOUNDARIES,
    EXPERIENCE_HEADERS,
};
use crate::parsing::vocabulary::SkillVocabulary;

const BULLET: &str = "•";
const MIN_LINE_CHARS: usize = 11;
const EDUCATION_MARKERS: &[&str] = &["University", "College", "School", "Degree"];

pub struct ResumeParser {
    extractor: FieldExtractor,
    year_re: Regex,
}

impl ResumeParser {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self, AppError> {
        Ok(Self {
            extractor: FieldExtractor::new(vocabulary)?,
            year_re: Regex::new(r"[0-9]{4}")?,
        })
    }

    /// Parses `bytes` for `candidate`. Never fails: undecodable input yields
    /// the fallback fields.
    pub fn parse(&self, candidate: &Candidate, bytes: &[u8]) -> ResumeFields {
        match self.try_parse(candidate, bytes) {
            Ok(fields) => {
                debug!(
                    candidate_id = %candidate.id,
                    skills = fields.skills.len(),
                    experience = fields.experience.len(),
                    education = fields.education.len(),
                    "Parsed resume"
                );
                fields
            }
            Err(e) => {
                warn!(candidate_id = %candidate.id, "Resume parse failed, using fallback: {e}");
                fallback_fields(candidate)
            }
        }
    }

    fn try_parse(&self, candidate: &Candidate, bytes: &[u8]) -> Result<ResumeFields, AppError> {
        let text = decode_text(bytes)?;

        Ok(ResumeFields {
            name: self.extractor.extract_name(&text, &candidate.name),
            email: self.extractor.extract_email(&text, &candidate.email),
            phone: self.extractor.extract_phone(&text),
            skills: self.extractor.extract_skills(&text),
            experience: self.extract_experience(&text),
            education: self.extract_education(&text),
        })
    }

    fn extract_experience(&self, text: &str) -> Vec<String> {
        let Some(section) = locate_section(text, EXPERIENCE_HEADERS, EXPERIENCE_BOUNDARIES) else {
            return Vec::new();
        };
        section_lines(section)
            .filter(|line| line.contains(" at ") || self.year_re.is_match(line))
            .filter(|line| is_entry_line(line))
            .map(String::from)
            .collect()
    }

    fn extract_education(&self, text: &str) -> Vec<String> {
        let Some(section) = locate_section(text, EDUCATION_HEADERS, EDUCATION_BOUNDARIES) else {
            return Vec::new();
        };
        section_lines(section)
            .filter(|line| {
                EDUCATION_MARKERS.iter().any(|marker| line.contains(marker))
                    || self.year_re.is_match(line)
            })
            .filter(|line| is_entry_line(line))
            .map(String::from)
            .collect()
    }
}

/// Decodes the upload as UTF-8 and normalises every line terminator
/// (`\r\n`, `\r`, `\n`) to a single `\n`, terminating the last line too.
pub fn decode_text(bytes: &[u8]) -> Result<String, AppError> {
    let raw = std::str::from_utf8(bytes)
        .map_err(|e| AppError::MalformedInput(format!("resume is not valid UTF-8: {e}")))?;

    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut text = String::with_capacity(unified.len() + 1);
    for line in unified.lines() {
        text.push_str(line);
        text.push('\n');
    }
    Ok(text)
}

/// Fields used when the resume cannot be parsed at all.
pub fn fallback_fields(candidate: &Candidate) -> ResumeFields {
    ResumeFields {
        name: candidate.name.clone(),
        email: candidate.email.clone(),
        phone: PHONE_NOT_FOUND.to_string(),
        skills: Vec::new(),
        experience: Vec::new(),
        education: Vec::new(),
    }
}

/// Bullet points and short fragments are not entries.
fn is_entry_line(line: &str) -> bool {
    !line.starts_with(BULLET) && line.chars().count() >= MIN_LINE_CHARS
}
