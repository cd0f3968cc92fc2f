//! Section location inside free-form resume text.
//!
//! Plain case-sensitive substring search, no regex. A header that also occurs
//! inside unrelated text ("Skills" in a sentence, "Experience" inside
//! "Work Experience") is matched there too; callers accept that as a
//! heuristic limitation.

/// Experience section headers, in priority order.
pub const EXPERIENCE_HEADERS: &[&str] = &[
    "Experience",
    "Work Experience",
    "Professional Experience",
    "Employment",
];

/// Headers that end an experience section.
pub const EXPERIENCE_BOUNDARIES: &[&str] = &["Education", "Skills", "Projects", "References"];

/// Education section headers, in priority order.
pub const EDUCATION_HEADERS: &[&str] = &["Education", "Academic Background", "Qualifications"];

/// Headers that end an education section.
pub const EDUCATION_BOUNDARIES: &[&str] = &["Experience", "Skills", "Projects", "References"];

/// Returns the slice of `text` starting at the first header (tried in order,
/// first one present wins) and ending where the earliest boundary header
/// occurs after it, or at end of text.
///
/// `None` when no header occurs anywhere in `text`.
pub fn locate_section<'a>(text: &'a str, headers: &[&str], boundaries: &[&str]) -> Option<&'a str> {
    let (header, start) = headers
        .iter()
        .find_map(|header| text.find(header).map(|pos| (*header, pos)))?;

    let search_from = start + header.len();
    let end = boundaries
        .iter()
        .filter_map(|boundary| text[search_from..].find(boundary))
        .map(|offset| search_from + offset)
        .min()
        .unwrap_or(text.len());

    Some(&text[start..end])
}

/// Splits a located section into trimmed, non-empty body lines, skipping the
/// header line itself.
pub fn section_lines(section: &str) -> impl Iterator<Item = &str> {
    section
        .split('\n')
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
