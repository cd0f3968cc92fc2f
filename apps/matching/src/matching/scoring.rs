use std::collections::HashSet;

/// Percentage (0 – 100) of `job_skills` present in `candidate_skills`.
///
/// Comparison is case-insensitive exact token equality. Duplicate job skills
/// each count, so the denominator is always `job_skills.len()` and the score
/// is not symmetric. Either list empty → 0.
///
/// Ties round up (12.5 → 13). Computed in integers so the boundary is exact.
pub fn compute_score<C, J>(candidate_skills: &[C], job_skills: &[J]) -> i32
where
    C: AsRef<str>,
    J: AsRef<str>,
{
    if candidate_skills.is_empty() || job_skills.is_empty() {
        return 0;
    }

    let candidate: HashSet<String> = candidate_skills
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();

    let matched = job_skills
        .iter()
        .filter(|s| candidate.contains(&s.as_ref().to_lowercase()))
        .count();

    round_percentage(matched, job_skills.len())
}

/// round(matched / total × 100), half up. `total` must be non-zero.
fn round_percentage(matched: usize, total: usize) -> i32 {
    let rounded = (200 * matched + total) / (2 * total);
    rounded.min(100) as i32
}
