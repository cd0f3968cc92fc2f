//! Match recalculation: rescoring one candidate against the whole job catalog.
//!
//! Existing matches are loaded once and indexed by job id; each catalog job
//! then updates its indexed match or creates a new one. Matches left over
//! afterwards (jobs gone from the catalog, duplicate rows from an older store)
//! are deleted, so a finished run leaves exactly one match per catalog job.
//!
//! The first store failure aborts the run and is returned. Matches saved before
//! the failure stay saved; a retry converges because saves are upserts.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::locks::CandidateLocks;
use crate::matching::scoring::compute_score;
use crate::models::candidate::Candidate;
use crate::models::job_match::JobMatch;
use crate::store::{CandidateDirectory, JobCatalog, MatchStore, ResumeStore};

pub struct MatchRecalculator {
    candidates: Arc<dyn CandidateDirectory>,
    jobs: Arc<dyn JobCatalog>,
    resumes: Arc<dyn ResumeStore>,
    matches: Arc<dyn MatchStore>,
    locks: CandidateLocks,
}

impl MatchRecalculator {
    pub fn new(
        candidates: Arc<dyn CandidateDirectory>,
        jobs: Arc<dyn JobCatalog>,
        resumes: Arc<dyn ResumeStore>,
        matches: Arc<dyn MatchStore>,
    ) -> Self {
        Self {
            candidates,
            jobs,
            resumes,
            matches,
            locks: CandidateLocks::new(),
        }
    }

    /// Rescores `candidate_id` against every job and returns one saved match
    /// per job, in catalog order.
    pub async fn recalculate(&self, candidate_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        let _guard = self.locks.acquire(candidate_id).await;

        let candidate = self.candidates.get_by_id(candidate_id).await?;
        let skills = self.resolve_skills(&candidate).await?;
        let jobs = self.jobs.get_all().await?;
        let (mut existing, duplicates) =
            index_by_job(self.matches.find_by_candidate(candidate_id).await?);

        let mut saved = Vec::with_capacity(jobs.len());
        for job in &jobs {
            let score = compute_score(&skills, &job.skills);
            let job_match = match existing.remove(&job.id) {
                Some(mut current) => {
                    current.score = score;
                    current
                }
                None => JobMatch::new(candidate_id, job.id, score),
            };
            let stored = self.matches.save(job_match).await.map_err(|e| {
                warn!(%candidate_id, job_id = %job.id, "Match save failed, aborting recalculation: {e}");
                e
            })?;
            saved.push(stored);
        }

        let stale: Vec<JobMatch> = existing.into_values().chain(duplicates).collect();
        for job_match in &stale {
            self.matches.delete(job_match.id).await?;
        }

        info!(
            %candidate_id,
            jobs = jobs.len(),
            pruned = stale.len(),
            "Recalculated job matches"
        );
        Ok(saved)
    }

    /// Resume skills win over profile skills; no skills at all is valid.
    async fn resolve_skills(&self, candidate: &Candidate) -> Result<Vec<String>, AppError> {
        match self.resumes.get_by_candidate(candidate.id).await? {
            Some(resume) => {
                debug!(candidate_id = %candidate.id, "Scoring with resume skills");
                Ok(resume.skills)
            }
            None => {
                debug!(candidate_id = %candidate.id, "Scoring with profile skills");
                Ok(candidate.skills.clone())
            }
        }
    }
}

/// Indexes matches by job id. The first match seen for a job is kept; any
/// further ones are returned separately as duplicates.
fn index_by_job(matches: Vec<JobMatch>) -> (HashMap<Uuid, JobMatch>, Vec<JobMatch>) {
    let mut index = HashMap::with_capacity(matches.len());
    let mut duplicates = Vec::new();
    for job_match in matches {
        if index.contains_key(&job_match.job_id) {
            duplicates.push(job_match);
        } else {
            index.insert(job_match.job_id, job_match);
        }
    }
    (index, duplicates)
}
