//! Collaborator contracts for the matching subsystem.
//!
//! The candidate directory and the job catalog are read-only sources owned by
//! the surrounding backend. Resumes and job matches are written through
//! `ResumeStore` and `MatchStore`. Each trait is carried as `Arc<dyn ...>` so the
//! PostgreSQL adapter and the in-memory adapter are interchangeable.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::job_match::JobMatch;
use crate::models::resume::Resume;

#[async_trait]
pub trait CandidateDirectory: Send + Sync {
    /// Fails with `AppError::NotFound` when no candidate has this id.
    async fn get_by_id(&self, id: Uuid) -> Result<Candidate, AppError>;
}

#[async_trait]
pub trait JobCatalog: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Job>, AppError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get_by_candidate(&self, candidate_id: Uuid) -> Result<Option<Resume>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    /// Creates or replaces. A candidate never ends up with two resumes.
    async fn save(&self, resume: Resume) -> Result<Resume, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn find_by_candidate(&self, candidate_id: Uuid) -> Result<Vec<JobMatch>, AppError>;

    async fn find_by_job(&self, job_id: Uuid) -> Result<Vec<JobMatch>, AppError>;

    /// Inserts or updates the match for `(candidate_id, job_id)`.
    async fn save(&self, job_match: JobMatch) -> Result<JobMatch, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
