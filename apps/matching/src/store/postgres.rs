//! PostgreSQL adapter for the collaborator traits.
//!
//! Uniqueness lives in the schema: `resumes.candidate_id` and
//! `job_matches (candidate_id, job_id)` are UNIQUE and every save is an
//! `INSERT ... ON CONFLICT DO UPDATE`, so a row is never duplicated even if
//! two writers race.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::job_match::JobMatch;
use crate::models::resume::Resume;
use crate::store::{CandidateDirectory, JobCatalog, MatchStore, ResumeStore};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateDirectory for PgStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Candidate, AppError> {
        let candidate: Option<Candidate> =
            sqlx::query_as("SELECT id, name, email, skills FROM candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        candidate.ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
    }
}

#[async_trait]
impl JobCatalog for PgStore {
    async fn get_all(&self) -> Result<Vec<Job>, AppError> {
        Ok(sqlx::query_as::<_, Job>(
            "SELECT id, title, company, description, skills FROM jobs ORDER BY title, id",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn get_by_candidate(&self, candidate_id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(
            sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE candidate_id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(sqlx::query_as::<_, Resume>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn save(&self, resume: Resume) -> Result<Resume, AppError> {
        let saved = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes
                (id, candidate_id, name, email, phone, skills, experience, education)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (candidate_id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                skills = EXCLUDED.skills,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(resume.id)
        .bind(resume.candidate_id)
        .bind(&resume.name)
        .bind(&resume.email)
        .bind(&resume.phone)
        .bind(&resume.skills)
        .bind(&resume.experience)
        .bind(&resume.education)
        .fetch_one(&self.pool)
        .await?;

        debug!("Saved resume {} for candidate {}", saved.id, saved.candidate_id);
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MatchStore for PgStore {
    async fn find_by_candidate(&self, candidate_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        Ok(sqlx::query_as::<_, JobMatch>(
            "SELECT * FROM job_matches WHERE candidate_id = $1 ORDER BY created_at, id",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_by_job(&self, job_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        Ok(sqlx::query_as::<_, JobMatch>(
            "SELECT * FROM job_matches WHERE job_id = $1 ORDER BY score DESC, id",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save(&self, job_match: JobMatch) -> Result<JobMatch, AppError> {
        Ok(sqlx::query_as::<_, JobMatch>(
            r#"
            INSERT INTO job_matches (id, candidate_id, job_id, score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (candidate_id, job_id) DO UPDATE SET
                score = EXCLUDED.score,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(job_match.id)
        .bind(job_match.candidate_id)
        .bind(job_match.job_id)
        .bind(job_match.score)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM job_matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
