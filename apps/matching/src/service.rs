//! Entry point for callers: resume parsing, scoring and match recalculation
//! behind one value holding the collaborators.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::errors::AppError;
use crate::matching::recalculate::MatchRecalculator;
use crate::matching::scoring::compute_score;
use crate::models::job_match::JobMatch;
use crate::models::resume::{Resume, ResumeFields};
use crate::parsing::resume_parser::ResumeParser;
use crate::parsing::vocabulary::SkillVocabulary;
use crate::store::memory::InMemoryStore;
use crate::store::postgres::PgStore;
use crate::store::{CandidateDirectory, JobCatalog, MatchStore, ResumeStore};

pub struct MatchingService {
    parser: ResumeParser,
    candidates: Arc<dyn CandidateDirectory>,
    resumes: Arc<dyn ResumeStore>,
    matches: Arc<dyn MatchStore>,
    recalculator: MatchRecalculator,
}

impl MatchingService {
    pub fn new(
        vocabulary: &SkillVocabulary,
        candidates: Arc<dyn CandidateDirectory>,
        jobs: Arc<dyn JobCatalog>,
        resumes: Arc<dyn ResumeStore>,
        matches: Arc<dyn MatchStore>,
    ) -> Result<Self, AppError> {
        let recalculator = MatchRecalculator::new(
            candidates.clone(),
            jobs,
            resumes.clone(),
            matches.clone(),
        );
        Ok(Self {
            parser: ResumeParser::new(vocabulary)?,
            candidates,
            resumes,
            matches,
            recalculator,
        })
    }

    /// Service backed by a single in-memory store for every collaborator.
    pub fn in_memory(store: Arc<InMemoryStore>, vocabulary: &SkillVocabulary) -> Result<Self, AppError> {
        Self::new(vocabulary, store.clone(), store.clone(), store.clone(), store)
    }

    /// Connects to PostgreSQL, applies migrations and wires the Postgres adapter.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = create_pool(&config.database_url, config.database_max_connections).await?;
        run_migrations(&pool).await?;

        let vocabulary = SkillVocabulary::default().extended(config.extra_skills.iter().cloned());
        info!("Skill vocabulary loaded ({} terms)", vocabulary.len());

        let store = Arc::new(PgStore::new(pool));
        Ok(Self::new(
            &vocabulary,
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )?)
    }

    /// Parses an uploaded resume and stores it as the candidate's only resume.
    ///
    /// Unparseable uploads are stored with fallback fields rather than
    /// rejected. Fails only if the candidate is unknown or the store fails.
    pub async fn parse_resume(&self, candidate_id: Uuid, bytes: &[u8]) -> Result<Resume, AppError> {
        let candidate = self.candidates.get_by_id(candidate_id).await?;
        let fields = self.parser.parse(&candidate, bytes);

        let resume = match self.resumes.get_by_candidate(candidate_id).await? {
            Some(mut existing) => {
                existing.apply(fields);
                existing
            }
            None => Resume::from_fields(Uuid::new_v4(), candidate_id, fields),
        };

        let saved = self.resumes.save(resume).await?;
        info!(%candidate_id, resume_id = %saved.id, skills = saved.skills.len(), "Stored parsed resume");
        Ok(saved)
    }

    /// See [`compute_score`].
    pub fn compute_score(&self, candidate_skills: &[String], job_skills: &[String]) -> i32 {
        compute_score(candidate_skills, job_skills)
    }

    /// Rescores the candidate against every job; one match per job afterwards.
    pub async fn recalculate_matches(&self, candidate_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        self.recalculator.recalculate(candidate_id).await
    }

    pub async fn resume_for_candidate(&self, candidate_id: Uuid) -> Result<Option<Resume>, AppError> {
        self.resumes.get_by_candidate(candidate_id).await
    }

    pub async fn resume_by_id(&self, resume_id: Uuid) -> Result<Option<Resume>, AppError> {
        self.resumes.get(resume_id).await
    }

    /// Replaces every editable field of an existing resume.
    pub async fn update_resume(&self, resume_id: Uuid, fields: ResumeFields) -> Result<Resume, AppError> {
        let mut resume = self
            .resumes
            .get(resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        resume.apply(fields);
        self.resumes.save(resume).await
    }

    pub async fn delete_resume(&self, resume_id: Uuid) -> Result<(), AppError> {
        if self.resumes.delete(resume_id).await? {
            info!(%resume_id, "Deleted resume");
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Resume {resume_id} not found")))
        }
    }

    pub async fn matches_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        self.matches.find_by_candidate(candidate_id).await
    }

    /// Best score first.
    pub async fn matches_for_job(&self, job_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        self.matches.find_by_job(job_id).await
    }
}
