//! In-process implementation of every collaborator trait.
//!
//! Job matches are keyed by `(candidate_id, job_id)` and resumes by
//! `candidate_id`, so uniqueness holds regardless of how callers use it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::job_match::JobMatch;
use crate::models::resume::Resume;
use crate::store::{CandidateDirectory, JobCatalog, MatchStore, ResumeStore};

#[derive(Debug, Default)]
struct Tables {
    candidates: HashMap<Uuid, Candidate>,
    jobs: Vec<Job>,
    resumes: HashMap<Uuid, Resume>, // keyed by candidate_id
    matches: HashMap<(Uuid, Uuid), JobMatch>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_candidate(&self, candidate: Candidate) {
        self.write().candidates.insert(candidate.id, candidate);
    }

    /// Adds or replaces a job, keeping catalog order stable.
    pub fn insert_job(&self, job: Job) {
        let mut tables = self.write();
        match tables.jobs.iter_mut().find(|j| j.id == job.id) {
            Some(existing) => *existing = job,
            None => tables.jobs.push(job),
        }
    }

    pub fn remove_job(&self, job_id: Uuid) {
        self.write().jobs.retain(|j| j.id != job_id);
    }

    pub fn match_count(&self) -> usize {
        self.read().matches.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn oldest_first(mut matches: Vec<JobMatch>) -> Vec<JobMatch> {
    matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    matches
}

fn best_first(mut matches: Vec<JobMatch>) -> Vec<JobMatch> {
    matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
    matches
}

#[async_trait]
impl CandidateDirectory for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Candidate, AppError> {
        self.read()
            .candidates
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
    }
}

#[async_trait]
impl JobCatalog for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.read().jobs.clone())
    }
}

#[async_trait]
impl ResumeStore for InMemoryStore {
    async fn get_by_candidate(&self, candidate_id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.read().resumes.get(&candidate_id).cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.read().resumes.values().find(|r| r.id == id).cloned())
    }

    async fn save(&self, mut resume: Resume) -> Result<Resume, AppError> {
        let mut tables = self.write();
        if let Some(existing) = tables.resumes.get(&resume.candidate_id) {
            resume.created_at = existing.created_at;
        }
        resume.updated_at = Utc::now();
        tables.resumes.insert(resume.candidate_id, resume.clone());
        Ok(resume)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write();
        let before = tables.resumes.len();
        tables.resumes.retain(|_, r| r.id != id);
        Ok(tables.resumes.len() != before)
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn find_by_candidate(&self, candidate_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        let matches = self
            .read()
            .matches
            .values()
            .filter(|m| m.candidate_id == candidate_id)
            .cloned()
            .collect();
        Ok(oldest_first(matches))
    }

    async fn find_by_job(&self, job_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        let matches = self
            .read()
            .matches
            .values()
            .filter(|m| m.job_id == job_id)
            .cloned()
            .collect();
        Ok(best_first(matches))
    }

    async fn save(&self, mut job_match: JobMatch) -> Result<JobMatch, AppError> {
        let mut tables = self.write();
        let key = (job_match.candidate_id, job_match.job_id);
        if let Some(existing) = tables.matches.get(&key) {
            job_match.id = existing.id;
            job_match.created_at = existing.created_at;
        }
        job_match.updated_at = Utc::now();
        tables.matches.insert(key, job_match.clone());
        Ok(job_match)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write();
        let before = tables.matches.len();
        tables.matches.retain(|_, m| m.id != id);
        Ok(tables.matches.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeFields;

    fn fields(name: &str) -> ResumeFields {
        ResumeFields {
            name: name.to_string(),
            email: "x@example.com".to_string(),
            phone: "555-867-5309".to_string(),
            skills: vec!["Java".to_string()],
            experience: vec![],
            education: vec![],
        }
    }

    #[tokio::test]
    async fn test_unknown_candidate_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_match_save_is_keyed_by_pair() {
        let store = InMemoryStore::new();
        let (candidate, job) = (Uuid::new_v4(), Uuid::new_v4());

        let first = MatchStore::save(&store, JobMatch::new(candidate, job, 40))
            .await
            .unwrap();
        let second = MatchStore::save(&store, JobMatch::new(candidate, job, 90))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(store.match_count(), 1);
        let stored = store.find_by_candidate(candidate).await.unwrap();
        assert_eq!(stored[0].score, 90);
        assert_eq!(store.find_by_job(job).await.unwrap().len(), 1);

        assert!(MatchStore::delete(&store, first.id).await.unwrap());
        assert_eq!(store.match_count(), 0);
    }

    #[tokio::test]
    async fn test_find_by_job_ranks_by_score() {
        let store = InMemoryStore::new();
        let job = Uuid::new_v4();
        for score in [20, 90, 55] {
            MatchStore::save(&store, JobMatch::new(Uuid::new_v4(), job, score))
                .await
                .unwrap();
        }
        let scores: Vec<i32> = store
            .find_by_job(job)
            .await
            .unwrap()
            .iter()
            .map(|m| m.score)
            .collect();
        assert_eq!(scores, vec![90, 55, 20]);
    }

    #[tokio::test]
    async fn test_one_resume_per_candidate() {
        let store = InMemoryStore::new();
        let candidate = Uuid::new_v4();

        let first = Resume::from_fields(Uuid::new_v4(), candidate, fields("First Try"));
        let first_id = first.id;
        ResumeStore::save(&store, first).await.unwrap();
        let second = Resume::from_fields(Uuid::new_v4(), candidate, fields("Second Try"));
        ResumeStore::save(&store, second.clone()).await.unwrap();

        let current = store.get_by_candidate(candidate).await.unwrap().unwrap();
        assert_eq!(current.id, second.id);
        assert_eq!(current.name, "Second Try");
        assert!(store.get(first_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_resume() {
        let store = InMemoryStore::new();
        let resume = Resume::from_fields(Uuid::new_v4(), Uuid::new_v4(), fields("Jane Doe"));
        let id = resume.id;
        ResumeStore::save(&store, resume).await.unwrap();

        assert!(ResumeStore::delete(&store, id).await.unwrap());
        assert!(!ResumeStore::delete(&store, id).await.unwrap());
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_catalog_keeps_insertion_order() {
        let store = InMemoryStore::new();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for (i, id) in ids.iter().enumerate() {
            store.insert_job(Job {
                id: *id,
                title: format!("Job {i}"),
                company: "Acme".to_string(),
                description: String::new(),
                skills: vec![],
            });
        }
        store.remove_job(ids[1]);

        let jobs = store.get_all().await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, ids[0]);
        assert_eq!(jobs[1].id, ids[2]);
    }
}
