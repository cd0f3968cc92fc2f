use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Compatibility of one candidate with one job. Unique per (candidate_id, job_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobMatch {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    /// 0 – 100
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobMatch {
    pub fn new(candidate_id: Uuid, job_id: Uuid, score: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            candidate_id,
            job_id,
            score,
            created_at: now,
            updated_at: now,
        }
    }
}
