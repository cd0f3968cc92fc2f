use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A parsed resume. At most one per candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything a parse produces and a manual edit replaces wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
}

impl Resume {
    pub fn from_fields(id: Uuid, candidate_id: Uuid, fields: ResumeFields) -> Self {
        let now = Utc::now();
        let mut resume = Self {
            id,
            candidate_id,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        resume.apply(fields);
        resume
    }

    pub fn apply(&mut self, update: ResumeFields) {
        let ResumeFields {
            name,
            email,
            phone,
            skills,
            experience,
            education,
        } = update;
        self.name = name;
        self.email = email;
        self.phone = phone;
        self.skills = skills;
        self.experience = experience;
        self.education = education;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_every_field_but_identity() {
        let id = Uuid::new_v4();
        let candidate_id = Uuid::new_v4();
        let created = Utc::now();
        let mut resume = Resume {
            id,
            candidate_id,
            name: "Old Name".into(),
            email: "old@example.com".into(),
            phone: "555-000-0000".into(),
            skills: vec!["Java".into()],
            experience: vec!["Engineer at Initech 2010".into()],
            education: vec![],
            created_at: created,
            updated_at: created,
        };

        resume.apply(ResumeFields {
            name: "New Name".into(),
            email: "new@example.com".into(),
            phone: "555-111-2222".into(),
            skills: vec![],
            experience: vec![],
            education: vec!["MSc, Example University 2020".into()],
        });

        assert_eq!(resume.id, id);
        assert_eq!(resume.candidate_id, candidate_id);
        assert_eq!(resume.created_at, created);
        assert_eq!(resume.name, "New Name");
        assert!(resume.skills.is_empty());
        assert!(resume.experience.is_empty());
        assert_eq!(resume.education.len(), 1);
        assert!(resume.updated_at >= created);
    }

    #[test]
    fn test_resume_serializes_to_json() {
        let now = Utc::now();
        let resume = Resume {
            id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            name: "Jane Doe".into(),
            email: "jane.doe@example.com".into(),
            phone: "555-867-5309".into(),
            skills: vec!["Java".into(), "React".into()],
            experience: vec![],
            education: vec![],
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&resume).unwrap();
        assert_eq!(json["skills"][1], "React");
        assert_eq!(json["phone"], "555-867-5309");
    }
}
