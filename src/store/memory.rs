use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, CandidateWithStatus};
use crate::models::link::{AssessmentCandidate, INVITE_EXPIRY_DAYS};
use crate::models::principal::PrincipalRef;
use crate::models::session::SessionRecord;
use crate::models::user::User;
use crate::models::vendor::Vendor;
use crate::store::Store;

/// Mutex-guarded maps implementing [`Store`] without a database. Backs the
/// test suites; mirrors the uniqueness rules `PgStore` gets from its indexes.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    vendors: Vec<Vendor>,
    users: Vec<User>,
    sessions: Vec<SessionRecord>,
    assessments: HashMap<Uuid, Assessment>,
    candidates: Vec<Candidate>,
    links: HashMap<(Uuid, Uuid), AssessmentCandidate>,
    next_vendor_id: i64,
    next_user_id: i64,
    next_session_id: i64,
    next_candidate_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store mutex poisoned")
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_vendor(
        &self,
        company_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Vendor> {
        let mut inner = self.lock();
        if inner.vendors.iter().any(|v| v.email == email) {
            return Err(Error::Conflict("Resource already exists".to_string()));
        }
        inner.next_vendor_id += 1;
        let vendor = Vendor {
            id: inner.next_vendor_id,
            company_name: company_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(Utc::now()),
        };
        inner.vendors.push(vendor.clone());
        Ok(vendor)
    }

    async fn vendor_by_email(&self, email: &str) -> Result<Option<Vendor>> {
        Ok(self.lock().vendors.iter().find(|v| v.email == email).cloned())
    }

    async fn vendor_by_id(&self, id: i64) -> Result<Option<Vendor>> {
        Ok(self.lock().vendors.iter().find(|v| v.id == id).cloned())
    }

    async fn update_vendor_password(&self, id: i64, password_hash: &str) -> Result<()> {
        let mut inner = self.lock();
        match inner.vendors.iter_mut().find(|v| v.id == id) {
            Some(vendor) => {
                vendor.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(Error::NotFound("Vendor not found".to_string())),
        }
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(Error::Conflict("Resource already exists".to_string()));
        }
        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(Utc::now()),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_session(
        &self,
        token: &str,
        owner: PrincipalRef,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<SessionRecord> {
        let mut inner = self.lock();
        let (vendor_id, user_id) = match owner {
            PrincipalRef::Vendor(id) => (Some(id), None),
            PrincipalRef::User(id) => (None, Some(id)),
        };
        if let Some(existing) = inner.sessions.iter_mut().find(|s| s.token == token) {
            existing.expires_at = expires_at;
            return Ok(existing.clone());
        }
        inner.next_session_id += 1;
        let record = SessionRecord {
            id: inner.next_session_id,
            token: token.to_string(),
            user_id,
            vendor_id,
            created_at: Some(Utc::now()),
            expires_at,
        };
        inner.sessions.push(record.clone());
        Ok(record)
    }

    async fn session_by_token(&self, token: &str) -> Result<Option<SessionRecord>> {
        Ok(self.lock().sessions.iter().find(|s| s.token == token).cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<()> {
        self.lock().sessions.retain(|s| s.token != token);
        Ok(())
    }

    async fn delete_expired_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut inner = self.lock();
        let before = inner.sessions.len();
        inner
            .sessions
            .retain(|s| s.expires_at.map(|at| at > cutoff).unwrap_or(true));
        Ok((before - inner.sessions.len()) as u64)
    }

    async fn create_assessment(
        &self,
        vendor_id: i64,
        title: &str,
        description: Option<&str>,
        skills: Option<&str>,
        duration: i32,
        work_experience: Option<&str>,
        required_candidates: i32,
    ) -> Result<Assessment> {
        let mut inner = self.lock();
        let assessment = Assessment {
            assessment_id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.map(str::to_string),
            vendor_id,
            skills: skills.map(str::to_string),
            duration,
            work_experience: work_experience.map(str::to_string),
            status: "draft".to_string(),
            required_candidates,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        inner
            .assessments
            .insert(assessment.assessment_id, assessment.clone());
        Ok(assessment)
    }

    async fn assessment_by_id(&self, assessment_id: Uuid) -> Result<Option<Assessment>> {
        Ok(self.lock().assessments.get(&assessment_id).cloned())
    }

    async fn assessments_for_vendor(&self, vendor_id: i64) -> Result<Vec<Assessment>> {
        let mut list: Vec<Assessment> = self
            .lock()
            .assessments
            .values()
            .filter(|a| a.vendor_id == vendor_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn upsert_candidate(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        resume_path: Option<&str>,
    ) -> Result<Candidate> {
        let mut inner = self.lock();
        if let Some(existing) = inner.candidates.iter_mut().find(|c| c.email == email) {
            if let Some(phone) = phone {
                existing.phone = Some(phone.to_string());
            }
            if let Some(resume) = resume_path {
                existing.resume_path = Some(resume.to_string());
            }
            return Ok(existing.clone());
        }
        inner.next_candidate_id += 1;
        let candidate = Candidate {
            id: inner.next_candidate_id,
            candidate_uuid: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            resume_path: resume_path.map(str::to_string),
            created_at: Some(Utc::now()),
        };
        inner.candidates.push(candidate.clone());
        Ok(candidate)
    }

    async fn link_candidate(
        &self,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
    ) -> Result<AssessmentCandidate> {
        let mut inner = self.lock();
        let key = (assessment_id, candidate_uuid);
        if let Some(link) = inner.links.get(&key) {
            return Ok(link.clone());
        }
        let now = Utc::now();
        let link = AssessmentCandidate {
            link_id: Uuid::new_v4(),
            assessment_id,
            candidate_uuid,
            status: "invited".to_string(),
            score: None,
            submitted_at: None,
            feedback: None,
            invited_date: now,
            invite_expiry: now + Duration::days(INVITE_EXPIRY_DAYS),
        };
        inner.links.insert(key, link.clone());
        Ok(link)
    }

    async fn candidates_for_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<CandidateWithStatus>> {
        let inner = self.lock();
        let mut rows: Vec<(DateTime<Utc>, CandidateWithStatus)> = inner
            .links
            .values()
            .filter(|link| link.assessment_id == assessment_id)
            .filter_map(|link| {
                inner
                    .candidates
                    .iter()
                    .find(|c| c.candidate_uuid == link.candidate_uuid)
                    .map(|c| {
                        (
                            link.invited_date,
                            CandidateWithStatus {
                                id: c.id,
                                candidate_uuid: c.candidate_uuid,
                                name: c.name.clone(),
                                email: c.email.clone(),
                                phone: c.phone.clone(),
                                resume_path: c.resume_path.clone(),
                                status: link.status.clone(),
                            },
                        )
                    })
            })
            .collect();
        rows.sort_by_key(|(invited, _)| *invited);
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn update_link_status(
        &self,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
        status: &str,
    ) -> Result<Option<AssessmentCandidate>> {
        let mut inner = self.lock();
        match inner.links.get_mut(&(assessment_id, candidate_uuid)) {
            Some(link) => {
                link.status = status.to_string();
                Ok(Some(link.clone()))
            }
            None => Ok(None),
        }
    }
}
