pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, CandidateWithStatus};
use crate::models::link::AssessmentCandidate;
use crate::models::principal::PrincipalRef;
use crate::models::session::SessionRecord;
use crate::models::user::User;
use crate::models::vendor::Vendor;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Every query the services need, behind one object-safe seam. `PgStore` is
/// the production implementation; `MemoryStore` backs the test suites.
///
/// Uniqueness of vendor/user/candidate emails, of session tokens and of
/// (assessment_id, candidate_uuid) pairs is enforced here, inside single
/// atomic statements, so racing create-if-absent callers can never produce a
/// duplicate row.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_vendor(
        &self,
        company_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Vendor>;
    async fn vendor_by_email(&self, email: &str) -> Result<Option<Vendor>>;
    async fn vendor_by_id(&self, id: i64) -> Result<Option<Vendor>>;
    async fn update_vendor_password(&self, id: i64, password_hash: &str) -> Result<()>;

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Persists an issued token. Re-persisting the same token string keeps a
    /// single record (a token maps to at most one active session).
    async fn insert_session(
        &self,
        token: &str,
        owner: PrincipalRef,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<SessionRecord>;
    /// Returns whatever record exists for the token, expired or not. Callers
    /// decide what expiry means.
    async fn session_by_token(&self, token: &str) -> Result<Option<SessionRecord>>;
    /// Idempotent: deleting an absent token is not an error.
    async fn delete_session(&self, token: &str) -> Result<()>;
    /// Janitorial sweep; returns how many rows went away.
    async fn delete_expired_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    #[allow(clippy::too_many_arguments)]
    async fn create_assessment(
        &self,
        vendor_id: i64,
        title: &str,
        description: Option<&str>,
        skills: Option<&str>,
        duration: i32,
        work_experience: Option<&str>,
        required_candidates: i32,
    ) -> Result<Assessment>;
    async fn assessment_by_id(&self, assessment_id: Uuid) -> Result<Option<Assessment>>;
    /// Newest first.
    async fn assessments_for_vendor(&self, vendor_id: i64) -> Result<Vec<Assessment>>;

    /// Find-or-create by email. Phone and resume are refreshed when supplied;
    /// the stored name of an existing candidate is left alone.
    async fn upsert_candidate(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        resume_path: Option<&str>,
    ) -> Result<Candidate>;
    /// Find-or-create the link; an existing link comes back unchanged.
    async fn link_candidate(
        &self,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
    ) -> Result<AssessmentCandidate>;
    /// Candidates on an assessment with their per-link status, oldest
    /// invitation first.
    async fn candidates_for_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<CandidateWithStatus>>;
    /// `None` when no link exists for the pair.
    async fn update_link_status(
        &self,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
        status: &str,
    ) -> Result<Option<AssessmentCandidate>>;
}
