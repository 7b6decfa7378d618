use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
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

/// Production [`Store`] on PostgreSQL. Queries are runtime-checked
/// (`sqlx::query_as` with `FromRow`); the uniqueness guarantees live in the
/// schema's unique indexes, so every find-or-create here is one atomic
/// `INSERT ... ON CONFLICT` statement.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_vendor(
        &self,
        company_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Vendor> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (company_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, company_name, email, password_hash, created_at
            "#,
        )
        .bind(company_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(vendor)
    }

    async fn vendor_by_email(&self, email: &str) -> Result<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, company_name, email, password_hash, created_at
            FROM vendors
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vendor)
    }

    async fn vendor_by_id(&self, id: i64) -> Result<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT id, company_name, email, password_hash, created_at
            FROM vendors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vendor)
    }

    async fn update_vendor_password(&self, id: i64, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE vendors SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Vendor not found".to_string()));
        }
        Ok(())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_session(
        &self,
        token: &str,
        owner: PrincipalRef,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<SessionRecord> {
        let (vendor_id, user_id) = match owner {
            PrincipalRef::Vendor(id) => (Some(id), None),
            PrincipalRef::User(id) => (None, Some(id)),
        };
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            INSERT INTO sessions (token, vendor_id, user_id, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (token) DO UPDATE SET expires_at = EXCLUDED.expires_at
            RETURNING id, token, user_id, vendor_id, created_at, expires_at
            "#,
        )
        .bind(token)
        .bind(vendor_id)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn session_by_token(&self, token: &str) -> Result<Option<SessionRecord>> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, token, user_id, vendor_id, created_at, expires_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete_session(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_expired_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE expires_at IS NOT NULL AND expires_at <= $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
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
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            INSERT INTO assessments
                (assessment_id, title, description, vendor_id, skills, duration, work_experience, required_candidates)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING assessment_id, title, description, vendor_id, skills, duration,
                      work_experience, status, required_candidates, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(description)
        .bind(vendor_id)
        .bind(skills)
        .bind(duration)
        .bind(work_experience)
        .bind(required_candidates)
        .fetch_one(&self.pool)
        .await?;
        Ok(assessment)
    }

    async fn assessment_by_id(&self, assessment_id: Uuid) -> Result<Option<Assessment>> {
        let assessment = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT assessment_id, title, description, vendor_id, skills, duration,
                   work_experience, status, required_candidates, created_at, updated_at
            FROM assessments
            WHERE assessment_id = $1
            "#,
        )
        .bind(assessment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assessment)
    }

    async fn assessments_for_vendor(&self, vendor_id: i64) -> Result<Vec<Assessment>> {
        let assessments = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT assessment_id, title, description, vendor_id, skills, duration,
                   work_experience, status, required_candidates, created_at, updated_at
            FROM assessments
            WHERE vendor_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assessments)
    }

    async fn upsert_candidate(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        resume_path: Option<&str>,
    ) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (candidate_uuid, name, email, phone, resume_path)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO UPDATE
                SET phone = COALESCE(EXCLUDED.phone, candidates.phone),
                    resume_path = COALESCE(EXCLUDED.resume_path, candidates.resume_path)
            RETURNING id, candidate_uuid, name, email, phone, resume_path, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(resume_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn link_candidate(
        &self,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
    ) -> Result<AssessmentCandidate> {
        let now = Utc::now();
        let link = sqlx::query_as::<_, AssessmentCandidate>(
            r#"
            INSERT INTO assessment_candidates
                (link_id, assessment_id, candidate_uuid, status, invited_date, invite_expiry)
            VALUES ($1, $2, $3, 'invited', $4, $5)
            ON CONFLICT (assessment_id, candidate_uuid)
                DO UPDATE SET assessment_id = EXCLUDED.assessment_id -- no-op update so the existing row comes back
            RETURNING link_id, assessment_id, candidate_uuid, status, score, submitted_at,
                      feedback, invited_date, invite_expiry
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(assessment_id)
        .bind(candidate_uuid)
        .bind(now)
        .bind(now + Duration::days(INVITE_EXPIRY_DAYS))
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    async fn candidates_for_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<CandidateWithStatus>> {
        let rows = sqlx::query_as::<_, CandidateWithStatus>(
            r#"
            SELECT c.id, c.candidate_uuid, c.name, c.email, c.phone, c.resume_path, ac.status
            FROM assessment_candidates ac
            JOIN candidates c ON c.candidate_uuid = ac.candidate_uuid
            WHERE ac.assessment_id = $1
            ORDER BY ac.invited_date ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_link_status(
        &self,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
        status: &str,
    ) -> Result<Option<AssessmentCandidate>> {
        let link = sqlx::query_as::<_, AssessmentCandidate>(
            r#"
            UPDATE assessment_candidates
            SET status = $3
            WHERE assessment_id = $1 AND candidate_uuid = $2
            RETURNING link_id, assessment_id, candidate_uuid, status, score, submitted_at,
                      feedback, invited_date, invite_expiry
            "#,
        )
        .bind(assessment_id)
        .bind(candidate_uuid)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }
}
