use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// `candidate_uuid` is the authoritative identity; the serial `id` survives
/// only as a response-level compatibility alias for older clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub candidate_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Candidate joined with its workflow status on one assessment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateWithStatus {
    pub id: i64,
    pub candidate_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
    pub status: String,
}
