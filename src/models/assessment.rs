use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub assessment_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub vendor_id: i64,
    pub skills: Option<String>,
    pub duration: i32,
    pub work_experience: Option<String>,
    pub status: String,
    pub required_candidates: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
