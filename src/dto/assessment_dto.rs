use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::VendorProfile;
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, CandidateWithStatus};

/// Older clients send `duration` and `required_candidates` as numbers or as
/// strings, so both arrive as raw JSON and are coerced leniently instead of
/// failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAssessmentPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<String>,
    #[schema(value_type = Option<i32>)]
    pub duration: Option<JsonValue>,
    pub experience: Option<String>,
    pub work_experience: Option<String>,
    #[schema(value_type = Option<i32>)]
    pub required_candidates: Option<JsonValue>,
}

impl CreateAssessmentPayload {
    /// Number or numeric string; fractions truncate, negatives clamp to 0,
    /// anything else falls back to 0.
    pub fn duration_minutes(&self) -> i32 {
        match &self.duration {
            Some(JsonValue::Number(n)) => n.as_f64().map(truncate_non_negative).unwrap_or(0),
            Some(JsonValue::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(truncate_non_negative)
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Number or integer string; negatives clamp to 0, absent or unparseable
    /// falls back to the default of 1.
    pub fn required_candidates_or_default(&self) -> i32 {
        let parsed = match &self.required_candidates {
            Some(JsonValue::Number(n)) => n.as_f64().map(truncate_non_negative),
            Some(JsonValue::String(s)) => s.trim().parse::<i64>().ok().map(clamp_to_i32),
            _ => None,
        };
        parsed.unwrap_or(1)
    }

    /// `experience` wins over `work_experience` when both are sent.
    pub fn experience(&self) -> Option<&str> {
        self.experience
            .as_deref()
            .or(self.work_experience.as_deref())
    }
}

fn truncate_non_negative(value: f64) -> i32 {
    value.trunc().max(0.0) as i32
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(0, i32::MAX as i64) as i32
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddCandidatePayload {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

/// Candidate as seen from one assessment, carrying its per-link status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateSummary {
    pub id: i64,
    pub candidate_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
    pub status: String,
}

/// Candidate without link context; the add-candidate response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateResponse {
    pub id: i64,
    pub candidate_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_path: Option<String>,
}

/// `id` duplicates `assessment_id` as a string, a response-level compatibility
/// alias for clients that predate the UUID identifier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssessmentResponse {
    pub id: String,
    pub assessment_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub skills: Option<String>,
    pub duration: i32,
    pub work_experience: Option<String>,
    pub vendor_id: i64,
    pub status: String,
    pub required_candidates: i32,
    pub candidates_count: usize,
}

/// Dashboard item: the assessment with its candidates embedded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardAssessment {
    pub id: String,
    pub assessment_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub skills: Option<String>,
    pub duration: i32,
    pub work_experience: Option<String>,
    pub vendor_id: i64,
    pub status: String,
    pub required_candidates: i32,
    pub candidates_count: usize,
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub vendor: VendorProfile,
    pub assessments: Vec<DashboardAssessment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAssessmentResponse {
    pub ok: bool,
    pub assessment: DashboardAssessment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssessmentDetailResponse {
    pub ok: bool,
    pub assessment: AssessmentResponse,
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddCandidateResponse {
    pub ok: bool,
    pub candidate: CandidateResponse,
}

impl AssessmentResponse {
    pub fn new(assessment: Assessment, candidates_count: usize) -> Self {
        Self {
            id: assessment.assessment_id.to_string(),
            assessment_id: assessment.assessment_id,
            title: assessment.title,
            description: assessment.description,
            skills: assessment.skills,
            duration: assessment.duration,
            work_experience: assessment.work_experience,
            vendor_id: assessment.vendor_id,
            status: assessment.status,
            required_candidates: assessment.required_candidates,
            candidates_count,
        }
    }
}

impl DashboardAssessment {
    pub fn new(assessment: Assessment, candidates: Vec<CandidateWithStatus>) -> Self {
        let candidates: Vec<CandidateSummary> = candidates.into_iter().map(Into::into).collect();
        Self {
            id: assessment.assessment_id.to_string(),
            assessment_id: assessment.assessment_id,
            title: assessment.title,
            description: assessment.description,
            skills: assessment.skills,
            duration: assessment.duration,
            work_experience: assessment.work_experience,
            vendor_id: assessment.vendor_id,
            status: assessment.status,
            required_candidates: assessment.required_candidates,
            candidates_count: candidates.len(),
            candidates,
        }
    }
}

impl From<CandidateWithStatus> for CandidateSummary {
    fn from(value: CandidateWithStatus) -> Self {
        Self {
            id: value.id,
            candidate_uuid: value.candidate_uuid,
            name: value.name,
            email: value.email,
            phone: value.phone,
            resume_path: value.resume_path,
            status: value.status,
        }
    }
}

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            candidate_uuid: value.candidate_uuid,
            name: value.name,
            email: value.email,
            phone: value.phone,
            resume_path: value.resume_path,
        }
    }
}
