use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Days a fresh invitation stays open.
pub const INVITE_EXPIRY_DAYS: i64 = 10;

/// Join row between one assessment and one candidate, carrying the workflow
/// state. At most one row exists per (assessment_id, candidate_uuid).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentCandidate {
    pub link_id: Uuid,
    pub assessment_id: Uuid,
    pub candidate_uuid: Uuid,
    pub status: String,
    pub score: Option<f64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub feedback: Option<String>,
    pub invited_date: DateTime<Utc>,
    pub invite_expiry: DateTime<Utc>,
}

/// Workflow status of a candidate on one assessment. A flat set: any value may
/// be set from any other, there is no ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    Invited,
    Interviewed,
    Shortlisted,
    Rejected,
}

impl CandidateStatus {
    pub const ALLOWED: [&'static str; 4] = ["invited", "interviewed", "rejected", "shortlisted"];

    /// Normalizes raw client input: trims, lowercases, and maps the legacy
    /// synonym `"interview"` to `"interviewed"`. Anything outside the allowed
    /// set is rejected with a message naming the set.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "invited" => Ok(CandidateStatus::Invited),
            "interview" | "interviewed" => Ok(CandidateStatus::Interviewed),
            "shortlisted" => Ok(CandidateStatus::Shortlisted),
            "rejected" => Ok(CandidateStatus::Rejected),
            _ => Err(Error::BadRequest(format!(
                "Invalid status. Allowed values: {}",
                Self::ALLOWED.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Invited => "invited",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            CandidateStatus::parse("  Shortlisted ").unwrap(),
            CandidateStatus::Shortlisted
        );
        assert_eq!(
            CandidateStatus::parse("REJECTED").unwrap(),
            CandidateStatus::Rejected
        );
    }

    #[test]
    fn interview_maps_to_interviewed() {
        assert_eq!(
            CandidateStatus::parse("Interview").unwrap(),
            CandidateStatus::Interviewed
        );
        assert_eq!(CandidateStatus::parse("Interview").unwrap().as_str(), "interviewed");
    }

    #[test]
    fn unknown_status_is_rejected_with_allowed_set() {
        let err = CandidateStatus::parse("hired").unwrap_err();
        let message = err.to_string();
        for allowed in CandidateStatus::ALLOWED {
            assert!(message.contains(allowed), "message should list {allowed}");
        }
    }
}
