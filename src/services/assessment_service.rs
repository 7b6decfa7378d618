use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, CandidateWithStatus};
use crate::models::link::{AssessmentCandidate, CandidateStatus};
use crate::store::Store;

/// Assessment operations behind the ownership guard, plus the candidate-link
/// workflow. Callers hand in an already-resolved vendor id.
#[derive(Clone)]
pub struct AssessmentService {
    store: Arc<dyn Store>,
}

impl AssessmentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        vendor_id: i64,
        title: &str,
        description: Option<&str>,
        skills: Option<&str>,
        duration: i32,
        work_experience: Option<&str>,
        required_candidates: i32,
    ) -> Result<Assessment> {
        self.store
            .create_assessment(
                vendor_id,
                title,
                description,
                skills,
                duration,
                work_experience,
                required_candidates,
            )
            .await
    }

    /// The ownership guard. A missing assessment is `NotFound`; one owned by a
    /// different vendor is `Forbidden`. The two are never collapsed.
    pub async fn owned_assessment(
        &self,
        vendor_id: i64,
        assessment_id: Uuid,
    ) -> Result<Assessment> {
        let assessment = self
            .store
            .assessment_by_id(assessment_id)
            .await?
            .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))?;
        if assessment.vendor_id != vendor_id {
            return Err(Error::Forbidden("Not permitted".to_string()));
        }
        Ok(assessment)
    }

    /// Every assessment of the vendor, newest first, each with its linked
    /// candidates.
    pub async fn dashboard_assessments(
        &self,
        vendor_id: i64,
    ) -> Result<Vec<(Assessment, Vec<CandidateWithStatus>)>> {
        let assessments = self.store.assessments_for_vendor(vendor_id).await?;
        let mut result = Vec::with_capacity(assessments.len());
        for assessment in assessments {
            let candidates = self
                .store
                .candidates_for_assessment(assessment.assessment_id)
                .await?;
            result.push((assessment, candidates));
        }
        Ok(result)
    }

    pub async fn assessment_with_candidates(
        &self,
        vendor_id: i64,
        assessment_id: Uuid,
    ) -> Result<(Assessment, Vec<CandidateWithStatus>)> {
        let assessment = self.owned_assessment(vendor_id, assessment_id).await?;
        let candidates = self.store.candidates_for_assessment(assessment_id).await?;
        Ok((assessment, candidates))
    }

    /// Ownership-checked upsert: the candidate is found or created by email,
    /// then linked. Both steps return the existing row when one already
    /// exists, so repeating the call cannot duplicate anything.
    pub async fn add_candidate(
        &self,
        vendor_id: i64,
        assessment_id: Uuid,
        name: &str,
        email: &str,
        phone: Option<&str>,
        resume_url: Option<&str>,
    ) -> Result<(Candidate, AssessmentCandidate)> {
        self.owned_assessment(vendor_id, assessment_id).await?;
        let candidate = self
            .store
            .upsert_candidate(name, email, phone, resume_url)
            .await?;
        let link = self
            .store
            .link_candidate(assessment_id, candidate.candidate_uuid)
            .await?;
        Ok((candidate, link))
    }

    /// Ownership is confirmed before the link is even looked at, so a foreign
    /// vendor sees `Forbidden` here regardless of link state.
    pub async fn update_candidate_status(
        &self,
        vendor_id: i64,
        assessment_id: Uuid,
        candidate_uuid: Uuid,
        requested: &str,
    ) -> Result<CandidateStatus> {
        self.owned_assessment(vendor_id, assessment_id).await?;
        let status = CandidateStatus::parse(requested)?;
        let updated = self
            .store
            .update_link_status(assessment_id, candidate_uuid, status.as_str())
            .await?;
        if updated.is_none() {
            return Err(Error::NotFound(
                "Candidate not linked to this assessment".to_string(),
            ));
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const VENDOR_A: i64 = 1;
    const VENDOR_B: i64 = 2;

    fn setup() -> AssessmentService {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        AssessmentService::new(store)
    }

    async fn seed_assessment(service: &AssessmentService) -> Assessment {
        service
            .create(VENDOR_A, "Backend Eng", None, Some("rust"), 45, None, 2)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let service = setup();
        let assessment = seed_assessment(&service).await;
        assert_eq!(assessment.status, "draft");
        assert_eq!(assessment.required_candidates, 2);
        assert_eq!(assessment.duration, 45);
    }

    #[tokio::test]
    async fn missing_assessment_is_not_found_foreign_is_forbidden() {
        let service = setup();
        let assessment = seed_assessment(&service).await;

        let err = service
            .owned_assessment(VENDOR_A, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = service
            .owned_assessment(VENDOR_B, assessment.assessment_id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn foreign_vendor_cannot_add_or_restatus_candidates() {
        let service = setup();
        let assessment = seed_assessment(&service).await;
        service
            .add_candidate(VENDOR_A, assessment.assessment_id, "C", "c@x.com", None, None)
            .await
            .unwrap();

        let err = service
            .add_candidate(VENDOR_B, assessment.assessment_id, "D", "d@x.com", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));

        // forbidden even though no link exists for this uuid
        let err = service
            .update_candidate_status(
                VENDOR_B,
                assessment.assessment_id,
                Uuid::new_v4(),
                "interviewed",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn adding_the_same_email_twice_is_idempotent() {
        let service = setup();
        let assessment = seed_assessment(&service).await;

        let (candidate, link) = service
            .add_candidate(
                VENDOR_A,
                assessment.assessment_id,
                "Jane",
                "c@x.com",
                None,
                None,
            )
            .await
            .unwrap();
        let (again, link_again) = service
            .add_candidate(
                VENDOR_A,
                assessment.assessment_id,
                "Different Name",
                "c@x.com",
                Some("+100"),
                None,
            )
            .await
            .unwrap();

        assert_eq!(candidate.candidate_uuid, again.candidate_uuid);
        assert_eq!(link.link_id, link_again.link_id);
        assert_eq!(again.name, "Jane");
        assert_eq!(again.phone.as_deref(), Some("+100"));
        assert_eq!(link_again.status, "invited");
    }

    #[tokio::test]
    async fn status_updates_normalize_and_reject_unknown_values() {
        let service = setup();
        let assessment = seed_assessment(&service).await;
        let (candidate, link) = service
            .add_candidate(VENDOR_A, assessment.assessment_id, "C", "c@x.com", None, None)
            .await
            .unwrap();
        assert_eq!(link.status, "invited");

        let status = service
            .update_candidate_status(
                VENDOR_A,
                assessment.assessment_id,
                candidate.candidate_uuid,
                "Interview",
            )
            .await
            .unwrap();
        assert_eq!(status, CandidateStatus::Interviewed);

        let err = service
            .update_candidate_status(
                VENDOR_A,
                assessment.assessment_id,
                candidate.candidate_uuid,
                "hired",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));

        // the rejected value must not have clobbered the stored one
        let candidates = service
            .store
            .candidates_for_assessment(assessment.assessment_id)
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].status, "interviewed");
    }

    #[tokio::test]
    async fn restatus_of_an_unlinked_candidate_is_not_found() {
        let service = setup();
        let assessment = seed_assessment(&service).await;

        let err = service
            .update_candidate_status(
                VENDOR_A,
                assessment.assessment_id,
                Uuid::new_v4(),
                "rejected",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn dashboard_groups_candidates_under_their_assessments() {
        let service = setup();
        let first = seed_assessment(&service).await;
        let second = service
            .create(VENDOR_A, "Data Eng", None, None, 0, None, 1)
            .await
            .unwrap();
        service
            .add_candidate(VENDOR_A, first.assessment_id, "C", "c@x.com", None, None)
            .await
            .unwrap();

        let rows = service.dashboard_assessments(VENDOR_A).await.unwrap();
        assert_eq!(rows.len(), 2);
        let (_, first_candidates) = rows
            .iter()
            .find(|(a, _)| a.assessment_id == first.assessment_id)
            .expect("first assessment present");
        assert_eq!(first_candidates.len(), 1);
        let (_, second_candidates) = rows
            .iter()
            .find(|(a, _)| a.assessment_id == second.assessment_id)
            .expect("second assessment present");
        assert!(second_candidates.is_empty());

        assert!(service
            .dashboard_assessments(VENDOR_B)
            .await
            .unwrap()
            .is_empty());
    }
}
