use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::assessment_dto::{
        AddCandidatePayload, AddCandidateResponse, AssessmentDetailResponse, AssessmentResponse,
        CreateAssessmentPayload, CreateAssessmentResponse, DashboardAssessment, DashboardResponse,
        UpdateStatusPayload,
    },
    dto::auth_dto::ChangePasswordPayload,
    error::{Error, Result},
    middleware::auth::CurrentVendor,
    AppState,
};

fn parse_assessment_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| Error::BadRequest("Invalid assessment ID format".to_string()))
}

fn parse_candidate_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::BadRequest("Invalid candidate ID format".to_string()))
}

#[utoipa::path(
    get,
    path = "/vendor/dashboard",
    responses(
        (status = 200, description = "Vendor profile and assessments with their candidates", body = DashboardResponse),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentVendor(vendor): CurrentVendor,
) -> Result<impl IntoResponse> {
    let rows = state
        .assessment_service
        .dashboard_assessments(vendor.id)
        .await?;
    let assessments = rows
        .into_iter()
        .map(|(assessment, candidates)| DashboardAssessment::new(assessment, candidates))
        .collect();
    Ok(Json(DashboardResponse {
        vendor: vendor.into(),
        assessments,
    }))
}

#[utoipa::path(
    post,
    path = "/vendor/create-assessment",
    request_body = CreateAssessmentPayload,
    responses(
        (status = 200, description = "Assessment created", body = CreateAssessmentResponse),
        (status = 400, description = "Title missing"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn create_assessment(
    State(state): State<AppState>,
    CurrentVendor(vendor): CurrentVendor,
    Json(payload): Json<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::BadRequest("Title is required".to_string()))?;

    let assessment = state
        .assessment_service
        .create(
            vendor.id,
            title,
            payload.description.as_deref(),
            payload.skills.as_deref(),
            payload.duration_minutes(),
            payload.experience(),
            payload.required_candidates_or_default(),
        )
        .await?;
    Ok(Json(CreateAssessmentResponse {
        ok: true,
        assessment: DashboardAssessment::new(assessment, Vec::new()),
    }))
}

#[utoipa::path(
    get,
    path = "/vendor/assessment/{assessment_id}",
    params(
        ("assessment_id" = Uuid, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment with its candidates", body = AssessmentDetailResponse),
        (status = 400, description = "Malformed assessment ID"),
        (status = 403, description = "Owned by a different vendor"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    CurrentVendor(vendor): CurrentVendor,
    Path(assessment_id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessment_id = parse_assessment_id(&assessment_id)?;
    let (assessment, candidates) = state
        .assessment_service
        .assessment_with_candidates(vendor.id, assessment_id)
        .await?;
    Ok(Json(AssessmentDetailResponse {
        ok: true,
        assessment: AssessmentResponse::new(assessment, candidates.len()),
        candidates: candidates.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/vendor/assessment/{assessment_id}/add-candidate",
    params(
        ("assessment_id" = Uuid, Path, description = "Assessment ID")
    ),
    request_body = AddCandidatePayload,
    responses(
        (status = 200, description = "Candidate created or reused, and linked", body = AddCandidateResponse),
        (status = 400, description = "Name or email missing"),
        (status = 403, description = "Owned by a different vendor"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn add_candidate(
    State(state): State<AppState>,
    CurrentVendor(vendor): CurrentVendor,
    Path(assessment_id): Path<String>,
    Json(payload): Json<AddCandidatePayload>,
) -> Result<impl IntoResponse> {
    let assessment_id = parse_assessment_id(&assessment_id)?;
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (Some(name), Some(email)) = (name, email) else {
        return Err(Error::BadRequest("Name and email are required".to_string()));
    };
    payload.validate()?;

    let (candidate, _link) = state
        .assessment_service
        .add_candidate(
            vendor.id,
            assessment_id,
            name,
            email,
            payload.phone.as_deref(),
            payload.resume_url.as_deref(),
        )
        .await?;
    Ok(Json(AddCandidateResponse {
        ok: true,
        candidate: candidate.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/vendor/assessment/{assessment_id}/candidate/{candidate_uuid}/status",
    params(
        ("assessment_id" = Uuid, Path, description = "Assessment ID"),
        ("candidate_uuid" = Uuid, Path, description = "Candidate UUID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status normalized and stored"),
        (status = 400, description = "Status outside the allowed set"),
        (status = 403, description = "Owned by a different vendor"),
        (status = 404, description = "Assessment or link not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate_status(
    State(state): State<AppState>,
    CurrentVendor(vendor): CurrentVendor,
    Path((assessment_id, candidate_uuid)): Path<(String, String)>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let assessment_id = parse_assessment_id(&assessment_id)?;
    let candidate_uuid = parse_candidate_uuid(&candidate_uuid)?;
    let status = state
        .assessment_service
        .update_candidate_status(
            vendor.id,
            assessment_id,
            candidate_uuid,
            payload.status.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(Json(json!({ "ok": true, "status": status.as_str() })))
}

#[utoipa::path(
    post,
    path = "/vendor/change-password",
    request_body = ChangePasswordPayload,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Current password incorrect"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentVendor(vendor): CurrentVendor,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .auth_service
        .change_vendor_password(&vendor, &payload.old_password, &payload.new_password)
        .await?;
    Ok(Json(json!({ "ok": true, "detail": "Password updated" })))
}
