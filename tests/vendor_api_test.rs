use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use assessment_backend::{
    config::Config,
    routes,
    store::{MemoryStore, Store},
    AppState,
};

fn test_app() -> Router {
    let config = Config {
        server_address: "127.0.0.1:0".to_string(),
        database_url: String::new(),
        jwt_secret: "test_secret_key".to_string(),
        frontend_origin: "http://localhost:3000".to_string(),
        token_ttl_hours: 24,
        session_sweep_interval_secs: 3600,
    };
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    routes::router(AppState::new(store, &config))
}

async fn post_json(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    body: JsonValue,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }
    let req = builder.body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(resp: Response<Body>) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn session_cookie(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn vendor_session(app: &Router, company: &str, email: &str) -> String {
    let resp = post_json(
        app,
        "/auth/vendor/register",
        None,
        json!({ "company_name": company, "email": email, "password": "secret123" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = post_json(
        app,
        "/auth/vendor/login",
        None,
        json!({ "email": email, "password": "secret123" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    session_cookie(&resp)
}

async fn create_assessment(app: &Router, cookie: &str, payload: JsonValue) -> JsonValue {
    let resp = post_json(app, "/vendor/create-assessment", Some(cookie), payload).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

#[tokio::test]
async fn assessment_lifecycle_end_to_end() {
    let app = test_app();
    let cookie = vendor_session(&app, "Acme", "acme@example.com").await;

    let body = create_assessment(
        &app,
        &cookie,
        json!({
            "title": "Backend Screen",
            "description": "Rust take-home",
            "skills": "rust,sql",
            "duration": "45.9",
            "experience": "3+ years",
            "required_candidates": 2
        }),
    )
    .await;
    assert_eq!(body["ok"], json!(true));
    let assessment = &body["assessment"];
    assert_eq!(assessment["title"], json!("Backend Screen"));
    assert_eq!(assessment["duration"], json!(45));
    assert_eq!(assessment["required_candidates"], json!(2));
    assert_eq!(assessment["work_experience"], json!("3+ years"));
    assert_eq!(assessment["status"], json!("draft"));
    assert_eq!(assessment["candidates_count"], json!(0));
    let assessment_id = assessment["assessment_id"].as_str().unwrap().to_string();
    assert_eq!(assessment["id"].as_str().unwrap(), assessment_id);

    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/add-candidate", assessment_id),
        Some(&cookie),
        json!({ "name": "Alice", "email": "alice@example.com" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    let candidate_uuid = body["candidate"]["candidate_uuid"]
        .as_str()
        .unwrap()
        .to_string();

    // Adding the same email again reuses the candidate and the link.
    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/add-candidate", assessment_id),
        Some(&cookie),
        json!({ "name": "Alice Again", "email": "alice@example.com" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body["candidate"]["candidate_uuid"].as_str().unwrap(),
        candidate_uuid
    );

    // "Interview" normalizes to the stored form.
    let resp = post_json(
        &app,
        &format!(
            "/vendor/assessment/{}/candidate/{}/status",
            assessment_id, candidate_uuid
        ),
        Some(&cookie),
        json!({ "status": "Interview" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["status"], json!("interviewed"));

    let resp = get(&app, "/vendor/dashboard", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["vendor"]["email"], json!("acme@example.com"));
    let assessments = body["assessments"].as_array().unwrap();
    assert_eq!(assessments.len(), 1);
    assert_eq!(assessments[0]["candidates_count"], json!(1));
    let candidates = assessments[0]["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["status"], json!("interviewed"));
    assert_eq!(candidates[0]["email"], json!("alice@example.com"));

    let resp = get(
        &app,
        &format!("/vendor/assessment/{}", assessment_id),
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["assessment"]["candidates_count"], json!(1));
    assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_assessment_requires_title() {
    let app = test_app();
    let cookie = vendor_session(&app, "Acme", "acme@example.com").await;

    let resp = post_json(&app, "/vendor/create-assessment", Some(&cookie), json!({})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Title is required"));

    let resp = post_json(
        &app,
        "/vendor/create-assessment",
        Some(&cookie),
        json!({ "title": "   " }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_assessment_coerces_loose_numeric_fields() {
    let app = test_app();
    let cookie = vendor_session(&app, "Acme", "acme@example.com").await;

    // Garbage duration falls back to zero rather than failing the request.
    let body = create_assessment(
        &app,
        &cookie,
        json!({ "title": "A", "duration": "soon", "required_candidates": "3" }),
    )
    .await;
    assert_eq!(body["assessment"]["duration"], json!(0));
    assert_eq!(body["assessment"]["required_candidates"], json!(3));

    // Negative numbers clamp to zero; a fractional string is not an integer
    // count, so the default of one applies.
    let body = create_assessment(
        &app,
        &cookie,
        json!({ "title": "B", "duration": -30, "required_candidates": "3.5" }),
    )
    .await;
    assert_eq!(body["assessment"]["duration"], json!(0));
    assert_eq!(body["assessment"]["required_candidates"], json!(1));

    // Absent fields: no duration, one required candidate.
    let body = create_assessment(&app, &cookie, json!({ "title": "C" })).await;
    assert_eq!(body["assessment"]["duration"], json!(0));
    assert_eq!(body["assessment"]["required_candidates"], json!(1));

    // A fractional number truncates.
    let body = create_assessment(
        &app,
        &cookie,
        json!({ "title": "D", "duration": 90.7, "required_candidates": 2.9 }),
    )
    .await;
    assert_eq!(body["assessment"]["duration"], json!(90));
    assert_eq!(body["assessment"]["required_candidates"], json!(2));
}

#[tokio::test]
async fn add_candidate_validates_input() {
    let app = test_app();
    let cookie = vendor_session(&app, "Acme", "acme@example.com").await;

    let body = create_assessment(&app, &cookie, json!({ "title": "Screen" })).await;
    let assessment_id = body["assessment"]["assessment_id"].as_str().unwrap().to_string();

    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/add-candidate", assessment_id),
        Some(&cookie),
        json!({ "name": "Alice" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Name and email are required"));

    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/add-candidate", assessment_id),
        Some(&cookie),
        json!({ "name": "Alice", "email": "not-an-email" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["kind"], json!("validation_error"));
}

#[tokio::test]
async fn foreign_vendor_cannot_touch_assessment() {
    let app = test_app();
    let owner = vendor_session(&app, "Acme", "acme@example.com").await;
    let intruder = vendor_session(&app, "Rival", "rival@example.com").await;

    let body = create_assessment(&app, &owner, json!({ "title": "Private" })).await;
    let assessment_id = body["assessment"]["assessment_id"].as_str().unwrap().to_string();

    let resp = get(
        &app,
        &format!("/vendor/assessment/{}", assessment_id),
        Some(&intruder),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Not permitted"));
    assert_eq!(body["kind"], json!("forbidden"));

    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/add-candidate", assessment_id),
        Some(&intruder),
        json!({ "name": "Mallory", "email": "mallory@example.com" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = post_json(
        &app,
        &format!(
            "/vendor/assessment/{}/candidate/{}/status",
            assessment_id,
            Uuid::new_v4()
        ),
        Some(&intruder),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // A vanished assessment is 404, never 403.
    let resp = get(
        &app,
        &format!("/vendor/assessment/{}", Uuid::new_v4()),
        Some(&owner),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Assessment not found"));
}

#[tokio::test]
async fn status_updates_validate_and_guard() {
    let app = test_app();
    let cookie = vendor_session(&app, "Acme", "acme@example.com").await;

    let body = create_assessment(&app, &cookie, json!({ "title": "Screen" })).await;
    let assessment_id = body["assessment"]["assessment_id"].as_str().unwrap().to_string();

    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/add-candidate", assessment_id),
        Some(&cookie),
        json!({ "name": "Alice", "email": "alice@example.com" }),
    )
    .await;
    let body = body_json(resp).await;
    let candidate_uuid = body["candidate"]["candidate_uuid"]
        .as_str()
        .unwrap()
        .to_string();

    // Outside the allowed set: rejected, and the stored status is untouched.
    let resp = post_json(
        &app,
        &format!(
            "/vendor/assessment/{}/candidate/{}/status",
            assessment_id, candidate_uuid
        ),
        Some(&cookie),
        json!({ "status": "hired" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        json!("Invalid status. Allowed values: invited, interviewed, rejected, shortlisted")
    );

    let resp = get(&app, "/vendor/dashboard", Some(&cookie)).await;
    let body = body_json(resp).await;
    assert_eq!(
        body["assessments"][0]["candidates"][0]["status"],
        json!("invited")
    );

    // Valid status, but the candidate is not linked to this assessment.
    let resp = post_json(
        &app,
        &format!(
            "/vendor/assessment/{}/candidate/{}/status",
            assessment_id,
            Uuid::new_v4()
        ),
        Some(&cookie),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Candidate not linked to this assessment"));

    let resp = get(&app, "/vendor/assessment/not-a-uuid", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid assessment ID format"));

    let resp = post_json(
        &app,
        &format!("/vendor/assessment/{}/candidate/zzz/status", assessment_id),
        Some(&cookie),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid candidate ID format"));

    // Status casing and surrounding whitespace are forgiven.
    let resp = post_json(
        &app,
        &format!(
            "/vendor/assessment/{}/candidate/{}/status",
            assessment_id, candidate_uuid
        ),
        Some(&cookie),
        json!({ "status": "  SHORTLISTED  " }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], json!("shortlisted"));
}
