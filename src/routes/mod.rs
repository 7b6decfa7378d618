pub mod auth;
pub mod health;
pub mod user;
pub mod vendor;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// The full route table. Deployment layers (CORS, request tracing) are added
/// on top in `main`; tests drive this router directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/vendor/register", post(auth::register_vendor))
        .route("/auth/vendor/login", post(auth::login_vendor))
        .route("/auth/logout", post(auth::logout))
        .route("/vendor/logout", post(auth::logout))
        .route("/vendor/dashboard", get(vendor::dashboard))
        .route("/vendor/create-assessment", post(vendor::create_assessment))
        .route(
            "/vendor/assessment/:assessment_id",
            get(vendor::get_assessment),
        )
        .route(
            "/vendor/assessment/:assessment_id/add-candidate",
            post(vendor::add_candidate),
        )
        .route(
            "/vendor/assessment/:assessment_id/candidate/:candidate_uuid/status",
            post(vendor::update_candidate_status),
        )
        .route("/vendor/change-password", post(vendor::change_password))
        .route("/user/register", post(user::register))
        .route("/user/login", post(user::login))
        .route("/user/logout", post(auth::logout))
        .route("/user/dashboard", get(user::dashboard))
        .with_state(state)
}
