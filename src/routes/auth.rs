use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::warn;
use validator::Validate;

use crate::{
    dto::auth_dto::{VendorLoginPayload, VendorLoginResponse, VendorRegisterPayload},
    error::Result,
    middleware::auth::{clear_session_cookie, session_cookie, SESSION_COOKIE},
    AppState,
};

#[axum::debug_handler]
pub async fn register_vendor(
    State(state): State<AppState>,
    Json(payload): Json<VendorRegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let vendor = state
        .auth_service
        .register_vendor(&payload.company_name, &payload.email, &payload.password)
        .await?;
    Ok(Json(json!({ "ok": true, "vendor_id": vendor.id })))
}

#[axum::debug_handler]
pub async fn login_vendor(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<VendorLoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (vendor, token) = state
        .auth_service
        .login_vendor(&payload.email, &payload.password)
        .await?;
    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(VendorLoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            vendor: vendor.into(),
        }),
    ))
}

/// Shared by `/auth/logout`, `/vendor/logout` and `/user/logout`. The cookie
/// is cleared no matter what; a store error during revocation is logged and
/// absorbed so logout never fails the caller.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    if let Some(token) = token {
        if let Err(err) = state.auth_service.logout(&token).await {
            warn!(error = ?err, "Session revocation failed during logout");
        }
    }
    let jar = jar.remove(clear_session_cookie());
    (
        jar,
        Json(json!({ "ok": true, "detail": "Logged out successfully" })),
    )
}
