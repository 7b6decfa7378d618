use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{UserAuthPayload, UserLoginResponse, UserProfile},
    error::Result,
    middleware::auth::{session_cookie, CurrentUser},
    AppState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserAuthPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .auth_service
        .register_user(&payload.email, &payload.password)
        .await?;
    Ok(Json(json!({ "ok": true, "user_id": user.id })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<UserAuthPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;
    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(UserLoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            user: user.into(),
        }),
    ))
}

#[axum::debug_handler(state = AppState)]
pub async fn dashboard(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse> {
    Ok(Json(json!({
        "user": UserProfile::from(user),
        "notes": "This is a simple user dashboard. Extend it to suit app needs."
    })))
}
