use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::Error;
use crate::models::user::User;
use crate::models::vendor::Vendor;
use crate::AppState;

/// Cookie the session token travels in.
pub const SESSION_COOKIE: &str = "access_token";

/// Builds the cookie set on successful login. HttpOnly so scripts cannot read
/// the token; Lax keeps it off cross-site POSTs.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Removal cookie for logout. Path must match [`session_cookie`] or browsers
/// keep the original.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

fn session_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Extractor for vendor-only endpoints. Runs the full resolver ladder, so a
/// rejection carries the precise failure: no cookie, bad token, a user token,
/// a revoked session, or a deleted vendor row.
pub struct CurrentVendor(pub Vendor);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentVendor {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts);
        let vendor = state.auth_service.resolve_vendor(token.as_deref()).await?;
        Ok(CurrentVendor(vendor))
    }
}

/// Extractor for user-only endpoints; the mirror image of [`CurrentVendor`].
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts);
        let user = state.auth_service.resolve_user(token.as_deref()).await?;
        Ok(CurrentUser(user))
    }
}
