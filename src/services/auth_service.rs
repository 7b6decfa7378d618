use std::sync::Arc;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::principal::{Principal, PrincipalKind, PrincipalRef};
use crate::models::user::User;
use crate::models::vendor::Vendor;
use crate::services::token_service::TokenService;
use crate::store::Store;
use crate::utils::crypto::{hash_password, verify_password};

/// Registration, login, logout, password changes and the principal resolver.
/// Every authenticated request funnels through [`AuthService::resolve`].
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    pub async fn register_vendor(
        &self,
        company_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Vendor> {
        if self.store.vendor_by_email(email).await?.is_some() {
            return Err(Error::Conflict("Vendor already exists".to_string()));
        }
        let password_hash = hash_password(password)?;
        self.store
            .create_vendor(company_name, email, &password_hash)
            .await
    }

    /// Verifies credentials, then issues a token and persists the session it
    /// belongs to. The returned token goes into the response cookie.
    pub async fn login_vendor(&self, email: &str, password: &str) -> Result<(Vendor, String)> {
        let vendor = self
            .store
            .vendor_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;
        if !verify_password(password, &vendor.password_hash) {
            return Err(Error::InvalidCredentials);
        }
        let principal = PrincipalRef::Vendor(vendor.id);
        let (token, expires_at) = self.tokens.issue(principal)?;
        self.store
            .insert_session(&token, principal, Some(expires_at))
            .await?;
        Ok((vendor, token))
    }

    pub async fn register_user(&self, email: &str, password: &str) -> Result<User> {
        if self.store.user_by_email(email).await?.is_some() {
            return Err(Error::Conflict("User already exists".to_string()));
        }
        let password_hash = hash_password(password)?;
        self.store.create_user(email, &password_hash).await
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .store
            .user_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            return Err(Error::InvalidCredentials);
        }
        let principal = PrincipalRef::User(user.id);
        let (token, expires_at) = self.tokens.issue(principal)?;
        self.store
            .insert_session(&token, principal, Some(expires_at))
            .await?;
        Ok((user, token))
    }

    /// Revokes the server-side session. Idempotent; the token itself stays
    /// cryptographically valid until its embedded expiry, which is exactly why
    /// the session row is the authority.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.store.delete_session(token).await
    }

    pub async fn change_vendor_password(
        &self,
        vendor: &Vendor,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if !verify_password(current_password, &vendor.password_hash) {
            return Err(Error::BadRequest("Current password incorrect".to_string()));
        }
        let password_hash = hash_password(new_password)?;
        self.store
            .update_vendor_password(vendor.id, &password_hash)
            .await
    }

    /// Reconstructs the authenticated principal behind a presented token.
    ///
    /// The failure ladder is deliberate and each rung is observable:
    /// no token → `Unauthenticated`; undecodable or unparseable subject →
    /// `InvalidToken`; subject kind differs from `expected` →
    /// `WrongPrincipalKind`; session row missing or past its expiry →
    /// `SessionExpiredOrRevoked`; principal row gone → `PrincipalNotFound`.
    pub async fn resolve(
        &self,
        token: Option<&str>,
        expected: PrincipalKind,
    ) -> Result<Principal> {
        let token = token.ok_or(Error::Unauthenticated)?;
        let claims = self.tokens.decode(token).ok_or(Error::InvalidToken)?;
        let principal_ref =
            PrincipalRef::parse_subject(&claims.sub).ok_or(Error::InvalidToken)?;
        if principal_ref.kind() != expected {
            return Err(Error::WrongPrincipalKind { expected });
        }
        match self.store.session_by_token(token).await? {
            Some(record) if !record.is_expired_at(Utc::now()) => {}
            _ => return Err(Error::SessionExpiredOrRevoked),
        }
        match principal_ref {
            PrincipalRef::Vendor(id) => {
                let vendor = self
                    .store
                    .vendor_by_id(id)
                    .await?
                    .ok_or_else(|| Error::PrincipalNotFound("Vendor not found".to_string()))?;
                Ok(Principal::Vendor(vendor))
            }
            PrincipalRef::User(id) => {
                let user = self
                    .store
                    .user_by_id(id)
                    .await?
                    .ok_or_else(|| Error::PrincipalNotFound("User not found".to_string()))?;
                Ok(Principal::User(user))
            }
        }
    }

    pub async fn resolve_vendor(&self, token: Option<&str>) -> Result<Vendor> {
        match self.resolve(token, PrincipalKind::Vendor).await? {
            Principal::Vendor(vendor) => Ok(vendor),
            Principal::User(_) => Err(Error::Internal(
                "resolved principal has the wrong kind".to_string(),
            )),
        }
    }

    pub async fn resolve_user(&self, token: Option<&str>) -> Result<User> {
        match self.resolve(token, PrincipalKind::User).await? {
            Principal::User(user) => Ok(user),
            Principal::Vendor(_) => Err(Error::Internal(
                "resolved principal has the wrong kind".to_string(),
            )),
        }
    }
}
