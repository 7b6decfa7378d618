use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::user::User;
use crate::models::vendor::Vendor;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VendorRegisterPayload {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VendorLoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// One payload shape for user register and login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserAuthPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordPayload {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VendorProfile {
    pub id: i64,
    pub company_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorLoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub vendor: VendorProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

impl From<Vendor> for VendorProfile {
    fn from(value: Vendor) -> Self {
        Self {
            id: value.id,
            company_name: value.company_name,
            email: value.email,
        }
    }
}

impl From<User> for UserProfile {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}
