pub mod assessment_service;
pub mod auth_service;
pub mod token_service;
