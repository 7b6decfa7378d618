pub mod assessment_dto;
pub mod auth_dto;
