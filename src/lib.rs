pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    assessment_service::AssessmentService, auth_service::AuthService,
    token_service::TokenService,
};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth_service: AuthService,
    pub assessment_service: AssessmentService,
}

impl AppState {
    /// Config is passed in rather than read from the global so tests can
    /// build a state without touching the environment.
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_hours);
        let auth_service = AuthService::new(store.clone(), tokens);
        let assessment_service = AssessmentService::new(store.clone());

        Self {
            store,
            auth_service,
            assessment_service,
        }
    }
}
