use std::sync::Arc;
use innova_core::repository::{BookingRepository, ReviewRepository, RoomRepository};
use innova_store::app_config::{self, Deployment};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub cookie_name: String,
    pub deployment: Deployment,
}

impl AuthConfig {
    pub fn from_config(config: &app_config::Config) -> Self {
        Self {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.token_ttl_seconds,
            cookie_name: config.auth.cookie_name.clone(),
            deployment: config.server.environment,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub auth: AuthConfig,
    pub allowed_origins: Vec<String>,
}
