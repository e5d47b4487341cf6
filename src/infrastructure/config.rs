use std::env;

use crate::services::ReservationPolicy;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub reservation_policy: ReservationPolicy,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://bookswap.db?mode=rwc".to_string());

        let reservation_policy = match env::var("RESERVATION_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to strict", e);
                ReservationPolicy::Strict
            }),
            Err(_) => ReservationPolicy::default(),
        };

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            reservation_policy,
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }
}
