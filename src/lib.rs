pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;

use crate::services::stats_api::StatsApiClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: config::AppConfig,
    pub stats: StatsApiClient,
}

impl AppState {
    pub fn new(db: SqlitePool, config: config::AppConfig) -> Self {
        let stats = StatsApiClient::from_config(&config);
        Self { db, config, stats }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        derive_cookie_key(&state.config.secret_key)
    }
}

/// Stretch `SECRET_KEY` to the 64 bytes the cookie signer needs.
fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
