//! Route definitions for the ipldash web front end.

pub mod auth;
pub mod dashboard;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::AppState;

/// Form posts are a few short fields; anything larger is rejected.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::index))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/h2h", post(dashboard::head_to_head))
        .route("/dashboard/team-record", post(dashboard::team_record))
        .route("/dashboard/player", post(dashboard::player))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
