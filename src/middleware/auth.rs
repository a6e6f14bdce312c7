//! Login guard extractor for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::middleware::session::{FlashLevel, Session};
use crate::services::users;
use crate::AppState;

pub const MSG_LOGIN_REQUIRED: &str = "Please log in to access this page.";

/// Authenticated user resolved from the session cookie.
///
/// Use as an Axum extractor in handlers that require a login; anonymous or
/// expired sessions are redirected to `/login`:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let mut session = Session::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        if let Some(user_id) =
            session.active_user_id(state.config.session_max_age_secs, Utc::now())
        {
            match users::find_by_id(&state.db, user_id).await {
                Ok(Some(user)) => {
                    return Ok(CurrentUser {
                        id: user.id,
                        email: user.email,
                    })
                }
                Ok(None) => tracing::warn!(user_id, "Session refers to a missing user"),
                Err(e) => return Err(e.into_response()),
            }
        }

        session.logout();
        session.flash(FlashLevel::Info, MSG_LOGIN_REQUIRED);
        Err((session, Redirect::to("/login")).into_response())
    }
}
