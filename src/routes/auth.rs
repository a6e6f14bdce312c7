//! Authentication routes: landing redirect, registration, login, logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::csrf::CsrfForm;
use crate::middleware::session::{FlashLevel, Session};
use crate::models::user::{LoginForm, RegisterForm};
use crate::services::auth as auth_service;
use crate::views;
use crate::AppState;

pub const MSG_REGISTERED: &str = "Registration successful. Please log in.";
pub const MSG_LOGGED_IN: &str = "Logged in successfully.";
pub const MSG_LOGGED_OUT: &str = "Logged out.";

fn render_register(mut session: Session) -> (Session, Html<String>) {
    let token = session.csrf_token();
    let flashes = session.take_flashes();
    (session, views::auth::register_page(&token, &flashes))
}

fn render_login(mut session: Session) -> (Session, Html<String>) {
    let token = session.csrf_token();
    let flashes = session.take_flashes();
    (session, views::auth::login_page(&token, &flashes))
}

/// GET / — dashboard when logged in, login page otherwise.
pub async fn index(State(state): State<AppState>, session: Session) -> Redirect {
    match session.active_user_id(state.config.session_max_age_secs, Utc::now()) {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

/// GET /register
pub async fn register_form(session: Session) -> (Session, Html<String>) {
    render_register(session)
}

/// POST /register — create an account, then send the user to the login page.
pub async fn register(
    State(state): State<AppState>,
    mut session: Session,
    CsrfForm(form): CsrfForm<RegisterForm>,
) -> Result<Response, AppError> {
    match auth_service::register(&state.db, &form).await {
        Ok(_) => {
            session.flash(FlashLevel::Success, MSG_REGISTERED);
            Ok((session, Redirect::to("/login")).into_response())
        }
        Err(AppError::Validation(msg)) => {
            session.flash(FlashLevel::Danger, msg);
            Ok(render_register(session).into_response())
        }
        Err(AppError::Conflict(msg)) => {
            session.flash(FlashLevel::Warning, msg);
            Ok(render_register(session).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /login
pub async fn login_form(session: Session) -> (Session, Html<String>) {
    render_login(session)
}

/// POST /login — establish the session on valid credentials.
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    CsrfForm(form): CsrfForm<LoginForm>,
) -> Result<Response, AppError> {
    match auth_service::authenticate(&state.db, &form.email, &form.password).await {
        Ok(user) => {
            session.login(user.id);
            session.flash(FlashLevel::Success, MSG_LOGGED_IN);
            Ok((session, Redirect::to("/dashboard")).into_response())
        }
        Err(AppError::Unauthorized) => {
            session.flash(FlashLevel::Danger, auth_service::MSG_INVALID_CREDENTIALS);
            Ok(render_login(session).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /logout
pub async fn logout(current_user: CurrentUser, mut session: Session) -> (Session, Redirect) {
    session.logout();
    session.flash(FlashLevel::Info, MSG_LOGGED_OUT);
    tracing::info!(user_id = current_user.id, "User logged out");
    (session, Redirect::to("/login"))
}
