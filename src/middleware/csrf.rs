//! CSRF protection for HTML form posts.
//!
//! Each session carries a random token; every form renders it as a hidden
//! `csrf_token` field and [`CsrfForm`] rejects posts where the two differ.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Form;
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::middleware::session::Session;
use crate::AppState;

/// Name of the hidden form field carrying the token.
pub const CSRF_FIELD: &str = "csrf_token";

/// Form bodies that carry a CSRF token.
pub trait CsrfProtected {
    fn csrf_token(&self) -> &str;
}

/// Generate a cryptographically secure random token as hex string.
pub fn generate_token() -> String {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Constant-time comparison for equal-length tokens.
pub fn tokens_match(expected: &str, submitted: &str) -> bool {
    let (a, b) = (expected.as_bytes(), submitted.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// URL-encoded form extractor that also checks the session's CSRF token.
#[derive(Debug, Clone)]
pub struct CsrfForm<T>(pub T);

impl<T> FromRequest<AppState> for CsrfForm<T>
where
    T: DeserializeOwned + CsrfProtected + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let session = Session::from_request_parts(&mut parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let req = Request::from_parts(parts, body);

        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        if !session.verify_csrf(value.csrf_token()) {
            tracing::warn!("Rejected form post with missing or invalid CSRF token");
            return Err(AppError::Forbidden(
                "The CSRF token is missing or invalid.".to_string(),
            ));
        }

        Ok(CsrfForm(value))
    }
}
