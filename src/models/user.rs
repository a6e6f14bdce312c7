//! User model and the registration/login form DTOs.

use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::middleware::csrf::CsrfProtected;

/// Full user row from the `users` table (includes password_hash, never render it).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Canonical form of an email address: surrounding whitespace removed, lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn not_blank_email(email: &str) -> Result<(), ValidationError> {
    if normalize_email(email).is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// POST /register form body. Missing fields default to empty strings.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(custom(function = "not_blank_email"))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub confirm: String,
    pub csrf_token: String,
}

impl RegisterForm {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm
    }
}

impl CsrfProtected for RegisterForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

/// POST /login form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

impl CsrfProtected for LoginForm {
    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}
