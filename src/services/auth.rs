//! Authentication service: password hashing, registration, and credential checks.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::user::{normalize_email, RegisterForm, User};
use crate::services::users;

pub const MSG_FIELDS_REQUIRED: &str = "Email and password are required.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const MSG_USER_EXISTS: &str = "User already exists.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash checked when the email is unknown, so both failure paths cost one argon2 verify.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("not-a-real-password").unwrap_or_default())
}

/// Check the registration form, returning the normalized email on success.
pub fn validate_registration(form: &RegisterForm) -> Result<String, AppError> {
    if form.validate().is_err() {
        return Err(AppError::Validation(MSG_FIELDS_REQUIRED.to_string()));
    }
    if !form.passwords_match() {
        return Err(AppError::Validation(MSG_PASSWORD_MISMATCH.to_string()));
    }
    Ok(form.normalized_email())
}

/// Validate the form, hash the password and persist the account.
pub async fn register(pool: &SqlitePool, form: &RegisterForm) -> Result<User, AppError> {
    let email = validate_registration(form)?;
    let password_hash = hash_password(&form.password)?;

    let user = users::create(pool, &email, &password_hash)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(MSG_USER_EXISTS.to_string()),
            other => other,
        })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

/// Authenticate by email and password. Unknown email and wrong password both
/// yield `Unauthorized`.
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> Result<User, AppError> {
    let email = normalize_email(email);
    let user = users::find_by_email(pool, &email).await?;

    let Some(user) = user else {
        let _ = verify_password(password, dummy_hash());
        tracing::warn!("Login failed");
        return Err(AppError::Unauthorized);
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(user_id = user.id, "Login failed");
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = user.id, "Login succeeded");
    Ok(user)
}
