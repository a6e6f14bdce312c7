//! Seed script for development — creates a login on a fresh database.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads `DATABASE_URL`, `SEED_EMAIL` and `SEED_PASSWORD` (and `.env`).

use ipldash::config::AppConfig;
use ipldash::db;
use ipldash::errors::AppError;
use ipldash::models::user::normalize_email;
use ipldash::services::{auth, users};

const DEFAULT_EMAIL: &str = "demo@ipldash.local";
const DEFAULT_PASSWORD: &str = "Demo123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 1).await?;
    db::run_migrations(&pool).await?;

    println!("=== ipldash Seed Script ===");

    let email = normalize_email(
        &std::env::var("SEED_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.to_string()),
    );
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

    let hash = auth::hash_password(&password)?;
    match users::create(&pool, &email, &hash).await {
        Ok(user) => println!("[done] Created user {} (id {})", user.email, user.id),
        Err(AppError::Conflict(_)) => println!("[skip] User {email} already exists"),
        Err(e) => return Err(e.into()),
    }

    println!("\n=== Seed complete! ===");
    println!("Login: {email} / {password}");

    Ok(())
}
