//! Shared harness: a full ipldash server on a random port backed by a
//! throwaway SQLite file.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;

use ipldash::config::AppConfig;
use ipldash::{db, routes, AppState};
use reqwest::Client;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

pub const EMAIL: &str = "fan@example.com";
pub const PASSWORD: &str = "Wankhede2024!";

pub struct TestServer {
    pub base: String,
    pub pool: SqlitePool,
    pub client: Client,
    _handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn user_count(&self) -> i64 {
        ipldash::services::users::count(&self.pool).await.unwrap()
    }

    /// GET a page and pull the CSRF token out of its first form.
    pub async fn csrf_token(&self, path: &str) -> String {
        let body = self
            .client
            .get(self.url(path))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        extract_csrf(&body)
    }

    /// POST a form from `form_page` (which supplies the token) to `action`.
    pub async fn post_form(
        &self,
        form_page: &str,
        action: &str,
        fields: &[(&str, &str)],
    ) -> reqwest::Response {
        let token = self.csrf_token(form_page).await;
        let mut body: Vec<(&str, &str)> = fields.to_vec();
        body.push(("csrf_token", token.as_str()));
        self.client
            .post(self.url(action))
            .form(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn register(&self, email: &str, password: &str, confirm: &str) -> reqwest::Response {
        self.post_form(
            "/register",
            "/register",
            &[("email", email), ("password", password), ("confirm", confirm)],
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_form("/login", "/login", &[("email", email), ("password", password)])
            .await
    }

    /// Register the default user and log in with it.
    pub async fn signed_in(&self) {
        self.register(EMAIL, PASSWORD, PASSWORD).await;
        let resp = self.login(EMAIL, PASSWORD).await;
        assert_eq!(resp.url().path(), "/dashboard");
    }
}

pub fn extract_csrf(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("page has no csrf field") + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}

/// Spin up the full Axum app pointed at `api_base_url`.
pub async fn start_server(api_base_url: &str) -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_url = format!("sqlite://{}", dir.path().join("users.db").display());

    let vars: HashMap<&str, String> = HashMap::from([
        ("DATABASE_URL", db_url),
        ("API_BASE_URL", api_base_url.to_string()),
        ("SECRET_KEY", "test-secret-for-integration-tests-only".to_string()),
        ("TEAMS_TIMEOUT_SECS", "2".to_string()),
        ("RECORD_TIMEOUT_SECS", "2".to_string()),
    ]);
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("config");

    let pool = db::create_pool(&config.database_url, 2).await.expect("pool");
    db::run_migrations(&pool).await.expect("migrations");

    let app = routes::router(AppState::new(pool.clone(), config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let client = Client::builder().cookie_store(true).build().unwrap();

    TestServer {
        base,
        pool,
        client,
        _handle: handle,
        _dir: dir,
    }
}
