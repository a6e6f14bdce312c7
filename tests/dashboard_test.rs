//! End-to-end tests for the dashboard lookups against a simulated stats API.

mod common;

use std::collections::HashMap;

use common::start_server;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MI: &str = "Mumbai Indians";
const CSK: &str = "Chennai Super Kings";

async fn stats_api_with_teams() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": [MI, CSK]})))
        .mount(&server)
        .await;
    server
}

async fn requests_to(server: &MockServer, endpoint: &str) -> Vec<HashMap<String, String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|req| req.url.path() == endpoint)
        .map(|req| req.url.query_pairs().into_owned().collect())
        .collect()
}

#[tokio::test]
async fn h2h_calls_endpoint_with_exactly_both_teams() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/teamvteam"))
        .and(query_param("team1", MI))
        .and(query_param("team2", CSK))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_matches": 37,
            "Mumbai Indians": 20,
            "Chennai Super Kings": 17
        })))
        .expect(1)
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form("/dashboard", "/dashboard/h2h", &[("team1", MI), ("team2", CSK)])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    assert!(body.contains(r#"id="h2h-result""#));
    assert!(body.contains("<th>total_matches</th><td>37</td>"));
    assert!(!body.contains("team-record-result"));
    assert!(!body.contains("player-result"));
    // Dropdowns are still populated
    assert!(body.contains(r#"<option value="Chennai Super Kings">"#));

    let calls = requests_to(&api, "/api/teamvteam").await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0]["team1"], MI);
    assert_eq!(calls[0]["team2"], CSK);
}

#[tokio::test]
async fn h2h_with_missing_team_skips_lookup() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/teamvteam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form("/dashboard", "/dashboard/h2h", &[("team1", MI), ("team2", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(!body.contains("h2h-result"));
    assert!(!body.contains(r#"class="flash flash-danger""#));
}

#[tokio::test]
async fn team_record_is_rendered_in_its_slot() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/team-record"))
        .and(query_param("team", CSK))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            CSK: {"overall": {"won": 131, "loss": 91}}
        })))
        .expect(1)
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form("/dashboard", "/dashboard/team-record", &[("team", CSK)])
        .await;
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"id="team-record-result""#));
    assert!(body.contains("<th>won</th><td>131</td>"));
    assert!(!body.contains("h2h-result"));
    assert!(!body.contains("player-result"));
}

#[tokio::test]
async fn player_lookup_uses_bowling_endpoint_when_asked() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/bowling-record"))
        .and(query_param("bowler", "SP Narine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wicket": 180})))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/batting-record"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form(
            "/dashboard",
            "/dashboard/player",
            &[("player_type", "bowling"), ("name", "SP Narine")],
        )
        .await;
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"id="player-result""#));
    assert!(body.contains("Bowling record"));
    assert!(body.contains("<th>wicket</th><td>180</td>"));
}

#[tokio::test]
async fn player_lookup_defaults_to_batting() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/batting-record"))
        .and(query_param("batsman", "V Kohli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"runs": 8004})))
        .expect(1)
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form("/dashboard", "/dashboard/player", &[("name", "V Kohli")])
        .await;
    let body = resp.text().await.unwrap();
    assert!(body.contains("Batting record"));
    assert!(body.contains("<th>runs</th><td>8004</td>"));
}

#[tokio::test]
async fn downstream_error_becomes_flash() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/team-record"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form("/dashboard", "/dashboard/team-record", &[("team", MI)])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Team record error:"));
    assert!(body.contains("500"));
    assert!(!body.contains("team-record-result"));
}

#[tokio::test]
async fn malformed_json_becomes_flash() {
    let api = stats_api_with_teams().await;
    Mock::given(method("GET"))
        .and(path("/api/teamvteam"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&api)
        .await;
    let app = start_server(&api.uri()).await;
    app.signed_in().await;

    let resp = app
        .post_form("/dashboard", "/dashboard/h2h", &[("team1", MI), ("team2", CSK)])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Head-to-head error:"));
    assert!(!body.contains("h2h-result"));
}

#[tokio::test]
async fn unreachable_api_still_renders_dashboard() {
    // Nothing listens on port 1.
    let app = start_server("http://127.0.0.1:1").await;
    app.signed_in().await;

    let resp = app.client.get(app.url("/dashboard")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Failed to load teams:"));
    assert!(body.contains(r#"class="flash flash-danger""#));
    assert!(!body.contains(r#"<option value="Mumbai Indians">"#));
    assert_eq!(body.matches("<option value=\"\">").count(), 3);

    let resp = app.client.get(app.url("/health/ready")).send().await.unwrap();
    let health: serde_json::Value = resp.json().await.unwrap();
    assert!(health["data"]["stats_api"]
        .as_str()
        .unwrap()
        .starts_with("error"));
}

#[tokio::test]
async fn dashboard_posts_require_login() {
    let api = stats_api_with_teams().await;
    let app = start_server(&api.uri()).await;

    let token = app.csrf_token("/login").await;
    let resp = app
        .client
        .post(app.url("/dashboard/h2h"))
        .form(&[("team1", MI), ("team2", CSK), ("csrf_token", token.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/login");
    assert!(requests_to(&api, "/api/teamvteam").await.is_empty());
}
