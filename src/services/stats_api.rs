//! Read-only client for the external cricket statistics API.
//!
//! Every call is a single GET with its own timeout. Failures come back as
//! [`StatsApiError`] values; nothing here panics or retries.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::dashboard::PlayerType;

/// Failure talking to the stats API. The `Display` text is shown to users in flash messages.
#[derive(Debug, thiserror::Error)]
pub enum StatsApiError {
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: &'static str },

    #[error("could not reach stats API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct TeamsPayload {
    #[serde(default)]
    teams: Vec<String>,
}

/// Thin GET client bound to one base URL.
#[derive(Debug, Clone)]
pub struct StatsApiClient {
    http: reqwest::Client,
    base_url: String,
    teams_timeout: Duration,
    record_timeout: Duration,
}

impl StatsApiClient {
    pub const TEAMS: &'static str = "/api/teams";
    pub const HEAD_TO_HEAD: &'static str = "/api/teamvteam";
    pub const TEAM_RECORD: &'static str = "/api/team-record";
    pub const BATTING_RECORD: &'static str = "/api/batting-record";
    pub const BOWLING_RECORD: &'static str = "/api/bowling-record";

    pub fn new(base_url: &str, teams_timeout: Duration, record_timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            teams_timeout,
            record_timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.api_base_url,
            config.teams_timeout(),
            config.record_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All team names, sorted.
    pub async fn teams(&self) -> Result<Vec<String>, StatsApiError> {
        let body = self.get(Self::TEAMS, &[], self.teams_timeout).await?;
        let payload: TeamsPayload =
            serde_json::from_slice(&body).map_err(|source| StatsApiError::Decode {
                endpoint: Self::TEAMS,
                source,
            })?;

        let mut teams = payload.teams;
        teams.sort();
        Ok(teams)
    }

    /// Team list for dropdowns; any failure degrades to an empty list.
    pub async fn teams_or_empty(&self) -> Vec<String> {
        self.teams().await.unwrap_or_default()
    }

    pub async fn head_to_head(&self, team1: &str, team2: &str) -> Result<Value, StatsApiError> {
        self.get_json(
            Self::HEAD_TO_HEAD,
            &[("team1", team1), ("team2", team2)],
            self.teams_timeout,
        )
        .await
    }

    pub async fn team_record(&self, team: &str) -> Result<Value, StatsApiError> {
        self.get_json(Self::TEAM_RECORD, &[("team", team)], self.record_timeout)
            .await
    }

    pub async fn batting_record(&self, batsman: &str) -> Result<Value, StatsApiError> {
        self.get_json(
            Self::BATTING_RECORD,
            &[("batsman", batsman)],
            self.record_timeout,
        )
        .await
    }

    pub async fn bowling_record(&self, bowler: &str) -> Result<Value, StatsApiError> {
        self.get_json(
            Self::BOWLING_RECORD,
            &[("bowler", bowler)],
            self.record_timeout,
        )
        .await
    }

    pub async fn player_record(&self, kind: PlayerType, name: &str) -> Result<Value, StatsApiError> {
        match kind {
            PlayerType::Batting => self.batting_record(name).await,
            PlayerType::Bowling => self.bowling_record(name).await,
        }
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Value, StatsApiError> {
        let body = self.get(endpoint, query, timeout).await?;
        serde_json::from_slice(&body).map_err(|source| StatsApiError::Decode { endpoint, source })
    }

    async fn get(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Vec<u8>, StatsApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                StatsApiError::Timeout { endpoint }
            } else {
                StatsApiError::Transport(e)
            }
        };

        let response = self
            .http
            .get(&url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "Stats API returned error status");
            return Err(StatsApiError::Status { endpoint, status });
        }

        let body = response.bytes().await.map_err(map_err)?;
        Ok(body.to_vec())
    }
}
