//! Dashboard form DTOs and the view state handed to the renderer.

use serde::Deserialize;
use serde_json::Value;

use crate::middleware::csrf::CsrfProtected;

/// Which player statistics endpoint to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerType {
    #[default]
    Batting,
    Bowling,
}

impl PlayerType {
    /// Anything other than `bowling` selects batting, including an empty field.
    pub fn from_form(raw: &str) -> Self {
        if raw == "bowling" {
            Self::Bowling
        } else {
            Self::Batting
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Batting => "batting",
            Self::Bowling => "bowling",
        }
    }
}

/// POST /dashboard/h2h form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeadToHeadForm {
    pub team1: String,
    pub team2: String,
    pub csrf_token: String,
}

impl HeadToHeadForm {
    /// Both team names, when both were supplied.
    pub fn teams(&self) -> Option<(&str, &str)> {
        if self.team1.is_empty() || self.team2.is_empty() {
            None
        } else {
            Some((&self.team1, &self.team2))
        }
    }
}

/// POST /dashboard/team-record form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamRecordForm {
    pub team: String,
    pub csrf_token: String,
}

impl TeamRecordForm {
    pub fn team(&self) -> Option<&str> {
        (!self.team.is_empty()).then_some(self.team.as_str())
    }
}

/// POST /dashboard/player form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerForm {
    pub player_type: String,
    pub name: String,
    pub csrf_token: String,
}

impl PlayerForm {
    pub fn player_type(&self) -> PlayerType {
        PlayerType::from_form(&self.player_type)
    }

    pub fn name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }
}

macro_rules! csrf_protected {
    ($($form:ty),+) => {
        $(impl CsrfProtected for $form {
            fn csrf_token(&self) -> &str {
                &self.csrf_token
            }
        })+
    };
}

csrf_protected!(HeadToHeadForm, TeamRecordForm, PlayerForm);

/// Everything the dashboard page shows. At most one result slot is populated per request.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub teams: Vec<String>,
    pub h2h: Option<Value>,
    pub team_record: Option<Value>,
    pub player: Option<Value>,
    pub player_type: Option<PlayerType>,
}

impl DashboardView {
    pub fn new(teams: Vec<String>) -> Self {
        Self {
            teams,
            ..Default::default()
        }
    }

    pub fn with_h2h(self, h2h: Option<Value>) -> Self {
        Self { h2h, ..self }
    }

    pub fn with_team_record(self, team_record: Option<Value>) -> Self {
        Self {
            team_record,
            ..self
        }
    }

    pub fn with_player(self, player_type: PlayerType, player: Option<Value>) -> Self {
        Self {
            player,
            player_type: Some(player_type),
            ..self
        }
    }
}
