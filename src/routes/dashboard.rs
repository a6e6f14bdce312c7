//! Dashboard routes: the stats page and its three lookup forms.
//!
//! Every handler reloads the team list, runs at most one stats lookup and
//! renders the same page. Downstream failures become flash messages.

use axum::{extract::State, response::Html};
use serde_json::Value;

use crate::middleware::auth::CurrentUser;
use crate::middleware::csrf::CsrfForm;
use crate::middleware::session::{FlashLevel, Session};
use crate::models::dashboard::{DashboardView, HeadToHeadForm, PlayerForm, TeamRecordForm};
use crate::services::stats_api::StatsApiError;
use crate::views;
use crate::AppState;

fn render(mut session: Session, user: &CurrentUser, view: DashboardView) -> (Session, Html<String>) {
    let token = session.csrf_token();
    let flashes = session.take_flashes();
    let page = views::dashboard::dashboard_page(&view, &user.email, &token, &flashes);
    (session, page)
}

/// Keep a successful lookup, or flash `"{label}: {error}"` and yield nothing.
fn settle(session: &mut Session, label: &str, result: Result<Value, StatsApiError>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, lookup = label, "Stats lookup failed");
            session.flash(FlashLevel::Danger, format!("{label}: {e}"));
            None
        }
    }
}

/// GET /dashboard
pub async fn show(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut session: Session,
) -> (Session, Html<String>) {
    let teams = match state.stats.teams().await {
        Ok(teams) => teams,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load teams");
            session.flash(FlashLevel::Danger, format!("Failed to load teams: {e}"));
            Vec::new()
        }
    };

    render(session, &current_user, DashboardView::new(teams))
}

/// POST /dashboard/h2h
pub async fn head_to_head(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut session: Session,
    CsrfForm(form): CsrfForm<HeadToHeadForm>,
) -> (Session, Html<String>) {
    let teams = state.stats.teams_or_empty().await;

    let h2h = match form.teams() {
        Some((team1, team2)) => {
            let result = state.stats.head_to_head(team1, team2).await;
            settle(&mut session, "Head-to-head error", result)
        }
        None => None,
    };

    render(session, &current_user, DashboardView::new(teams).with_h2h(h2h))
}

/// POST /dashboard/team-record
pub async fn team_record(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut session: Session,
    CsrfForm(form): CsrfForm<TeamRecordForm>,
) -> (Session, Html<String>) {
    let teams = state.stats.teams_or_empty().await;

    let record = match form.team() {
        Some(team) => {
            let result = state.stats.team_record(team).await;
            settle(&mut session, "Team record error", result)
        }
        None => None,
    };

    render(
        session,
        &current_user,
        DashboardView::new(teams).with_team_record(record),
    )
}

/// POST /dashboard/player
pub async fn player(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut session: Session,
    CsrfForm(form): CsrfForm<PlayerForm>,
) -> (Session, Html<String>) {
    let teams = state.stats.teams_or_empty().await;
    let player_type = form.player_type();

    let stats = match form.name() {
        Some(name) => {
            let result = state.stats.player_record(player_type, name).await;
            settle(&mut session, "Player stats error", result)
        }
        None => None,
    };

    render(
        session,
        &current_user,
        DashboardView::new(teams).with_player(player_type, stats),
    )
}
