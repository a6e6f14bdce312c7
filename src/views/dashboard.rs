use axum::response::Html;

use super::{csrf_input, escape, layout, render_value};
use crate::middleware::session::Flash;
use crate::models::dashboard::{DashboardView, PlayerType};

fn team_options(teams: &[String]) -> String {
    let mut options = String::from(r#"<option value="">Select a team</option>"#);
    for team in teams {
        let team = escape(team);
        options.push_str(&format!(r#"<option value="{team}">{team}</option>"#));
    }
    options
}

fn player_type_options(selected: PlayerType) -> String {
    [(PlayerType::Batting, "Batting"), (PlayerType::Bowling, "Bowling")]
        .into_iter()
        .map(|(kind, label)| {
            let marker = if kind == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{marker}>{label}</option>"#, kind.as_str())
        })
        .collect()
}

fn result_section(id: &str, heading: &str, value: &serde_json::Value) -> String {
    format!(
        r#"<section class="card" id="{id}"><h2>{}</h2>{}</section>"#,
        escape(heading),
        render_value(value)
    )
}

/// The single dashboard page. Only the populated result slot gets a section.
pub fn dashboard_page(
    view: &DashboardView,
    email: &str,
    csrf_token: &str,
    flashes: &[Flash],
) -> Html<String> {
    let csrf = csrf_input(csrf_token);
    let options = team_options(&view.teams);
    let player_types = player_type_options(view.player_type.unwrap_or_default());

    let mut body = format!(
        r#"<div class="card">
            <h2>Head to head</h2>
            <form method="post" action="/dashboard/h2h">
                {csrf}
                <label for="team1">Team 1</label>
                <select id="team1" name="team1">{options}</select>
                <label for="team2">Team 2</label>
                <select id="team2" name="team2">{options}</select>
                <p><button type="submit">Compare</button></p>
            </form>
        </div>
        <div class="card">
            <h2>Team record</h2>
            <form method="post" action="/dashboard/team-record">
                {csrf}
                <label for="team">Team</label>
                <select id="team" name="team">{options}</select>
                <p><button type="submit">Show record</button></p>
            </form>
        </div>
        <div class="card">
            <h2>Player stats</h2>
            <form method="post" action="/dashboard/player">
                {csrf}
                <label for="player_type">Type</label>
                <select id="player_type" name="player_type">{player_types}</select>
                <label for="name">Player name</label>
                <input id="name" type="text" name="name">
                <p><button type="submit">Look up</button></p>
            </form>
        </div>"#
    );

    if let Some(h2h) = &view.h2h {
        body.push_str(&result_section("h2h-result", "Head to head", h2h));
    }
    if let Some(record) = &view.team_record {
        body.push_str(&result_section("team-record-result", "Team record", record));
    }
    if let Some(player) = &view.player {
        let heading = match view.player_type.unwrap_or_default() {
            PlayerType::Batting => "Batting record",
            PlayerType::Bowling => "Bowling record",
        };
        body.push_str(&result_section("player-result", heading, player));
    }

    layout("Dashboard", Some(email), flashes, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_view_has_forms_but_no_results() {
        let Html(page) = dashboard_page(&DashboardView::default(), "fan@example.com", "tok", &[]);
        assert!(page.contains(r#"action="/dashboard/h2h""#));
        assert!(page.contains(r#"name="csrf_token" value="tok""#));
        assert!(!page.contains("h2h-result"));
        assert!(!page.contains("team-record-result"));
        assert!(!page.contains("player-result"));
    }

    #[test]
    fn teams_fill_every_dropdown() {
        let view = DashboardView::new(vec!["Delhi Capitals".to_string()]);
        let Html(page) = dashboard_page(&view, "fan@example.com", "tok", &[]);
        assert_eq!(
            page.matches(r#"<option value="Delhi Capitals">"#).count(),
            3
        );
    }

    #[test]
    fn bowling_result_is_labelled() {
        let view = DashboardView::new(Vec::new())
            .with_player(PlayerType::Bowling, Some(json!({"wickets": 10})));
        let Html(page) = dashboard_page(&view, "fan@example.com", "tok", &[]);
        assert!(page.contains(r#"id="player-result""#));
        assert!(page.contains("Bowling record"));
        assert!(page.contains(r#"<option value="bowling" selected>Bowling</option>"#));
        assert!(page.contains(r#"<option value="batting">Batting</option>"#));
    }

    #[test]
    fn batting_is_preselected_by_default() {
        let Html(page) = dashboard_page(&DashboardView::default(), "fan@example.com", "tok", &[]);
        assert!(page.contains(r#"<option value="batting" selected>Batting</option>"#));
        assert!(!page.contains(r#"value="bowling" selected"#));
    }
}
