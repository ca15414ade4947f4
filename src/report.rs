//! Plain-text and JSON-lines rendering of the session.

use crate::state::app_state::AppState;
use chrono::{Local, TimeZone, Utc};
use scoreline_api::excitement::{BandedExcitement, ExcitementPolicy};
use scoreline_api::format::{countdown, season_label};
use scoreline_api::{
    CompetitorView, EventDetail, FightNight, GameDetail, GameView, Leaderboard, Scorecard, Sport,
    TeamBox,
};
use serde::Serialize;
use std::fmt::Display;

const RECENT_PLAYS: usize = 5;
const LEADERBOARD_ROWS: usize = 10;

#[derive(Serialize)]
struct EventRow<'a> {
    #[serde(flatten)]
    game: &'a GameView,
    status_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    excitement: Option<f64>,
}

#[derive(Serialize)]
#[serde(tag = "update", rename_all = "snake_case")]
enum Update<'a> {
    Scoreboard {
        league: &'a str,
        date: &'a str,
        season: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<&'a str>,
        events: Vec<EventRow<'a>>,
    },
    Detail {
        league: &'a str,
        loading: bool,
        detail: &'a EventDetail,
    },
    Scorecard {
        league: &'a str,
        player: String,
        scorecard: &'a Scorecard,
    },
    Calendar {
        league: &'a str,
        selected: &'a str,
        dates: Vec<String>,
    },
}

/// Baseball rows carry a watchability score once play has begun.
fn excitement(state: &AppState, game: &GameView) -> Option<f64> {
    if state.league.sport != Sport::Baseball || game.status.is_scheduled() {
        return None;
    }
    let (home, away) = game.scores()?;
    Some(BandedExcitement::default().score(home, away, &game.status))
}

// ---------------------------------------------------------------------------
// JSON lines
// ---------------------------------------------------------------------------

pub fn scoreboard_json(state: &AppState) -> serde_json::Result<String> {
    serde_json::to_string(&Update::Scoreboard {
        league: state.league.code,
        date: &state.selected_date,
        season: state.season_slug.as_deref().map(season_label),
        error: state.last_error.as_deref(),
        events: state
            .events
            .iter()
            .map(|game| EventRow {
                game,
                status_line: game.status_line(),
                excitement: excitement(state, game),
            })
            .collect(),
    })
}

pub fn detail_json(state: &AppState) -> serde_json::Result<Option<String>> {
    state
        .detail
        .as_ref()
        .map(|detail| {
            serde_json::to_string(&Update::Detail {
                league: state.league.code,
                loading: detail.is_loading(),
                detail,
            })
        })
        .transpose()
}

pub fn scorecard_json(state: &AppState) -> serde_json::Result<Option<String>> {
    state
        .scorecard
        .as_ref()
        .map(|scorecard| {
            serde_json::to_string(&Update::Scorecard {
                league: state.league.code,
                player: player_name(state, scorecard),
                scorecard,
            })
        })
        .transpose()
}

pub fn calendar_json(state: &AppState) -> serde_json::Result<String> {
    serde_json::to_string(&Update::Calendar {
        league: state.league.code,
        selected: &state.selected_date,
        dates: state.calendar.iter().map(|d| d.key()).collect(),
    })
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub fn scoreboard_lines(state: &AppState) -> Vec<String> {
    scoreboard_lines_in(state, &Local)
}

pub fn scoreboard_lines_in<Tz>(state: &AppState, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = state
        .selected_calendar_date()
        .map(|d| d.format_short())
        .unwrap_or_else(|| state.selected_date.clone());
    let mut header = format!("{} {date}", state.league.name);
    if let Some(slug) = &state.season_slug {
        header.push_str(&format!(" ({})", season_label(slug)));
    }

    let mut lines = vec![header];
    if let Some(error) = &state.last_error {
        lines.push(format!("  last update failed: {error}"));
    }
    if state.events.is_empty() {
        lines.push("  no events".to_owned());
    }
    for game in &state.events {
        let mut line = format!(
            "  {:<16} {:>5}  {:<16} {:>5}  {}",
            game.away.name,
            game.away.headline(&game.status),
            game.home.name,
            game.home.headline(&game.status),
            game.status_line_in(tz),
        );
        if let Some(score) = excitement(state, game) {
            line.push_str(&format!("  [{score:.1}]"));
        }
        lines.push(line);
    }
    lines
}

pub fn detail_lines(state: &AppState) -> Vec<String> {
    detail_lines_at(state, &Local, Utc::now())
}

pub fn detail_lines_at<Tz>(state: &AppState, tz: &Tz, now: chrono::DateTime<Utc>) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(detail) = &state.detail else {
        return Vec::new();
    };
    let mut lines = match detail {
        EventDetail::Game(game) => game_lines(state, game, tz, now),
        EventDetail::Leaderboard(board) => leaderboard_lines(board),
        EventDetail::FightNight(night) => fight_lines(night, tz),
    };
    if detail.is_loading() {
        lines.push("  (loading...)".to_owned());
    }
    lines
}

fn game_lines<Tz>(state: &AppState, detail: &GameDetail, tz: &Tz, now: chrono::DateTime<Utc>) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    match &detail.header {
        Some(header) => {
            let mut line = format!(
                "{} {} - {} {}  {}",
                short_name(&header.away),
                header.away.headline(&header.status),
                short_name(&header.home),
                header.home.headline(&header.status),
                header.status_line_in(tz),
            );
            if header.status.is_scheduled()
                && let Some(start) = header.start()
            {
                line.push_str(&format!("  {} in {}", state.league.start_label, countdown(&start, &now)));
            }
            lines.push(line);
        }
        None => lines.push(format!("event {}", detail.event_id)),
    }

    if let Some(situation) = &detail.situation
        && state.league.sport == Sport::Baseball
    {
        let runners: Vec<&str> = [
            (situation.bases.first, "1st"),
            (situation.bases.second, "2nd"),
            (situation.bases.third, "3rd"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, base)| *base)
        .collect();
        lines.push(format!(
            "  {}-{} count, {} out, runners: {}",
            situation.balls.unwrap_or(0),
            situation.strikes.unwrap_or(0),
            situation.outs.unwrap_or(0),
            if runners.is_empty() { "none".to_owned() } else { runners.join(", ") },
        ));
    }

    for play in detail.feed().iter().take(RECENT_PLAYS) {
        let marker = if play.scoring { "*" } else { " " };
        let when = if play.clock.is_empty() {
            play.period_label.clone()
        } else {
            format!("{} {}", play.period_label, play.clock)
        };
        lines.push(format!("  {marker} {when:<10} {}", play.text));
    }

    for team in detail.boxscore.iter().flatten() {
        lines.push(team_line(team));
    }
    lines
}

fn team_line(team: &TeamBox) -> String {
    let leader = team.athletes.first().map(|a| {
        let stats: Vec<String> = a
            .labelled(&team.labels)
            .into_iter()
            .take(4)
            .map(|(label, stat)| format!("{label} {stat}"))
            .collect();
        format!("{} {}", a.name, stats.join(" "))
    });
    format!(
        "  {} ({} players){}",
        if team.abbrev.is_empty() { &team.team } else { &team.abbrev },
        team.athletes.len(),
        leader.map(|l| format!(": {l}")).unwrap_or_default(),
    )
}

fn leaderboard_lines(board: &Leaderboard) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", board.tournament, board.round_label)];
    for row in board.players.iter().flatten().take(LEADERBOARD_ROWS) {
        lines.push(format!(
            "  {:>4}  {:<24} {:>4} {:>9} {:>5}",
            row.position, row.name, row.today, row.thru, row.total
        ));
    }
    lines
}

fn fight_lines<Tz>(night: &FightNight, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    for card in night.cards.iter().flatten() {
        lines.push(card.title_in(tz));
        for bout in &card.bouts {
            lines.push(format!(
                "  {} {} vs {} {}  {}",
                bout.red.name,
                bout.red.headline(&bout.status),
                bout.blue.name,
                bout.blue.headline(&bout.status),
                bout.status_line(),
            ));
        }
    }
    lines
}

pub fn scorecard_lines(state: &AppState) -> Vec<String> {
    let Some(card) = &state.scorecard else {
        return Vec::new();
    };
    let mut lines = vec![format!("{}  {}", player_name(state, card), card.total_to_par)];
    if card.rounds.is_empty() {
        lines.push("  no rounds yet".to_owned());
    }
    for round in &card.rounds {
        lines.push(format!(
            "  R{} {:>3}  out {:>2} (par {})  in {:>2} (par {})",
            round.number, round.score, round.out_score, round.out_par, round.in_score, round.in_par
        ));
        let holes: Vec<&str> = round.holes.iter().map(|h| h.score.as_str()).collect();
        if !holes.is_empty() {
            lines.push(format!("     {}", holes.join(" ")));
        }
    }
    lines
}

/// Leaderboard name for the scorecard's golfer, or the bare id.
fn player_name(state: &AppState, card: &Scorecard) -> String {
    let Some(EventDetail::Leaderboard(board)) = &state.detail else {
        return card.player_id.clone();
    };
    board
        .players
        .iter()
        .flatten()
        .find(|row| row.id == card.player_id)
        .map(|row| row.name.clone())
        .unwrap_or_else(|| card.player_id.clone())
}

pub fn calendar_lines(state: &AppState) -> Vec<String> {
    if state.calendar.is_empty() {
        return vec![format!("{}: no calendar", state.league.name)];
    }
    state
        .calendar
        .iter()
        .map(|date| {
            let marker = if date.key() == state.selected_date { ">" } else { " " };
            format!("{marker} {}  {}", date.key(), date.format_short())
        })
        .collect()
}

fn short_name(side: &CompetitorView) -> &str {
    if side.abbrev.is_empty() { &side.name } else { &side.abbrev }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreline_api::{CalendarDate, EventStatus, Hole, League, LeaderboardRow, RoundCard, Situation};

    fn state(code: &str) -> AppState {
        let mut state = AppState::new(League::from_code(code).unwrap());
        state.selected_date = "20240601".into();
        state
    }

    fn side(name: &str, score: &str) -> CompetitorView {
        CompetitorView { name: name.into(), score: score.into(), ..Default::default() }
    }

    fn ballgame(status: EventStatus) -> GameView {
        GameView {
            id: "1".into(),
            home: side("Yankees", "5"),
            away: side("Red Sox", "4"),
            status,
            status_detail: "Final".into(),
            start_time: "2024-06-01T23:05Z".into(),
            situation: Situation::Baseball { inning: 9, half: None, outs: None, bases: Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn baseball_rows_show_excitement_once_started() {
        let mut s = state("mlb");
        s.events = vec![ballgame(EventStatus::Final), ballgame(EventStatus::Scheduled)];
        let lines = scoreboard_lines_in(&s, &Utc);
        assert_eq!(lines[0], "MLB 20240601");
        assert!(lines[1].ends_with("Final  [8.0]"), "{}", lines[1]);
        assert!(lines[2].ends_with("11:05 PM"), "{}", lines[2]);
    }

    #[test]
    fn scoreboard_json_is_one_line_with_season_label() {
        let mut s = state("mlb");
        s.season_slug = Some("post-season".into());
        s.events = vec![ballgame(EventStatus::Postponed)];
        let line = scoreboard_json(&s).unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["update"], "scoreboard");
        assert_eq!(value["season"], "Postseason");
        assert_eq!(value["events"][0]["status"], "STATUS_POSTPONED");
        assert_eq!(value["events"][0]["status_line"], "Postponed");
        assert_eq!(value["events"][0]["excitement"], 0.0);
    }

    #[test]
    fn scheduled_detail_counts_down_to_start() {
        let mut s = state("nba");
        let mut header = ballgame(EventStatus::Scheduled);
        header.situation = Situation::Period { period: 0, clock: "0:00".into() };
        s.detail = Some(EventDetail::Game(GameDetail {
            event_id: "1".into(),
            header: Some(header),
            ..Default::default()
        }));
        let now = chrono::DateTime::parse_from_rfc3339("2024-06-01T21:00:00Z").unwrap().with_timezone(&Utc);
        let lines = detail_lines_at(&s, &Utc, now);
        assert!(lines[0].ends_with("Tip-Off in 2 hr 5 min"), "{}", lines[0]);
        assert_eq!(lines.last().map(String::as_str), Some("  (loading...)"));
    }

    #[test]
    fn leaderboard_detail_lists_rows() {
        let mut s = state("pga");
        s.detail = Some(EventDetail::Leaderboard(Leaderboard {
            event_id: "1".into(),
            tournament: "the Memorial Tournament".into(),
            round_label: "R2".into(),
            players: Some(vec![LeaderboardRow {
                position: "1".into(),
                name: "Scottie Scheffler".into(),
                today: "-2".into(),
                thru: "F".into(),
                total: "-8".into(),
                ..Default::default()
            }]),
            ..Default::default()
        }));
        let lines = detail_lines(&s);
        assert_eq!(lines[0], "the Memorial Tournament  R2");
        assert!(lines[1].contains("Scottie Scheffler"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn failed_fetch_shows_under_the_header() {
        let mut s = state("nhl");
        s.last_error = Some("API error for /scoreboard: 503".into());
        let lines = scoreboard_lines_in(&s, &Utc);
        assert_eq!(lines[1], "  last update failed: API error for /scoreboard: 503");
        let value: serde_json::Value = serde_json::from_str(&scoreboard_json(&s).unwrap()).unwrap();
        assert_eq!(value["error"], "API error for /scoreboard: 503");

        s.last_error = None;
        let value: serde_json::Value = serde_json::from_str(&scoreboard_json(&s).unwrap()).unwrap();
        assert!(value.get("error").is_none());
    }

    #[test]
    fn scorecard_uses_the_leaderboard_name() {
        let mut s = state("pga");
        assert!(scorecard_lines(&s).is_empty());
        assert_eq!(scorecard_json(&s).unwrap(), None);

        s.detail = Some(EventDetail::Leaderboard(Leaderboard {
            event_id: "401580344".into(),
            players: Some(vec![LeaderboardRow {
                id: "9478".into(),
                name: "Scottie Scheffler".into(),
                ..Default::default()
            }]),
            ..Default::default()
        }));
        s.scorecard = Some(Scorecard {
            player_id: "9478".into(),
            total_to_par: "-3".into(),
            rounds: vec![RoundCard {
                number: 1,
                score: "-3".into(),
                out_score: "34".into(),
                in_score: "35".into(),
                out_par: 36,
                in_par: 36,
                holes: vec![
                    Hole { number: 1, score: "3".into(), par: 4 },
                    Hole { number: 2, score: "4".into(), par: 4 },
                ],
            }],
        });

        let lines = scorecard_lines(&s);
        assert_eq!(lines[0], "Scottie Scheffler  -3");
        assert_eq!(lines[1], "  R1  -3  out 34 (par 36)  in 35 (par 36)");
        assert_eq!(lines[2], "     3 4");

        let value: serde_json::Value = serde_json::from_str(&scorecard_json(&s).unwrap().unwrap()).unwrap();
        assert_eq!(value["update"], "scorecard");
        assert_eq!(value["player"], "Scottie Scheffler");
        assert_eq!(value["scorecard"]["total_to_par"], "-3");
    }

    #[test]
    fn calendar_marks_selection() {
        let mut s = state("mlb");
        s.calendar = ["20240531", "20240601"].iter().filter_map(|k| CalendarDate::from_key(k)).collect();
        assert_eq!(calendar_lines(&s), ["  20240531  May 31", "> 20240601  Jun 1"]);
        let value: serde_json::Value = serde_json::from_str(&calendar_json(&s).unwrap()).unwrap();
        assert_eq!(value["dates"][1], "20240601");
    }
}
