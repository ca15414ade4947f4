//! Mapping: ESPN wire types to flat view models.
//!
//! Every function here is pure. Missing upstream fields become the sentinels
//! defined in the crate root rather than `None`.

use crate::client::{ApiError, ApiResult};
use crate::espn::{
    CompetitorSummaryResponse, EspnAthlete, EspnCompetition, EspnCompetitor, EspnEvent,
    EspnFightCard, EspnGolfer, EspnSituation, EspnStatus, EspnTeamPlayers, FightCenterResponse,
    LeaderboardResponse, ScoreboardResponse, SummaryResponse, WhitelistResponse,
};
use crate::{
    AthleteLine, Bases, Bout, BoutResult, CalendarDate, CompetitorView, EventStatus, FightCard,
    FightNight, Fighter, GameDetail, GameView, Hole, InningHalf, League, Leaderboard,
    LeaderboardRow, LiveSituation, NO_CLOCK, NO_SCORE, NO_TIME, NO_VALUE, Play, RoundCard,
    Scoreboard, Scorecard, Situation, Sport, TeamBox, UNKNOWN, format,
};
use chrono::{Local, TimeZone};
use log::debug;
use std::fmt::Display;

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

pub fn calendar_from_whitelist(raw: &WhitelistResponse) -> Vec<CalendarDate> {
    raw.event_date
        .as_ref()
        .and_then(|e| e.dates.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(|d| parse_calendar_entry(d))
        .collect()
}

pub fn calendar_from_scoreboard(raw: &ScoreboardResponse) -> Vec<CalendarDate> {
    raw.leagues
        .as_deref()
        .and_then(|leagues| leagues.first())
        .and_then(|league| league.calendar.as_deref())
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| entry.date_str().and_then(parse_calendar_entry))
        .collect()
}

fn parse_calendar_entry(raw: &str) -> Option<CalendarDate> {
    let parsed = CalendarDate::parse(raw);
    if parsed.is_none() {
        debug!("skipping unparseable calendar entry {raw:?}");
    }
    parsed
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

pub fn map_scoreboard(league: &League, date: &str, raw: ScoreboardResponse) -> ApiResult<Scoreboard> {
    let events = raw.events.ok_or(ApiError::MissingField("events"))?;

    let season_slug = events
        .first()
        .and_then(|e| e.season.as_ref())
        .and_then(|s| s.slug.clone());

    Ok(Scoreboard {
        date: date.to_owned(),
        events: events.iter().map(|e| map_event(league, e)).collect(),
        season_slug,
    })
}

/// Flatten one scoreboard event into its view model.
pub fn map_event(league: &League, event: &EspnEvent) -> GameView {
    let competitions = event.competitions.as_deref().unwrap_or_default();
    let competition = competitions.first().cloned().unwrap_or_default();
    let id = event.id.clone().unwrap_or_default();

    let mut game = map_competition(league, &id, &competition, event.status.as_ref(), competitions.len());
    if competition.date.is_none()
        && let Some(date) = &event.date
    {
        game.start_time = date.clone();
    }
    game.name = event
        .name
        .clone()
        .or_else(|| event.short_name.clone())
        .unwrap_or_else(|| format!("{} at {}", game.away.name, game.home.name));
    game
}

/// Shared by scoreboard events and summary headers. `event_status` carries
/// the clock/period that scoreboards keep on the event rather than the
/// competition.
fn map_competition(
    league: &League,
    id: &str,
    competition: &EspnCompetition,
    event_status: Option<&EspnStatus>,
    bouts: usize,
) -> GameView {
    let status = competition.status.as_ref().or(event_status);
    let status_type = status.and_then(|s| s.status_type.as_ref());

    let status_name = status_type
        .and_then(|t| t.name.as_deref())
        .map(EventStatus::parse)
        .unwrap_or(EventStatus::Unknown);
    let status_detail = status_type
        .and_then(|t| t.short_detail.clone())
        .unwrap_or_else(|| UNKNOWN.to_owned());

    let clock_source = event_status.or(competition.status.as_ref());
    let period = clock_source
        .and_then(|s| s.period.as_ref())
        .and_then(|p| p.as_i64())
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(0);
    let clock = clock_source
        .and_then(|s| s.display_clock.clone())
        .unwrap_or_else(|| NO_CLOCK.to_owned());

    let competitors = competition.competitors.as_deref().unwrap_or_default();
    let (home, away) = split_competitors(competitors);

    let series = competition
        .series
        .as_ref()
        .filter(|s| s.series_type.as_deref() == Some("playoff"));
    let series_wins = |c: &EspnCompetitor, fallback: usize| -> Option<u32> {
        let entries = series?.competitors.as_deref().unwrap_or_default();
        entries
            .iter()
            .find(|s| s.id.is_some() && s.id == c.id)
            .or_else(|| entries.get(fallback))
            .and_then(|s| s.wins)
    };

    let mut home_view = map_competitor(home);
    let mut away_view = map_competitor(away);
    if series.is_some() {
        let home_wins = series_wins(home, 0);
        let away_wins = series_wins(away, 1);
        home_view.record = format!("{}-{}", home_wins.unwrap_or(0), away_wins.unwrap_or(0));
        away_view.record = format!("{}-{}", away_wins.unwrap_or(0), home_wins.unwrap_or(0));
        home_view.series_wins = home_wins;
        away_view.series_wins = away_wins;
    }

    let situation = match league.sport {
        Sport::Baseball => Situation::Baseball {
            inning: period,
            half: status_name
                .is_live()
                .then(|| InningHalf::from_detail(&status_detail))
                .flatten(),
            outs: competition.situation.as_ref().and_then(|s| s.outs),
            bases: competition
                .situation
                .as_ref()
                .map(map_bases)
                .unwrap_or_default(),
        },
        Sport::Basketball | Sport::Hockey => Situation::Period { period, clock },
        Sport::Golf => Situation::Golf { round: period },
        Sport::Mma => Situation::Fight { round: period, clock, bouts },
    };

    GameView {
        id: id.to_owned(),
        name: String::new(),
        home: home_view,
        away: away_view,
        status: status_name,
        status_detail,
        start_time: competition.date.clone().unwrap_or_else(|| NO_TIME.to_owned()),
        is_playoff: series.is_some(),
        situation,
    }
}

fn split_competitors(competitors: &[EspnCompetitor]) -> (&EspnCompetitor, &EspnCompetitor) {
    static DEFAULT: EspnCompetitor = EspnCompetitor {
        id: None,
        home_away: None,
        team: None,
        athlete: None,
        score: None,
        winner: None,
        records: None,
        display_record: None,
    };

    // Use "home"/"away" markers; fall back to index order
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))
        .or_else(|| competitors.first())
        .unwrap_or(&DEFAULT);
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))
        .or_else(|| competitors.get(1))
        .unwrap_or(&DEFAULT);
    (home, away)
}

fn map_competitor(c: &EspnCompetitor) -> CompetitorView {
    let team = c.team.as_ref();
    let athlete = c.athlete.as_ref();

    let name = team
        .and_then(|t| t.short_display_name.clone().or_else(|| t.display_name.clone()))
        .or_else(|| athlete.and_then(|a| a.display_name.clone()))
        .unwrap_or_else(|| UNKNOWN.to_owned());
    let abbrev = team
        .and_then(|t| t.abbreviation.clone())
        .or_else(|| athlete.and_then(|a| a.short_name.clone()))
        .unwrap_or_default();
    let logo = team
        .and_then(|t| {
            t.logo
                .clone()
                .or_else(|| t.logos.iter().flatten().find_map(|l| l.href.clone()))
        })
        .or_else(|| athlete.and_then(athlete_image))
        .unwrap_or_default();
    let record = c
        .records
        .as_deref()
        .and_then(|r| r.first())
        .and_then(|r| r.summary.clone())
        .or_else(|| c.display_record.clone())
        .unwrap_or_default();

    CompetitorView {
        id: c.id.clone().unwrap_or_default(),
        name,
        abbrev,
        logo,
        score: c
            .score
            .as_ref()
            .and_then(|s| s.display())
            .unwrap_or_else(|| NO_SCORE.to_owned()),
        record,
        series_wins: None,
        winner: c.winner,
    }
}

fn athlete_image(a: &EspnAthlete) -> Option<String> {
    a.headshot
        .as_ref()
        .and_then(|h| h.href.clone())
        .or_else(|| a.flag.as_ref().and_then(|f| f.href.clone()))
}

fn map_bases(s: &EspnSituation) -> Bases {
    Bases {
        first: s.on_first.unwrap_or(false),
        second: s.on_second.unwrap_or(false),
        third: s.on_third.unwrap_or(false),
    }
}

// ---------------------------------------------------------------------------
// Game summary
// ---------------------------------------------------------------------------

pub fn map_summary(league: &League, event_id: &str, raw: SummaryResponse) -> GameDetail {
    let header_competition = raw
        .header
        .as_ref()
        .and_then(|h| h.competitions.as_deref())
        .and_then(|c| c.first());

    let header = header_competition.map(|c| {
        let mut game = map_competition(league, event_id, c, None, 1);
        game.name = format!("{} at {}", game.away.name, game.home.name);
        game
    });
    let period_prefix = header_competition
        .and_then(|c| c.status.as_ref())
        .and_then(|s| s.period_prefix.clone());

    let plays = raw.plays.map(|plays| {
        plays
            .into_iter()
            .map(|p| {
                let (period, period_label) = p
                    .period
                    .map(|x| {
                        let number = x.number.unwrap_or_default();
                        let label = x.display_value.unwrap_or_else(|| format::ordinal(number));
                        (number, label)
                    })
                    .unwrap_or_default();
                Play {
                    id: p.id.unwrap_or_default(),
                    sequence_id: p.at_bat_id.or(p.sequence_number).unwrap_or_default(),
                    period,
                    period_label,
                    clock: p
                        .clock
                        .and_then(|c| c.display_value)
                        .unwrap_or_default(),
                    text: p.text.unwrap_or_default(),
                    scoring: p.scoring_play.unwrap_or(false),
                    home_score: p.home_score.unwrap_or_default(),
                    away_score: p.away_score.unwrap_or_default(),
                }
            })
            .collect()
    });

    let boxscore = raw
        .boxscore
        .and_then(|b| b.players)
        .map(|teams| teams.into_iter().map(build_team_box).collect());

    let situation = raw
        .situation
        .as_ref()
        .or_else(|| header_competition.and_then(|c| c.situation.as_ref()))
        .map(|s| LiveSituation {
            bases: map_bases(s),
            outs: s.outs,
            balls: s.balls,
            strikes: s.strikes,
        });

    GameDetail {
        event_id: event_id.to_owned(),
        header,
        plays,
        boxscore,
        situation,
        period_prefix,
    }
}

fn build_team_box(team_data: EspnTeamPlayers) -> TeamBox {
    let team = team_data.team.unwrap_or_default();

    // The first category is the primary box (batting, skaters, starters...).
    let category = team_data
        .statistics
        .unwrap_or_default()
        .into_iter()
        .next();

    let (labels, athletes) = category
        .map(|cat| {
            let athletes = cat
                .athletes
                .unwrap_or_default()
                .into_iter()
                .map(|a| {
                    let athlete = a.athlete.unwrap_or_default();
                    AthleteLine {
                        id: athlete.id.clone().unwrap_or_default(),
                        name: athlete.display_name.clone().unwrap_or_else(|| UNKNOWN.to_owned()),
                        position: athlete
                            .position
                            .as_ref()
                            .and_then(|p| p.abbreviation.clone())
                            .unwrap_or_default(),
                        headshot: athlete_image(&athlete).unwrap_or_default(),
                        stats: a.stats.unwrap_or_default(),
                    }
                })
                .collect();
            (cat.labels.unwrap_or_default(), athletes)
        })
        .unwrap_or_default();

    TeamBox {
        team: team
            .display_name
            .or(team.name)
            .unwrap_or_else(|| UNKNOWN.to_owned()),
        abbrev: team.abbreviation.unwrap_or_default(),
        labels,
        athletes,
    }
}

// ---------------------------------------------------------------------------
// Golf
// ---------------------------------------------------------------------------

pub fn map_leaderboard(event_id: &str, raw: LeaderboardResponse) -> Leaderboard {
    map_leaderboard_in(event_id, raw, &Local)
}

/// Tee times are rendered in `tz`.
pub fn map_leaderboard_in<Tz>(event_id: &str, raw: LeaderboardResponse, tz: &Tz) -> Leaderboard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let event = raw.events.unwrap_or_default().into_iter().next().unwrap_or_default();
    let tournament = event
        .tournament
        .and_then(|t| t.display_name)
        .or(event.name)
        .unwrap_or_else(|| UNKNOWN.to_owned());

    let competition = event
        .competitions
        .unwrap_or_default()
        .into_iter()
        .next()
        .unwrap_or_default();

    let status = competition
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.name.as_deref())
        .map(EventStatus::parse)
        .unwrap_or(EventStatus::Unknown);
    let mut round = competition
        .status
        .as_ref()
        .and_then(|s| s.period.as_ref())
        .and_then(|p| p.as_i64())
        .unwrap_or(0);
    if round > 0 && status == EventStatus::PlayComplete {
        round += 1;
    }
    let round_label = if round > 0 { format!("R{round}") } else { "Today".to_owned() };

    let players = competition.competitors.map(|mut golfers| {
        golfers.sort_by_key(|g| g.sort_order.unwrap_or(i64::MAX));
        golfers.iter().map(|g| map_golfer(g, tz)).collect()
    });

    Leaderboard {
        event_id: event_id.to_owned(),
        tournament,
        status,
        round_label,
        players,
    }
}

const BACK_NINE_START: u32 = 10;

fn map_golfer<Tz>(golfer: &EspnGolfer, tz: &Tz) -> LeaderboardRow
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let status = golfer.status.clone().unwrap_or_default();
    let back_nine = status.start_hole == Some(BACK_NINE_START);

    let mut position = status
        .position
        .as_ref()
        .and_then(|p| p.display_name.clone())
        .unwrap_or_else(|| NO_VALUE.to_owned());
    let mut today = NO_VALUE.to_owned();
    let mut thru = status
        .thru
        .as_ref()
        .and_then(|t| t.display())
        .unwrap_or_else(|| NO_VALUE.to_owned());

    let scheduled = status
        .status_type
        .as_ref()
        .and_then(|t| t.name.as_deref())
        == Some("STATUS_SCHEDULED");

    if status.display_value.as_deref() == Some("CUT") {
        position = "MC".to_owned();
        thru = "CUT".to_owned();
    } else if scheduled {
        thru = status
            .tee_time
            .as_deref()
            .and_then(format::parse_start)
            .map(|tee| format::game_time_in(&tee, tz))
            .unwrap_or_else(|| NO_VALUE.to_owned());
        if back_nine && thru != NO_VALUE {
            thru.push('*');
        }
    } else {
        let round_index = status.period.unwrap_or(0).checked_sub(1);
        if let Some(line) = round_index
            .and_then(|i| golfer.linescores.as_deref()?.get(i as usize))
        {
            today = line.display_value.clone().unwrap_or_else(|| NO_VALUE.to_owned());
        }
        if back_nine && thru != NO_VALUE {
            thru.push('*');
        }
    }

    let total = golfer
        .statistics
        .as_deref()
        .and_then(|s| s.first())
        .and_then(|s| s.display_value.clone())
        .unwrap_or_else(|| NO_VALUE.to_owned());

    let athlete = golfer.athlete.clone().unwrap_or_default();
    let mut name = athlete.display_name.clone().unwrap_or_else(|| UNKNOWN.to_owned());
    if golfer.amateur.unwrap_or(false) {
        name.push_str(" (A)");
    }

    LeaderboardRow {
        id: athlete.id.or_else(|| golfer.id.clone()).unwrap_or_default(),
        position,
        name,
        today,
        thru,
        total,
    }
}

pub fn map_scorecard(player_id: &str, raw: CompetitorSummaryResponse) -> Scorecard {
    let rounds: Vec<RoundCard> = raw
        .rounds
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, round)| {
            let holes: Vec<Hole> = round
                .linescores
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(h, ls)| Hole {
                    number: ls.period.unwrap_or(h as u32 + 1),
                    score: ls.display_value.unwrap_or_else(|| NO_VALUE.to_owned()),
                    par: ls.par.unwrap_or(0),
                })
                .collect();
            let out_par = holes.iter().take(9).map(|h| h.par).sum();
            let in_par = holes.iter().skip(9).map(|h| h.par).sum();
            let display = |v: Option<crate::espn::EspnValue>| {
                v.and_then(|v| v.display()).unwrap_or_else(|| NO_VALUE.to_owned())
            };
            RoundCard {
                number: round.period.unwrap_or(i as u32 + 1),
                score: round.display_value.unwrap_or_else(|| NO_VALUE.to_owned()),
                out_score: display(round.out_score),
                in_score: display(round.in_score),
                out_par,
                in_par,
                holes,
            }
        })
        .collect();

    // Round display values are relative to par ("-3", "+1", "E").
    let total: i64 = rounds
        .iter()
        .map(|r| r.score.trim().parse::<i64>().unwrap_or(0))
        .sum();

    Scorecard {
        player_id: player_id.to_owned(),
        rounds,
        total_to_par: format::to_par(total),
    }
}

// ---------------------------------------------------------------------------
// MMA fight center
// ---------------------------------------------------------------------------

pub fn map_fightcenter(event_id: &str, raw: FightCenterResponse) -> FightNight {
    let cards = raw.cards.map(|cards| {
        cards
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<EspnFightCard>(value) {
                Ok(card) => Some(map_fight_card(key, card)),
                Err(e) => {
                    debug!("skipping malformed fight card {key}: {e}");
                    None
                }
            })
            .collect()
    });

    FightNight {
        event_id: event_id.to_owned(),
        cards,
    }
}

fn map_fight_card(key: String, card: EspnFightCard) -> FightCard {
    let competitions = card.competitions.unwrap_or_default();
    let first = competitions.first();
    let start_time = first
        .and_then(|c| c.date.clone())
        .unwrap_or_else(|| NO_TIME.to_owned());
    let finished = first
        .and_then(|c| c.status.as_ref())
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.name.as_deref())
        == Some("STATUS_FINAL");

    // Anything not yet scheduled or final goes on top, including bouts
    // waiting on a decision.
    let (mut bouts, settled): (Vec<Bout>, Vec<Bout>) = competitions
        .iter()
        .map(map_bout)
        .partition(|b| !matches!(b.status, EventStatus::Scheduled | EventStatus::Final));
    bouts.extend(settled);

    FightCard {
        name: card.display_name.unwrap_or_else(|| key.clone()),
        key,
        start_time,
        finished,
        bouts,
    }
}

fn map_bout(competition: &EspnCompetition) -> Bout {
    let status = competition.status.clone().unwrap_or_default();
    let competitors = competition.competitors.as_deref().unwrap_or_default();

    let fighter = |i: usize| {
        let c = competitors.get(i);
        let athlete = c.and_then(|c| c.athlete.as_ref());
        Fighter {
            name: athlete
                .and_then(|a| a.display_name.clone())
                .unwrap_or_else(|| UNKNOWN.to_owned()),
            record: c.and_then(|c| c.display_record.clone()).unwrap_or_default(),
            image: athlete.and_then(athlete_image).unwrap_or_default(),
            winner: c.and_then(|c| c.winner).unwrap_or(false),
        }
    };

    Bout {
        id: competition.id.clone().unwrap_or_default(),
        status: status
            .status_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .map(EventStatus::parse)
            .unwrap_or(EventStatus::Unknown),
        round: status
            .period
            .as_ref()
            .and_then(|p| p.as_i64())
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(0),
        clock: status.display_clock.clone().unwrap_or_else(|| NO_CLOCK.to_owned()),
        red: fighter(0),
        blue: fighter(1),
        result: status.result.map(|r| BoutResult {
            short: r.short_display_name.unwrap_or_default(),
            description: r.description.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn league(code: &str) -> League {
        League::from_code(code).unwrap()
    }

    fn scoreboard(value: serde_json::Value) -> ScoreboardResponse {
        serde_json::from_value(value).unwrap()
    }

    fn nba_event() -> serde_json::Value {
        json!({
            "id": "401656363",
            "name": "Dallas Mavericks at Boston Celtics",
            "season": { "year": 2024, "slug": "post-season" },
            "status": { "period": 3, "displayClock": "4:12" },
            "competitions": [{
                "date": "2024-06-07T00:30Z",
                "status": { "type": { "name": "STATUS_IN_PROGRESS", "shortDetail": "4:12 - 3rd" } },
                "series": {
                    "type": "playoff",
                    "competitors": [{ "id": "2", "wins": 2 }, { "id": "6", "wins": 0 }]
                },
                "competitors": [
                    {
                        "id": "2", "homeAway": "home", "score": "78",
                        "team": { "shortDisplayName": "Celtics", "abbreviation": "BOS", "logo": "bos.png" },
                        "records": [{ "type": "total", "summary": "64-18" }]
                    },
                    {
                        "id": "6", "homeAway": "away", "score": "70",
                        "team": { "shortDisplayName": "Mavericks", "abbreviation": "DAL", "logo": "dal.png" },
                        "records": [{ "type": "total", "summary": "50-32" }]
                    }
                ]
            }]
        })
    }

    #[test]
    fn playoff_series_replaces_record() {
        let raw = scoreboard(json!({ "events": [nba_event()] }));
        let board = map_scoreboard(&league("nba"), "20240606", raw).unwrap();
        let game = &board.events[0];

        assert!(game.is_playoff);
        assert_eq!(game.home.record, "2-0");
        assert_eq!(game.away.record, "0-2");
        assert_eq!(game.home.series_wins, Some(2));
        assert_eq!(game.situation, Situation::Period { period: 3, clock: "4:12".into() });
        assert_eq!(game.status, EventStatus::InProgress);
        assert_eq!(board.season_slug.as_deref(), Some("post-season"));
    }

    #[test]
    fn regular_season_uses_first_record() {
        let mut event = nba_event();
        event["competitions"][0]["series"] = json!({ "type": "season" });
        let game = map_event(&league("nba"), &serde_json::from_value(event).unwrap());
        assert!(!game.is_playoff);
        assert_eq!(game.home.record, "64-18");
        assert_eq!(game.home.series_wins, None);
    }

    #[test]
    fn missing_fields_fall_back_to_sentinels() {
        let game = map_event(&league("nhl"), &serde_json::from_value(json!({ "id": "9" })).unwrap());
        assert_eq!(game.home.name, "Unknown");
        assert_eq!(game.away.score, "0");
        assert_eq!(game.home.record, "");
        assert_eq!(game.start_time, "TBD");
        assert_eq!(game.status, EventStatus::Unknown);
        assert_eq!(game.status_detail, "Unknown");
        assert_eq!(game.situation, Situation::Period { period: 0, clock: "0:00".into() });
    }

    #[test]
    fn normalizing_twice_gives_the_same_record() {
        let event: EspnEvent = serde_json::from_value(nba_event()).unwrap();
        let first = map_event(&league("nba"), &event);
        let second = map_event(&league("nba"), &event);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_events_leave_season_unset() {
        let board = map_scoreboard(&league("mlb"), "20240601", scoreboard(json!({ "events": [] }))).unwrap();
        assert!(board.events.is_empty());
        assert!(board.season_slug.is_none());
    }

    #[test]
    fn missing_events_is_an_error() {
        let err = map_scoreboard(&league("mlb"), "20240601", scoreboard(json!({}))).unwrap_err();
        assert!(matches!(err, ApiError::MissingField("events")));
    }

    #[test]
    fn baseball_situation_reads_runners_and_half() {
        let raw = json!({
            "id": "1",
            "status": { "period": 7 },
            "competitions": [{
                "status": { "type": { "name": "STATUS_IN_PROGRESS", "shortDetail": "Bot 7th" } },
                "situation": { "onFirst": true, "onThird": true, "outs": 1 },
                "competitors": [
                    { "homeAway": "home", "score": 3, "team": { "shortDisplayName": "Yankees" } },
                    { "homeAway": "away", "score": 2, "team": { "shortDisplayName": "Red Sox" } }
                ]
            }]
        });
        let game = map_event(&league("mlb"), &serde_json::from_value(raw).unwrap());
        let Situation::Baseball { inning, half, outs, bases } = game.situation.clone() else {
            panic!("expected baseball situation, got {:?}", game.situation);
        };
        assert_eq!(inning, 7);
        assert_eq!(half, Some(InningHalf::Bottom));
        assert_eq!(outs, Some(1));
        assert_eq!(bases.occupied(), 2);
        assert_eq!(game.scores(), Some((3, 2)));
        assert_eq!(game.name, "Red Sox at Yankees");
    }

    #[test]
    fn calendar_entries_parse_in_both_shapes() {
        let whitelist: WhitelistResponse = serde_json::from_value(json!({
            "eventDate": { "dates": ["2024-06-01T07:00Z", "garbage", "2024-06-03T07:00Z"] }
        }))
        .unwrap();
        let keys: Vec<String> = calendar_from_whitelist(&whitelist).iter().map(|d| d.key()).collect();
        assert_eq!(keys, ["20240601", "20240603"]);

        let golf = scoreboard(json!({
            "leagues": [{ "calendar": [
                { "id": "401580329", "label": "The Memorial", "startDate": "2024-06-06T07:00Z" },
                { "id": "401580330", "label": "RBC Canadian Open", "startDate": "2024-05-30T07:00Z" }
            ]}]
        }));
        let keys: Vec<String> = calendar_from_scoreboard(&golf).iter().map(|d| d.key()).collect();
        assert_eq!(keys, ["20240606", "20240530"]);
        assert!(calendar_from_scoreboard(&scoreboard(json!({}))).is_empty());
    }

    #[test]
    fn summary_sections_are_independently_optional() {
        let raw: SummaryResponse = serde_json::from_value(json!({
            "header": { "competitions": [{
                "status": { "period": 5, "periodPrefix": "Top", "type": { "name": "STATUS_IN_PROGRESS", "shortDetail": "Top 5th" } },
                "competitors": [
                    { "homeAway": "home", "team": { "shortDisplayName": "Cubs" } },
                    { "homeAway": "away", "team": { "shortDisplayName": "Cardinals" } }
                ]
            }]},
            "plays": [{ "id": "1", "atBatId": "ab-1", "text": "Ball 1", "period": { "number": 5 } }]
        }))
        .unwrap();
        let detail = map_summary(&league("mlb"), "401", raw);
        assert!(detail.header.is_some());
        assert!(detail.boxscore.is_none());
        assert!(detail.is_loading());
        assert_eq!(detail.period_prefix.as_deref(), Some("Top"));
        let plays = detail.plays.as_ref().unwrap();
        assert_eq!(plays[0].sequence_id, "ab-1");
        assert_eq!(plays[0].period_label, "5th");
    }

    #[test]
    fn box_score_keeps_parallel_labels() {
        let raw: SummaryResponse = serde_json::from_value(json!({
            "header": { "competitions": [{ "competitors": [] }] },
            "plays": [],
            "boxscore": { "players": [{
                "team": { "displayName": "Boston Celtics", "abbreviation": "BOS" },
                "statistics": [{
                    "labels": ["MIN", "PTS"],
                    "athletes": [{
                        "athlete": { "id": "1", "displayName": "Jayson Tatum", "position": { "abbreviation": "SF" } },
                        "stats": ["38", "31"]
                    }]
                }]
            }]}
        }))
        .unwrap();
        let detail = map_summary(&league("nba"), "401", raw);
        assert!(!detail.is_loading());
        let team = &detail.boxscore.as_ref().unwrap()[0];
        assert_eq!(team.abbrev, "BOS");
        assert_eq!(team.athletes[0].labelled(&team.labels), vec![("MIN", "38"), ("PTS", "31")]);
    }

    #[test]
    fn leaderboard_rows_follow_golf_rules() {
        let raw: LeaderboardResponse = serde_json::from_value(json!({
            "events": [{
                "tournament": { "displayName": "the Memorial Tournament" },
                "competitions": [{
                    "status": { "period": 2, "type": { "name": "STATUS_PLAY_COMPLETE" } },
                    "competitors": [
                        {
                            "sortOrder": 3, "amateur": true,
                            "athlete": { "id": "c", "displayName": "Gordon Sargent" },
                            "status": { "period": 2, "displayValue": "CUT", "thru": 18, "position": { "displayName": "T70" } },
                            "statistics": [{ "displayValue": "+6" }]
                        },
                        {
                            "sortOrder": 1,
                            "athlete": { "id": "a", "displayName": "Scottie Scheffler" },
                            "status": { "period": 2, "thru": 12, "startHole": 10, "position": { "displayName": "1" },
                                        "type": { "name": "STATUS_IN_PROGRESS" } },
                            "linescores": [{ "displayValue": "-3" }, { "displayValue": "-2" }],
                            "statistics": [{ "displayValue": "-5" }]
                        },
                        {
                            "sortOrder": 2,
                            "athlete": { "id": "b", "displayName": "Collin Morikawa" },
                            "status": { "period": 3, "startHole": 10, "teeTime": "2024-06-08T17:40Z",
                                        "position": { "displayName": "2" }, "type": { "name": "STATUS_SCHEDULED" } }
                        }
                    ]
                }]
            }]
        }))
        .unwrap();

        let board = map_leaderboard_in("401580329", raw, &Utc);
        assert_eq!(board.tournament, "the Memorial Tournament");
        assert_eq!(board.round_label, "R3");
        let rows = board.players.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Scottie Scheffler", "Collin Morikawa", "Gordon Sargent (A)"]);

        assert_eq!(rows[0].today, "-2");
        assert_eq!(rows[0].thru, "12*");
        assert_eq!(rows[0].total, "-5");
        assert_eq!(rows[1].thru, "5:40 PM*");
        assert_eq!(rows[1].total, "-");
        assert_eq!(rows[2].position, "MC");
        assert_eq!(rows[2].thru, "CUT");
        assert_eq!(rows[2].today, "-");
    }

    #[test]
    fn leaderboard_without_competitors_is_still_loading() {
        let raw: LeaderboardResponse = serde_json::from_value(json!({ "events": [{ "competitions": [{}] }] })).unwrap();
        let board = map_leaderboard_in("1", raw, &Utc);
        assert!(board.players.is_none());
        assert_eq!(board.round_label, "Today");
    }

    #[test]
    fn scorecard_totals_relative_to_par() {
        let holes: Vec<serde_json::Value> = (1..=18)
            .map(|h| json!({ "period": h, "displayValue": "4", "par": if h <= 9 { 4 } else { 3 } }))
            .collect();
        let raw: CompetitorSummaryResponse = serde_json::from_value(json!({
            "rounds": [
                { "period": 1, "displayValue": "-3", "outScore": 33, "inScore": "36", "linescores": holes },
                { "period": 2, "displayValue": "E" },
                { "period": 3, "displayValue": "+1" }
            ]
        }))
        .unwrap();
        let card = map_scorecard("9478", raw);
        assert_eq!(card.total_to_par, "-2");
        assert_eq!(card.rounds[0].out_par, 36);
        assert_eq!(card.rounds[0].in_par, 27);
        assert_eq!(card.rounds[0].out_score, "33");
        assert_eq!(card.rounds[1].holes.len(), 0);
    }

    #[test]
    fn fight_cards_put_unsettled_bouts_first() {
        let raw: FightCenterResponse = serde_json::from_value(json!({
            "cards": {
                "main": {
                    "displayName": "Main Card",
                    "competitions": [
                        {
                            "id": "b1", "date": "2024-06-30T02:00Z",
                            "status": { "type": { "name": "STATUS_SCHEDULED" } },
                            "competitors": [
                                { "athlete": { "displayName": "Alex Pereira", "headshot": { "href": "p.png" } }, "displayRecord": "11-2-0" },
                                { "athlete": { "displayName": "Jiri Prochazka", "flag": { "href": "cz.png" } }, "displayRecord": "30-4-1" }
                            ]
                        },
                        { "id": "b3", "status": { "type": { "name": "STATUS_FINAL" } } },
                        { "id": "b4", "status": { "type": { "name": "STATUS_END_OF_FIGHT" } } },
                        { "id": "b5", "status": { "type": { "name": "STATUS_PRE_FIGHT" } } },
                        {
                            "id": "b2",
                            "status": { "period": 2, "displayClock": "3:12", "type": { "name": "STATUS_IN_PROGRESS" } },
                            "competitors": [{ "athlete": { "displayName": "Kayla Harrison" } }, {}]
                        }
                    ]
                },
                "prelims1": { "displayName": "Prelims", "competitions": [] }
            }
        }))
        .unwrap();

        let night = map_fightcenter("600041", raw);
        let cards = night.cards.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].key, "main");
        let order: Vec<&str> = cards[0].bouts.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(order, ["b4", "b5", "b2", "b1", "b3"]);
        assert_eq!(cards[0].bouts[2].status_line(), "Round 2 3:12");
        assert_eq!(cards[0].bouts[2].blue.name, "Unknown");
        assert_eq!(cards[0].bouts[3].blue.image, "cz.png");
        assert_eq!(cards[0].title_in(&Utc), "Main Card - 2:00 AM");
        assert_eq!(cards[1].name, "Prelims");
    }

    #[test]
    fn fight_night_without_cards_is_loading() {
        let night = map_fightcenter("1", FightCenterResponse::default());
        assert!(night.cards.is_none());
    }
}
