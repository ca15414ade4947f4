pub mod client;
pub mod dates;
pub mod espn;
pub mod excitement;
pub mod format;
pub mod league;
pub mod normalize;

pub use client::{ApiError, ApiResult, Endpoints, ScoresApi};
pub use dates::{CalendarDate, closest_date};
pub use league::{CalendarSource, DetailKind, League, Sport};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt::Display;

// ---------------------------------------------------------------------------
// Domain types: flat view models, independent of ESPN wire format
// ---------------------------------------------------------------------------

pub const UNKNOWN: &str = "Unknown";
pub const NO_SCORE: &str = "0";
pub const NO_TIME: &str = "TBD";
pub const NO_CLOCK: &str = "0:00";
pub const NO_VALUE: &str = "-";

/// Upstream lifecycle state (`status.type.name`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
    Halftime,
    EndPeriod,
    RainDelay,
    Postponed,
    Suspended,
    PlayComplete,
    FightersWalking,
    FightersIntroduction,
    EndOfRound,
    EndOfFight,
    PreFight,
    Unknown,
    Other(String),
}

impl EventStatus {
    pub fn parse(name: &str) -> Self {
        match name {
            "STATUS_SCHEDULED" => EventStatus::Scheduled,
            "STATUS_IN_PROGRESS" => EventStatus::InProgress,
            "STATUS_FINAL" => EventStatus::Final,
            "STATUS_HALFTIME" => EventStatus::Halftime,
            "STATUS_END_PERIOD" => EventStatus::EndPeriod,
            "STATUS_RAIN_DELAY" => EventStatus::RainDelay,
            "STATUS_POSTPONED" => EventStatus::Postponed,
            "STATUS_SUSPENDED" => EventStatus::Suspended,
            "STATUS_PLAY_COMPLETE" => EventStatus::PlayComplete,
            "STATUS_FIGHTERS_WALKING" => EventStatus::FightersWalking,
            "STATUS_FIGHTERS_INTRODUCTION" => EventStatus::FightersIntroduction,
            "STATUS_END_OF_ROUND" => EventStatus::EndOfRound,
            "STATUS_END_OF_FIGHT" => EventStatus::EndOfFight,
            "STATUS_PRE_FIGHT" => EventStatus::PreFight,
            "" | UNKNOWN => EventStatus::Unknown,
            other => EventStatus::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Scheduled => "STATUS_SCHEDULED",
            EventStatus::InProgress => "STATUS_IN_PROGRESS",
            EventStatus::Final => "STATUS_FINAL",
            EventStatus::Halftime => "STATUS_HALFTIME",
            EventStatus::EndPeriod => "STATUS_END_PERIOD",
            EventStatus::RainDelay => "STATUS_RAIN_DELAY",
            EventStatus::Postponed => "STATUS_POSTPONED",
            EventStatus::Suspended => "STATUS_SUSPENDED",
            EventStatus::PlayComplete => "STATUS_PLAY_COMPLETE",
            EventStatus::FightersWalking => "STATUS_FIGHTERS_WALKING",
            EventStatus::FightersIntroduction => "STATUS_FIGHTERS_INTRODUCTION",
            EventStatus::EndOfRound => "STATUS_END_OF_ROUND",
            EventStatus::EndOfFight => "STATUS_END_OF_FIGHT",
            EventStatus::PreFight => "STATUS_PRE_FIGHT",
            EventStatus::Unknown => UNKNOWN,
            EventStatus::Other(name) => name,
        }
    }

    /// Action is underway or only briefly paused.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            EventStatus::InProgress
                | EventStatus::Halftime
                | EventStatus::EndPeriod
                | EventStatus::FightersWalking
                | EventStatus::FightersIntroduction
                | EventStatus::EndOfRound
        )
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, EventStatus::Scheduled | EventStatus::PreFight)
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, EventStatus::Postponed | EventStatus::Suspended)
    }
}

impl Serialize for EventStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One date's worth of events for a league.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    pub date: String,
    pub events: Vec<GameView>,
    /// `season.slug` of the first event, e.g. "regular-season".
    pub season_slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameView {
    pub id: String,
    pub name: String,
    pub home: CompetitorView,
    pub away: CompetitorView,
    pub status: EventStatus,
    pub status_detail: String,
    /// Raw ISO start time or `TBD`.
    pub start_time: String,
    pub is_playoff: bool,
    pub situation: Situation,
}

impl GameView {
    pub fn start(&self) -> Option<DateTime<Utc>> {
        format::parse_start(&self.start_time)
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// The short status column: start time, final, clock, inning...
    pub fn status_line_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match (&self.status, &self.situation) {
            (EventStatus::Scheduled, _) => self
                .start()
                .map(|start| format::game_time_in(&start, tz))
                .unwrap_or_else(|| NO_TIME.to_owned()),
            (EventStatus::Final, _) => self.status_detail.clone(),
            (EventStatus::Halftime, _) => "Half".to_owned(),
            (EventStatus::EndPeriod, situation) => format!("End {}", situation.period()),
            (EventStatus::RainDelay, _) => "Rain Delay".to_owned(),
            (EventStatus::Postponed, _) => "Postponed".to_owned(),
            (EventStatus::Suspended, _) => "Suspended".to_owned(),
            (_, Situation::Baseball { inning, half, outs, .. }) => {
                let mut line = match half {
                    Some(half) => format!("{} {inning}", half.label()),
                    None => self.status_detail.clone(),
                };
                if let Some(outs) = outs {
                    line.push_str(&format!(", {outs} Outs"));
                }
                line
            }
            (_, Situation::Period { period, clock }) => {
                format!("{} {clock}", format::ordinal(*period))
            }
            _ => self.status_detail.clone(),
        }
    }

    pub fn status_line(&self) -> String {
        self.status_line_in(&chrono::Local)
    }

    /// Numeric scores for both sides, when upstream sent numbers.
    pub fn scores(&self) -> Option<(u32, u32)> {
        let home = self.home.score.trim().parse().ok()?;
        let away = self.away.score.trim().parse().ok()?;
        Some((home, away))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetitorView {
    pub id: String,
    pub name: String,
    pub abbrev: String,
    /// Team logo or athlete headshot URI, empty when upstream has none.
    pub logo: String,
    pub score: String,
    /// Season record, or playoff series tally as "wins-losses".
    pub record: String,
    pub series_wins: Option<u32>,
    pub winner: Option<bool>,
}

impl CompetitorView {
    /// Record before the event starts, score after.
    pub fn headline(&self, status: &EventStatus) -> &str {
        if status.is_scheduled() { &self.record } else { &self.score }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Situation {
    #[default]
    None,
    Period {
        period: u32,
        clock: String,
    },
    Baseball {
        inning: u32,
        half: Option<InningHalf>,
        outs: Option<u8>,
        bases: Bases,
    },
    Golf {
        round: u32,
    },
    Fight {
        round: u32,
        clock: String,
        bouts: usize,
    },
}

impl Situation {
    pub fn period(&self) -> u32 {
        match self {
            Situation::None => 0,
            Situation::Period { period, .. } => *period,
            Situation::Baseball { inning, .. } => *inning,
            Situation::Golf { round } => *round,
            Situation::Fight { round, .. } => *round,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InningHalf {
    Top,
    Middle,
    Bottom,
    End,
}

impl InningHalf {
    /// Read the half from a status detail such as "Bot 7th" or "Mid 3rd".
    pub fn from_detail(detail: &str) -> Option<Self> {
        if detail.contains("Top") {
            Some(InningHalf::Top)
        } else if detail.contains("Mid") {
            Some(InningHalf::Middle)
        } else if detail.contains("Bot") {
            Some(InningHalf::Bottom)
        } else if detail.contains("End") {
            Some(InningHalf::End)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InningHalf::Top => "Top",
            InningHalf::Middle => "Mid",
            InningHalf::Bottom => "Bot",
            InningHalf::End => "End",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bases {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl Bases {
    pub fn occupied(&self) -> usize {
        [self.first, self.second, self.third].iter().filter(|b| **b).count()
    }
}

// ---------------------------------------------------------------------------
// Drill-down detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    Game(GameDetail),
    Leaderboard(Leaderboard),
    FightNight(FightNight),
}

impl EventDetail {
    pub fn event_id(&self) -> &str {
        match self {
            EventDetail::Game(d) => &d.event_id,
            EventDetail::Leaderboard(d) => &d.event_id,
            EventDetail::FightNight(d) => &d.event_id,
        }
    }

    /// Still waiting on sections upstream has not published yet.
    pub fn is_loading(&self) -> bool {
        match self {
            EventDetail::Game(d) => d.is_loading(),
            EventDetail::Leaderboard(d) => d.players.is_none(),
            EventDetail::FightNight(d) => d.cards.is_none(),
        }
    }
}

/// Play-by-play and box score for one team-sport game. Every section is
/// optional: a missing section means "not published yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameDetail {
    pub event_id: String,
    pub header: Option<GameView>,
    pub plays: Option<Vec<Play>>,
    pub boxscore: Option<Vec<TeamBox>>,
    pub situation: Option<LiveSituation>,
    /// "Top", "Bot", "Quarter"...
    pub period_prefix: Option<String>,
}

impl GameDetail {
    pub fn is_loading(&self) -> bool {
        self.header.is_none() || self.plays.is_none() || self.boxscore.is_none()
    }

    /// Plays newest first, with upstream's "Strike Foul" wording cleaned up.
    pub fn feed(&self) -> Vec<Play> {
        let mut plays: Vec<Play> = self
            .plays
            .iter()
            .flatten()
            .cloned()
            .map(|mut play| {
                if play.text.contains("Strike Foul") {
                    play.text = "Foul ball".to_owned();
                }
                play
            })
            .collect();
        plays.reverse();
        plays
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Play {
    pub id: String,
    /// At-bat id for baseball, sequence number elsewhere.
    pub sequence_id: String,
    pub period: u32,
    pub period_label: String,
    pub clock: String,
    pub text: String,
    pub scoring: bool,
    pub home_score: u16,
    pub away_score: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamBox {
    pub team: String,
    pub abbrev: String,
    pub labels: Vec<String>,
    pub athletes: Vec<AthleteLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AthleteLine {
    pub id: String,
    pub name: String,
    pub position: String,
    pub headshot: String,
    pub stats: Vec<String>,
}

impl AthleteLine {
    /// Pair each stat with its column label; extra stats get an empty label.
    pub fn labelled<'a>(&'a self, labels: &'a [String]) -> Vec<(&'a str, &'a str)> {
        self.stats
            .iter()
            .enumerate()
            .map(|(i, stat)| (labels.get(i).map(String::as_str).unwrap_or(""), stat.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LiveSituation {
    pub bases: Bases,
    pub outs: Option<u8>,
    pub balls: Option<u8>,
    pub strikes: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leaderboard {
    pub event_id: String,
    pub tournament: String,
    pub status: EventStatus,
    /// `R3`, or `Today` before a round number exists.
    pub round_label: String,
    pub players: Option<Vec<LeaderboardRow>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub id: String,
    pub position: String,
    pub name: String,
    pub today: String,
    pub thru: String,
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scorecard {
    pub player_id: String,
    pub rounds: Vec<RoundCard>,
    pub total_to_par: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoundCard {
    pub number: u32,
    pub score: String,
    pub out_score: String,
    pub in_score: String,
    pub out_par: u32,
    pub in_par: u32,
    pub holes: Vec<Hole>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hole {
    pub number: u32,
    pub score: String,
    pub par: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FightNight {
    pub event_id: String,
    pub cards: Option<Vec<FightCard>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FightCard {
    pub key: String,
    pub name: String,
    /// Raw start of the first bout, `TBD` when unknown.
    pub start_time: String,
    /// The card's opening bout is final.
    pub finished: bool,
    /// Live bouts first, then scheduled and final ones.
    pub bouts: Vec<Bout>,
}

impl FightCard {
    /// `Main Card - 10:00 PM`; the time is dropped once the card is over.
    pub fn title_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match format::parse_start(&self.start_time) {
            Some(start) if !self.finished => {
                format!("{} - {}", self.name, format::game_time_in(&start, tz))
            }
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bout {
    pub id: String,
    pub status: EventStatus,
    pub round: u32,
    pub clock: String,
    pub red: Fighter,
    pub blue: Fighter,
    pub result: Option<BoutResult>,
}

impl Bout {
    pub fn status_line(&self) -> String {
        let result = || {
            self.result
                .as_ref()
                .map(|r| format!("{} {}", r.short, r.description).trim().to_owned())
                .unwrap_or_default()
        };
        match &self.status {
            EventStatus::InProgress => format!("Round {} {}", self.round, self.clock),
            EventStatus::EndOfRound => format!("End Round {}", self.round),
            EventStatus::EndOfFight => format!("Final {}", result()).trim().to_owned(),
            EventStatus::Final => result(),
            EventStatus::FightersWalking => "Walkouts".to_owned(),
            EventStatus::FightersIntroduction => "Intros".to_owned(),
            _ => "vs".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fighter {
    pub name: String,
    pub record: String,
    /// Headshot, falling back to the country flag.
    pub image: String,
    pub winner: bool,
}

impl Fighter {
    /// Record before the bout, W/L after it.
    pub fn headline(&self, status: &EventStatus) -> &str {
        match status {
            s if s.is_scheduled() => &self.record,
            EventStatus::Final | EventStatus::EndOfFight => {
                if self.winner { "W" } else { "L" }
            }
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoutResult {
    pub short: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(status: EventStatus, situation: Situation) -> GameView {
        GameView {
            id: "1".into(),
            status,
            status_detail: "Final/OT".into(),
            start_time: "2024-06-01T23:05Z".into(),
            situation,
            ..Default::default()
        }
    }

    #[test]
    fn status_names_round_trip() {
        for name in [
            "STATUS_SCHEDULED",
            "STATUS_IN_PROGRESS",
            "STATUS_FINAL",
            "STATUS_HALFTIME",
            "STATUS_END_PERIOD",
            "STATUS_RAIN_DELAY",
            "STATUS_POSTPONED",
            "STATUS_SUSPENDED",
            "STATUS_FIGHTERS_WALKING",
            "STATUS_FIGHTERS_INTRODUCTION",
            "STATUS_END_OF_ROUND",
            "STATUS_END_OF_FIGHT",
            "STATUS_PRE_FIGHT",
            "STATUS_DELAYED",
        ] {
            assert_eq!(EventStatus::parse(name).as_str(), name);
        }
        assert_eq!(EventStatus::parse(""), EventStatus::Unknown);
    }

    #[test]
    fn status_line_branches() {
        let period = Situation::Period { period: 3, clock: "4:12".into() };
        assert_eq!(game(EventStatus::Scheduled, Situation::None).status_line_in(&Utc), "11:05 PM");
        assert_eq!(game(EventStatus::Final, Situation::None).status_line_in(&Utc), "Final/OT");
        assert_eq!(game(EventStatus::Halftime, period.clone()).status_line_in(&Utc), "Half");
        assert_eq!(game(EventStatus::EndPeriod, period.clone()).status_line_in(&Utc), "End 3");
        assert_eq!(game(EventStatus::InProgress, period).status_line_in(&Utc), "3rd 4:12");
        assert_eq!(game(EventStatus::RainDelay, Situation::None).status_line_in(&Utc), "Rain Delay");
        assert_eq!(game(EventStatus::Postponed, Situation::None).status_line_in(&Utc), "Postponed");
    }

    #[test]
    fn baseball_status_line_shows_half_and_outs() {
        let situation = Situation::Baseball {
            inning: 7,
            half: Some(InningHalf::Bottom),
            outs: Some(2),
            bases: Bases { first: true, ..Default::default() },
        };
        assert_eq!(game(EventStatus::InProgress, situation).status_line_in(&Utc), "Bot 7, 2 Outs");
    }

    #[test]
    fn headline_switches_from_record_to_score() {
        let side = CompetitorView { score: "4".into(), record: "30-21".into(), ..Default::default() };
        assert_eq!(side.headline(&EventStatus::Scheduled), "30-21");
        assert_eq!(side.headline(&EventStatus::InProgress), "4");
    }

    #[test]
    fn feed_is_newest_first_with_foul_rewrite() {
        let detail = GameDetail {
            plays: Some(vec![
                Play { text: "Strike Foul".into(), ..Default::default() },
                Play { text: "Judge homers to left".into(), scoring: true, ..Default::default() },
            ]),
            ..Default::default()
        };
        let feed = detail.feed();
        assert_eq!(feed[0].text, "Judge homers to left");
        assert_eq!(feed[1].text, "Foul ball");
    }

    #[test]
    fn fighter_headline_by_status() {
        let f = Fighter { record: "22-3-0".into(), winner: true, ..Default::default() };
        assert_eq!(f.headline(&EventStatus::PreFight), "22-3-0");
        assert_eq!(f.headline(&EventStatus::Final), "W");
        assert_eq!(f.headline(&EventStatus::InProgress), "");
    }
}
