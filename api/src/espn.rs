//! ESPN API raw wire types: serde shapes for deserializing ESPN responses.
//! Everything is optional; ESPN omits sections freely depending on sport and
//! event state. The `normalize` module maps these into the flat view models.

use serde::Deserialize;

/// ESPN mixes strings and numbers for the same field across sports
/// (scores, thru, period).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum EspnValue {
    Text(String),
    Int(i64),
    Float(f64),
    Object {
        #[serde(rename = "displayValue")]
        display_value: Option<String>,
        value: Option<f64>,
    },
}

impl EspnValue {
    pub fn display(&self) -> Option<String> {
        match self {
            EspnValue::Text(s) => Some(s.clone()),
            EspnValue::Int(n) => Some(n.to_string()),
            EspnValue::Float(f) if f.fract() == 0.0 => Some(format!("{f:.0}")),
            EspnValue::Float(f) => Some(f.to_string()),
            EspnValue::Object { display_value, value } => display_value
                .clone()
                .or_else(|| value.map(|v| EspnValue::Float(v).display().unwrap_or_default())),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EspnValue::Text(s) => s.trim().parse().ok(),
            EspnValue::Int(n) => Some(*n),
            EspnValue::Float(f) => Some(*f as i64),
            EspnValue::Object { value, display_value } => value
                .map(|v| v as i64)
                .or_else(|| display_value.as_deref().and_then(|s| s.trim().parse().ok())),
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar  (core v2 whitelist + scoreboard league calendar)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WhitelistResponse {
    #[serde(rename = "eventDate")]
    pub event_date: Option<EspnEventDate>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEventDate {
    pub dates: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLeague {
    pub calendar: Option<Vec<EspnCalendarEntry>>,
}

/// Some leagues list bare date strings, others full entries with labels.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnCalendarEntry {
    Date(String),
    Entry {
        id: Option<String>,
        label: Option<String>,
        #[serde(rename = "startDate")]
        start_date: Option<String>,
        #[serde(rename = "endDate")]
        end_date: Option<String>,
        date: Option<String>,
    },
}

impl EspnCalendarEntry {
    pub fn date_str(&self) -> Option<&str> {
        match self {
            EspnCalendarEntry::Date(s) => Some(s),
            EspnCalendarEntry::Entry { date, start_date, .. } => {
                date.as_deref().or(start_date.as_deref())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
    pub leagues: Option<Vec<EspnLeague>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub season: Option<EspnSeason>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnSeason {
    pub year: Option<i32>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<EspnValue>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    #[serde(rename = "periodPrefix")]
    pub period_prefix: Option<String>,
    pub result: Option<EspnResult>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnResult {
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub date: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub series: Option<EspnSeries>,
    pub situation: Option<EspnSituation>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnSeries {
    #[serde(rename = "type")]
    pub series_type: Option<String>, // "playoff"
    pub summary: Option<String>,
    pub competitors: Option<Vec<EspnSeriesCompetitor>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnSeriesCompetitor {
    pub id: Option<String>,
    pub wins: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnSituation {
    #[serde(rename = "onFirst")]
    pub on_first: Option<bool>,
    #[serde(rename = "onSecond")]
    pub on_second: Option<bool>,
    #[serde(rename = "onThird")]
    pub on_third: Option<bool>,
    pub outs: Option<u8>,
    pub balls: Option<u8>,
    pub strikes: Option<u8>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub athlete: Option<EspnAthlete>,
    pub score: Option<EspnValue>,
    pub winner: Option<bool>,
    pub records: Option<Vec<EspnRecord>>,
    #[serde(rename = "displayRecord")]
    pub display_record: Option<String>, // MMA fighters
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub logos: Option<Vec<EspnImage>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnImage {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnAthlete {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub headshot: Option<EspnImage>,
    pub flag: Option<EspnImage>,
    pub position: Option<EspnPosition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnPosition {
    pub abbreviation: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub header: Option<EspnHeader>,
    pub plays: Option<Vec<EspnPlay>>,
    pub boxscore: Option<EspnBoxscore>,
    pub situation: Option<EspnSituation>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnHeader {
    pub id: Option<String>,
    pub competitions: Option<Vec<EspnCompetition>>,
    pub season: Option<EspnSeason>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnPlay {
    pub id: Option<String>,
    #[serde(rename = "sequenceNumber")]
    pub sequence_number: Option<String>,
    #[serde(rename = "atBatId")]
    pub at_bat_id: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "scoringPlay")]
    pub scoring_play: Option<bool>,
    pub period: Option<EspnPeriod>,
    pub clock: Option<EspnClock>,
    #[serde(rename = "homeScore")]
    pub home_score: Option<u16>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnPeriod {
    pub number: Option<u32>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnClock {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    pub players: Option<Vec<EspnTeamPlayers>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeamPlayers {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStatCategory>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatCategory {
    pub name: Option<String>,
    pub athletes: Option<Vec<EspnAthleteStats>>,
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAthleteStats {
    pub athlete: Option<EspnAthlete>,
    pub stats: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Golf leaderboard  (site.web v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeaderboardResponse {
    pub events: Option<Vec<EspnGolfEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnGolfEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tournament: Option<EspnTournament>,
    pub competitions: Option<Vec<EspnGolfCompetition>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTournament {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnGolfCompetition {
    pub status: Option<EspnStatus>,
    pub competitors: Option<Vec<EspnGolfer>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnGolfer {
    pub id: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<i64>,
    pub amateur: Option<bool>,
    pub athlete: Option<EspnAthlete>,
    pub status: Option<EspnGolferStatus>,
    pub linescores: Option<Vec<EspnLinescore>>,
    pub statistics: Option<Vec<EspnLinescore>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnGolferStatus {
    pub period: Option<u32>,
    pub thru: Option<EspnValue>,
    pub position: Option<EspnGolfPosition>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>, // "CUT" for missed cuts
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    #[serde(rename = "startHole")]
    pub start_hole: Option<u32>,
    #[serde(rename = "teeTime")]
    pub tee_time: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnGolfPosition {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnLinescore {
    pub period: Option<u32>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    pub value: Option<f64>,
    pub par: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CompetitorSummaryResponse {
    pub rounds: Option<Vec<EspnGolfRound>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnGolfRound {
    pub period: Option<u32>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    #[serde(rename = "outScore")]
    pub out_score: Option<EspnValue>,
    #[serde(rename = "inScore")]
    pub in_score: Option<EspnValue>,
    pub linescores: Option<Vec<EspnLinescore>>,
}

// ---------------------------------------------------------------------------
// Fight center  (site.web common v3 API)
// ---------------------------------------------------------------------------

/// `cards` is an object keyed by segment ("main", "prelims1", ...). It is kept
/// as a raw map so upstream key order survives.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FightCenterResponse {
    pub cards: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnFightCard {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub competitions: Option<Vec<EspnCompetition>>,
}
