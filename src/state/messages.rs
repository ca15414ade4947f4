use scoreline_api::{CalendarDate, EventDetail, Scoreboard, Scorecard};
use std::fmt;

/// The independently versioned fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Dates,
    Events,
    Detail,
    Scorecard,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchKind::Dates => "dates",
            FetchKind::Events => "events",
            FetchKind::Detail => "detail",
            FetchKind::Scorecard => "scorecard",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkRequest {
    ResolveDates { generation: u64 },
    FetchEvents { date: String, generation: u64 },
    FetchDetail { event_id: String, generation: u64 },
    FetchScorecard { event_id: String, player_id: String, generation: u64 },
}

impl NetworkRequest {
    pub fn kind(&self) -> FetchKind {
        match self {
            NetworkRequest::ResolveDates { .. } => FetchKind::Dates,
            NetworkRequest::FetchEvents { .. } => FetchKind::Events,
            NetworkRequest::FetchDetail { .. } => FetchKind::Detail,
            NetworkRequest::FetchScorecard { .. } => FetchKind::Scorecard,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            NetworkRequest::ResolveDates { generation }
            | NetworkRequest::FetchEvents { generation, .. }
            | NetworkRequest::FetchDetail { generation, .. }
            | NetworkRequest::FetchScorecard { generation, .. } => *generation,
        }
    }
}

#[derive(Debug)]
pub enum NetworkResponse {
    DatesResolved { dates: Vec<CalendarDate>, generation: u64 },
    /// `None` when the requested date was not a valid key.
    EventsLoaded { scoreboard: Option<Scoreboard>, generation: u64 },
    DetailLoaded { detail: EventDetail, generation: u64 },
    ScorecardLoaded { scorecard: Scorecard, generation: u64 },
    Error { kind: FetchKind, generation: u64, message: String },
}

/// A line typed on stdin while the watcher runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    SelectDate(String),
    SelectEvent(String),
    /// Golf only: one player's scorecard for the event in view.
    SelectPlayer(String),
    ClearDetail,
    ListCalendar,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err("empty command".into());
        };
        let arg = parts.next();

        match (verb, arg) {
            ("r", None) => Ok(Command::Refresh),
            ("x", None) => Ok(Command::ClearDetail),
            ("l", None) => Ok(Command::ListCalendar),
            ("q", None) => Ok(Command::Quit),
            ("d", Some(date)) => Ok(Command::SelectDate(date.to_owned())),
            ("e", Some(id)) => Ok(Command::SelectEvent(id.to_owned())),
            ("s", Some(id)) => Ok(Command::SelectPlayer(id.to_owned())),
            ("d", None) => Err("usage: d YYYYMMDD".into()),
            ("e", None) => Err("usage: e EVENT_ID".into()),
            ("s", None) => Err("usage: s PLAYER_ID".into()),
            _ => Err(format!("unknown command {line:?} (r, d DATE, e ID, s PLAYER, x, l, q)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Started,
    PollTick,
    Command(Command),
}
