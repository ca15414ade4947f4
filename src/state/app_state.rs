use crate::state::messages::FetchKind;
use scoreline_api::dates::today_key;
use scoreline_api::{CalendarDate, DetailKind, EventDetail, GameView, League, Scorecard};

// ---------------------------------------------------------------------------
// Response generations
// ---------------------------------------------------------------------------

/// Request numbering for one fetch kind. A response is applied only when it
/// is newer than the last applied one and not older than `floor`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    issued: u64,
    applied: u64,
    floor: u64,
}

impl Generation {
    /// Number the next outgoing request.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Record `generation` as applied if it is still current.
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation <= self.applied || generation < self.floor {
            return false;
        }
        self.applied = generation;
        true
    }

    /// Everything issued so far becomes stale.
    pub fn bump_floor(&mut self) {
        self.floor = self.issued + 1;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation > self.applied && generation >= self.floor
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Generations {
    pub dates: Generation,
    pub events: Generation,
    pub detail: Generation,
    pub scorecard: Generation,
}

impl Generations {
    pub fn get_mut(&mut self, kind: FetchKind) -> &mut Generation {
        match kind {
            FetchKind::Dates => &mut self.dates,
            FetchKind::Events => &mut self.events,
            FetchKind::Detail => &mut self.detail,
            FetchKind::Scorecard => &mut self.scorecard,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub league: League,
    pub selected_date: String,
    /// Set once the user picked a date; the calendar no longer moves it.
    pub date_pinned: bool,
    pub calendar: Vec<CalendarDate>,
    /// Position of `selected_date` in `calendar`.
    pub date_index: Option<usize>,
    pub events: Vec<GameView>,
    pub season_slug: Option<String>,
    pub selected_event: Option<String>,
    pub detail: Option<EventDetail>,
    /// Golfer whose scorecard follows the leaderboard in view.
    pub selected_player: Option<String>,
    pub scorecard: Option<Scorecard>,
    pub refreshing: bool,
    /// A calendar request is outstanding.
    pub resolving_dates: bool,
    /// Message from the most recent failed fetch, cleared by the next success.
    pub last_error: Option<String>,
    pub generations: Generations,
}

impl AppState {
    pub fn new(league: League) -> Self {
        Self {
            league,
            selected_date: today_key(),
            date_pinned: false,
            calendar: Vec::new(),
            date_index: None,
            events: Vec::new(),
            season_slug: None,
            selected_event: None,
            detail: None,
            selected_player: None,
            scorecard: None,
            refreshing: false,
            resolving_dates: false,
            last_error: None,
            generations: Generations::default(),
        }
    }

    pub fn set_date(&mut self, key: String) {
        self.date_index = self.calendar.iter().position(|d| d.key() == key);
        self.selected_date = key;
    }

    /// Which event's detail the next tick should fetch. Card leagues fall
    /// back to the first event of the day.
    pub fn detail_target(&self) -> Option<String> {
        if let Some(id) = &self.selected_event {
            return Some(id.clone());
        }
        if self.league.detail.auto_loads() {
            return self.events.first().map(|e| e.id.clone()).filter(|id| !id.is_empty());
        }
        None
    }

    /// Event and player for the scorecard fetch, golf leagues only.
    pub fn scorecard_target(&self) -> Option<(String, String)> {
        if self.league.detail != DetailKind::Leaderboard {
            return None;
        }
        Some((self.detail_target()?, self.selected_player.clone()?))
    }

    pub fn selected_calendar_date(&self) -> Option<CalendarDate> {
        self.date_index.and_then(|i| self.calendar.get(i)).copied()
    }
}
