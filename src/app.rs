use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::{FetchKind, NetworkRequest, NetworkResponse};
use log::{debug, error, info, warn};
use scoreline_api::dates::today;
use scoreline_api::{CalendarDate, DetailKind, EventDetail, Scoreboard, Scorecard, closest_date};

/// What the main loop should print after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Scoreboard,
    Detail,
    Scorecard,
    Calendar,
}

/// Requests to send and the view to print, produced by every handler.
#[derive(Debug, Default, PartialEq)]
pub struct Effects {
    pub requests: Vec<NetworkRequest>,
    pub render: Option<View>,
}

impl Effects {
    fn render(view: View) -> Self {
        Self { requests: Vec::new(), render: Some(view) }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let mut state = AppState::new(settings.league);
        if let Some(date) = &settings.date {
            state.set_date(date.clone());
            state.date_pinned = true;
        }
        state.selected_event = settings.event.clone();
        Self { settings, state }
    }

    // -----------------------------------------------------------------------
    // Outgoing requests
    // -----------------------------------------------------------------------

    fn request_dates(&mut self) -> NetworkRequest {
        self.state.resolving_dates = true;
        NetworkRequest::ResolveDates { generation: self.state.generations.dates.begin() }
    }

    fn request_events(&mut self) -> NetworkRequest {
        NetworkRequest::FetchEvents {
            date: self.state.selected_date.clone(),
            generation: self.state.generations.events.begin(),
        }
    }

    fn request_detail(&mut self, event_id: String) -> NetworkRequest {
        NetworkRequest::FetchDetail { event_id, generation: self.state.generations.detail.begin() }
    }

    fn request_scorecard(&mut self, event_id: String, player_id: String) -> NetworkRequest {
        NetworkRequest::FetchScorecard {
            event_id,
            player_id,
            generation: self.state.generations.scorecard.begin(),
        }
    }

    /// Scoreboard plus whatever detail is in view.
    fn poll_requests(&mut self) -> Vec<NetworkRequest> {
        let mut requests = vec![self.request_events()];
        if let Some(event_id) = self.state.detail_target() {
            requests.push(self.request_detail(event_id));
        }
        if let Some((event_id, player_id)) = self.state.scorecard_target() {
            requests.push(self.request_scorecard(event_id, player_id));
        }
        requests
    }

    fn drop_scorecard(&mut self) {
        self.state.selected_player = None;
        self.state.scorecard = None;
        self.state.generations.scorecard.bump_floor();
    }

    // -----------------------------------------------------------------------
    // UI events
    // -----------------------------------------------------------------------

    /// Resolve the calendar once; ticks take care of the rest.
    pub fn on_started(&mut self) -> Effects {
        info!(
            "watching {} from {}{}",
            self.state.league,
            self.state.selected_date,
            if self.state.date_pinned { " (pinned)" } else { "" }
        );
        Effects { requests: vec![self.request_dates()], render: None }
    }

    /// Poll the scoreboard. Until a calendar arrives every tick also asks
    /// for one again.
    pub fn on_tick(&mut self) -> Effects {
        let mut requests = Vec::new();
        if self.state.calendar.is_empty() && !self.state.resolving_dates {
            requests.push(self.request_dates());
        }
        requests.extend(self.poll_requests());
        Effects { requests, render: None }
    }

    /// Manual refresh. Ignored while a previous one is still outstanding.
    pub fn refresh(&mut self) -> Effects {
        if self.state.refreshing {
            debug!("refresh already in progress");
            return Effects::default();
        }
        self.state.refreshing = true;
        self.on_tick()
    }

    pub fn select_date(&mut self, key: &str) -> Effects {
        let Some(date) = CalendarDate::from_key(key) else {
            warn!("{key:?} is not a valid YYYYMMDD date");
            return Effects::default();
        };
        self.state.date_pinned = true;
        self.change_date(date.key())
    }

    fn change_date(&mut self, key: String) -> Effects {
        if key == self.state.selected_date {
            return Effects::default();
        }
        debug!("date {} -> {key}", self.state.selected_date);
        self.state.set_date(key);
        self.state.events.clear();
        self.state.selected_event = None;
        self.state.detail = None;
        self.drop_scorecard();
        self.state.generations.events.bump_floor();
        self.state.generations.detail.bump_floor();
        Effects { requests: vec![self.request_events()], render: None }
    }

    pub fn select_event(&mut self, event_id: &str) -> Effects {
        self.state.selected_event = Some(event_id.to_owned());
        self.state.detail = None;
        self.drop_scorecard();
        self.state.generations.detail.bump_floor();
        Effects { requests: vec![self.request_detail(event_id.to_owned())], render: None }
    }

    /// Follow one golfer's scorecard for the tournament in view.
    pub fn select_player(&mut self, player_id: &str) -> Effects {
        if self.state.league.detail != DetailKind::Leaderboard {
            warn!("{} has no scorecards", self.state.league.name);
            return Effects::default();
        }
        self.drop_scorecard();
        self.state.selected_player = Some(player_id.to_owned());
        match self.state.scorecard_target() {
            Some((event_id, player_id)) => {
                Effects { requests: vec![self.request_scorecard(event_id, player_id)], render: None }
            }
            None => {
                debug!("no tournament in view yet, scorecard waits for the next tick");
                Effects::default()
            }
        }
    }

    pub fn clear_detail(&mut self) -> Effects {
        self.state.selected_event = None;
        self.state.detail = None;
        self.drop_scorecard();
        self.state.generations.detail.bump_floor();
        Effects::default()
    }

    pub fn list_calendar(&self) -> Effects {
        Effects::render(View::Calendar)
    }

    // -----------------------------------------------------------------------
    // Network responses
    // -----------------------------------------------------------------------

    pub fn on_network_response(&mut self, response: NetworkResponse) -> Effects {
        match response {
            NetworkResponse::DatesResolved { dates, generation } => self.on_dates_resolved(dates, generation),
            NetworkResponse::EventsLoaded { scoreboard, generation } => {
                self.on_events_loaded(scoreboard, generation)
            }
            NetworkResponse::DetailLoaded { detail, generation } => self.on_detail_loaded(detail, generation),
            NetworkResponse::ScorecardLoaded { scorecard, generation } => {
                self.on_scorecard_loaded(scorecard, generation)
            }
            NetworkResponse::Error { kind, generation, message } => self.on_error(kind, generation, message),
        }
    }

    fn on_dates_resolved(&mut self, dates: Vec<CalendarDate>, generation: u64) -> Effects {
        self.state.resolving_dates = false;
        if !self.state.generations.dates.accept(generation) {
            debug!("dropping stale calendar #{generation}");
            return Effects::default();
        }
        self.state.calendar = dates;
        let current = self.state.selected_date.clone();
        self.state.set_date(current);

        if self.state.date_pinned {
            return Effects::default();
        }
        match closest_date(&self.state.calendar, today()) {
            Some(date) => {
                info!("closest {} date is {}", self.state.league.code, date.format_short());
                self.change_date(date.key())
            }
            None => {
                debug!("empty calendar, keeping {}", self.state.selected_date);
                Effects::default()
            }
        }
    }

    fn on_events_loaded(&mut self, scoreboard: Option<Scoreboard>, generation: u64) -> Effects {
        if !self.state.generations.events.accept(generation) {
            debug!("dropping stale scoreboard #{generation}");
            return Effects::default();
        }
        self.state.refreshing = false;
        let Some(scoreboard) = scoreboard else {
            return Effects::default();
        };
        if scoreboard.date != self.state.selected_date {
            debug!("dropping scoreboard for {} while showing {}", scoreboard.date, self.state.selected_date);
            return Effects::default();
        }

        self.state.last_error = None;
        let previous_target = self.state.detail_target();
        self.state.events = scoreboard.events;
        if scoreboard.season_slug.is_some() {
            self.state.season_slug = scoreboard.season_slug;
        }

        // First scoreboard for a card league: pull its detail right away
        // rather than waiting for the next tick.
        let mut requests = Vec::new();
        let target = self.state.detail_target();
        let have_detail = self.state.detail.as_ref().map(EventDetail::event_id) == target.as_deref();
        if let Some(event_id) = target
            && (previous_target.as_deref() != Some(event_id.as_str()) || !have_detail)
            && self.state.selected_event.is_none()
        {
            requests.push(self.request_detail(event_id));
        }
        Effects { requests, render: Some(View::Scoreboard) }
    }

    fn on_detail_loaded(&mut self, detail: EventDetail, generation: u64) -> Effects {
        if !self.state.generations.detail.accept(generation) {
            debug!("dropping stale detail #{generation}");
            return Effects::default();
        }
        if self.state.detail_target().as_deref() != Some(detail.event_id()) {
            debug!("dropping detail for {} which is no longer in view", detail.event_id());
            return Effects::default();
        }
        self.state.last_error = None;
        self.state.detail = Some(detail);
        Effects::render(View::Detail)
    }

    fn on_scorecard_loaded(&mut self, scorecard: Scorecard, generation: u64) -> Effects {
        if !self.state.generations.scorecard.accept(generation) {
            debug!("dropping stale scorecard #{generation}");
            return Effects::default();
        }
        if self.state.selected_player.as_deref() != Some(scorecard.player_id.as_str()) {
            debug!("dropping scorecard for {} which is no longer in view", scorecard.player_id);
            return Effects::default();
        }
        self.state.last_error = None;
        self.state.scorecard = Some(scorecard);
        Effects::render(View::Scorecard)
    }

    fn on_error(&mut self, kind: FetchKind, generation: u64, message: String) -> Effects {
        if kind == FetchKind::Dates {
            self.state.resolving_dates = false;
        }
        if !self.state.generations.get_mut(kind).is_current(generation) {
            debug!("ignoring error from stale {kind} request #{generation}: {message}");
            return Effects::default();
        }
        if kind == FetchKind::Events {
            self.state.refreshing = false;
        }
        error!("{kind} fetch failed: {message}");
        self.state.last_error = Some(message);
        Effects::default()
    }
}
