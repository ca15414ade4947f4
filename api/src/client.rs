use crate::dates::is_date_key;
use crate::espn::{
    CompetitorSummaryResponse, FightCenterResponse, LeaderboardResponse, ScoreboardResponse,
    SummaryResponse, WhitelistResponse,
};
use crate::normalize;
use crate::{CalendarDate, CalendarSource, DetailKind, EventDetail, League, Scoreboard, Scorecard};
use log::debug;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE: &str = "https://site.api.espn.com/apis/site/v2/sports";
const ESPN_CORE: &str = "https://sports.core.api.espn.com/v2/sports";
const ESPN_WEB_SITE: &str = "https://site.web.api.espn.com/apis/site/v2/sports";
const ESPN_WEB_COMMON: &str = "https://site.web.api.espn.com/apis/common/v3/sports";

/// Base URLs for the four ESPN endpoint families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub site: String,
    pub core: String,
    pub web_site: String,
    pub web_common: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            site: ESPN_SITE.to_owned(),
            core: ESPN_CORE.to_owned(),
            web_site: ESPN_WEB_SITE.to_owned(),
            web_common: ESPN_WEB_COMMON.to_owned(),
        }
    }
}

impl Endpoints {
    /// Point every family at the same host, e.g. a local mock server.
    pub fn all(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            site: format!("{base}/site"),
            core: format!("{base}/core"),
            web_site: format!("{base}/web/site"),
            web_common: format!("{base}/web/common"),
        }
    }
}

/// Scores client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct ScoresApi {
    client: Client,
    timeout: Duration,
    endpoints: Endpoints,
}

impl Default for ScoresApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("scoreline/", env!("CARGO_PKG_VERSION"), " (terminal scores watcher)"))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            endpoints: Endpoints::default(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    MissingField(&'static str),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::MissingField(field) => write!(f, "Response is missing `{field}`"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl ScoresApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            ..Self::default()
        }
    }

    /// Every date the league has events on, in upstream order.
    pub async fn fetch_calendar_dates(&self, league: &League) -> ApiResult<Vec<CalendarDate>> {
        let sport = league.sport.path();
        let slug = league.slug;
        match league.calendar {
            CalendarSource::Whitelist => {
                let url = format!("{}/{sport}/leagues/{slug}/calendar/whitelist", self.endpoints.core);
                let raw: WhitelistResponse = self.get(&url).await?;
                Ok(normalize::calendar_from_whitelist(&raw))
            }
            CalendarSource::Scoreboard => {
                let url = format!("{}/{sport}/{slug}/scoreboard", self.endpoints.site);
                let raw: ScoreboardResponse = self.get(&url).await?;
                Ok(normalize::calendar_from_scoreboard(&raw))
            }
        }
    }

    /// Scoreboard for one `YYYYMMDD` date. Anything else is a no-op: no
    /// request is sent and `Ok(None)` comes back.
    pub async fn fetch_events(&self, league: &League, date: &str) -> ApiResult<Option<Scoreboard>> {
        if !is_date_key(date) {
            debug!("not fetching {} events for invalid date {date:?}", league.code);
            return Ok(None);
        }
        let url = format!(
            "{}/{}/{}/scoreboard?dates={date}",
            self.endpoints.site,
            league.sport.path(),
            league.slug
        );
        let raw: ScoreboardResponse = self.get(&url).await?;
        normalize::map_scoreboard(league, date, raw).map(Some)
    }

    /// Drill-down data for one event, shaped by the league's detail kind.
    pub async fn fetch_event_detail(&self, league: &League, event_id: &str) -> ApiResult<EventDetail> {
        let slug = league.slug;
        match league.detail {
            DetailKind::Summary => {
                let url = format!(
                    "{}/{}/{slug}/summary?event={event_id}",
                    self.endpoints.site,
                    league.sport.path()
                );
                let raw: SummaryResponse = self.get(&url).await?;
                Ok(EventDetail::Game(normalize::map_summary(league, event_id, raw)))
            }
            DetailKind::Leaderboard => {
                let url = format!(
                    "{}/golf/leaderboard?league={slug}&event={event_id}",
                    self.endpoints.web_site
                );
                let raw: LeaderboardResponse = self.get(&url).await?;
                Ok(EventDetail::Leaderboard(normalize::map_leaderboard(event_id, raw)))
            }
            DetailKind::FightCenter => {
                let url = format!("{}/mma/{slug}/fightcenter/{event_id}", self.endpoints.web_common);
                let raw: FightCenterResponse = self.get(&url).await?;
                Ok(EventDetail::FightNight(normalize::map_fightcenter(event_id, raw)))
            }
        }
    }

    /// Hole-by-hole rounds for one golfer.
    pub async fn fetch_scorecard(
        &self,
        league: &League,
        event_id: &str,
        player_id: &str,
    ) -> ApiResult<Scorecard> {
        if league.detail != DetailKind::Leaderboard {
            return Err(ApiError::NotFound(format!("{} has no scorecards", league.name)));
        }
        let url = format!(
            "{}/golf/{}/leaderboard/{event_id}/competitorsummary/{player_id}",
            self.endpoints.web_site, league.slug
        );
        let raw: CompetitorSummaryResponse = self.get(&url).await?;
        Ok(normalize::map_scorecard(player_id, raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;
        debug!("{} from {url}", response.status());

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}
