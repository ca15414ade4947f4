use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use scoreline_api::League;
use scoreline_api::dates::is_date_key;
use std::time::Duration;

pub const LEAGUE_VAR: &str = "SCORELINE_LEAGUE";
pub const DATE_VAR: &str = "SCORELINE_DATE";
pub const EVENT_VAR: &str = "SCORELINE_EVENT";
pub const POLL_SECS_VAR: &str = "SCORELINE_POLL_SECS";
pub const JSON_VAR: &str = "SCORELINE_JSON";

const COMMANDS_HELP: &str = "Commands (type while running):
  r            refresh now
  d YYYYMMDD   switch date
  e ID         show one event's detail
  s PLAYER_ID  follow a golfer's scorecard
  x            hide detail
  l            list calendar dates
  q            quit

Logging is controlled by RUST_LOG (default warn).";

/// Live scores from ESPN in your terminal.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "scoreline", version, after_help = COMMANDS_HELP)]
pub struct Cli {
    /// League code: mlb nba wnba cbb nhl pga lpga ufc pfl
    #[arg(short, long, env = LEAGUE_VAR, default_value = "nba", value_parser = parse_league)]
    pub league: League,

    /// Pin a date (YYYYMMDD) instead of the one closest to today
    #[arg(short, long, env = DATE_VAR, value_parser = parse_date_key)]
    pub date: Option<String>,

    /// Event id whose detail to follow
    #[arg(short, long, env = EVENT_VAR)]
    pub event: Option<String>,

    /// Poll interval in seconds, overriding the league default
    #[arg(long, env = POLL_SECS_VAR, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_secs: Option<u64>,

    /// Emit one JSON object per update
    #[arg(long, env = JSON_VAR, action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub json: bool,
}

fn parse_league(code: &str) -> Result<League, String> {
    League::from_code(code).ok_or_else(|| {
        format!(
            "unknown league {code:?} (one of {})",
            League::codes().collect::<Vec<_>>().join(", ")
        )
    })
}

fn parse_date_key(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if is_date_key(raw) {
        Ok(raw.to_owned())
    } else {
        Err(format!("expected YYYYMMDD, got {raw:?}"))
    }
}

/// Resolved session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub league: League,
    /// Pinned date; `None` lets the calendar pick the closest one to today.
    pub date: Option<String>,
    pub event: Option<String>,
    pub poll_override: Option<Duration>,
    pub json: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            league: League::default(),
            date: None,
            event: None,
            poll_override: None,
            json: false,
        }
    }
}

impl From<Cli> for AppSettings {
    fn from(cli: Cli) -> Self {
        Self {
            league: cli.league,
            date: cli.date,
            event: cli.event.filter(|id| !id.trim().is_empty()),
            poll_override: cli.poll_secs.map(Duration::from_secs),
            json: cli.json,
        }
    }
}

impl AppSettings {
    pub fn poll_interval(&self) -> Duration {
        self.poll_override.unwrap_or(self.league.poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use std::ffi::OsStr;

    fn settings(raw: &[&str]) -> AppSettings {
        let args = std::iter::once("scoreline").chain(raw.iter().copied());
        Cli::try_parse_from(args).unwrap().into()
    }

    fn error_kind(raw: &[&str]) -> ErrorKind {
        let args = std::iter::once("scoreline").chain(raw.iter().copied());
        Cli::try_parse_from(args).unwrap_err().kind()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_without_flags() {
        let settings = settings(&[]);
        assert_eq!(settings.league.code, "nba");
        assert_eq!(settings.date, None);
        assert!(!settings.json);
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn flags_parse() {
        let settings = settings(&["--league", "NHL", "--date=20240601", "-e", "401", "--poll-secs", "30", "--json"]);
        assert_eq!(settings.league.code, "nhl");
        assert_eq!(settings.date.as_deref(), Some("20240601"));
        assert_eq!(settings.event.as_deref(), Some("401"));
        assert_eq!(settings.poll_interval(), Duration::from_secs(30));
        assert!(settings.json);
    }

    #[test]
    fn league_sets_the_poll_interval() {
        assert_eq!(settings(&["-l", "ufc"]).poll_interval(), Duration::from_secs(10));
    }

    #[test]
    fn bad_input_is_rejected() {
        assert_eq!(error_kind(&["--league", "cricket"]), ErrorKind::ValueValidation);
        assert_eq!(error_kind(&["--date", "2024-06-01"]), ErrorKind::ValueValidation);
        assert_eq!(error_kind(&["--poll-secs", "0"]), ErrorKind::ValueValidation);
        assert_eq!(error_kind(&["--bogus"]), ErrorKind::UnknownArgument);
        assert_eq!(error_kind(&["--help"]), ErrorKind::DisplayHelp);
        assert_eq!(error_kind(&["--version"]), ErrorKind::DisplayVersion);

        let err = Cli::try_parse_from(["scoreline", "--event"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn every_setting_reads_its_environment_variable() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(OsStr::to_owned)
        };
        assert_eq!(env_of("league").as_deref(), Some(OsStr::new(LEAGUE_VAR)));
        assert_eq!(env_of("date").as_deref(), Some(OsStr::new(DATE_VAR)));
        assert_eq!(env_of("event").as_deref(), Some(OsStr::new(EVENT_VAR)));
        assert_eq!(env_of("poll_secs").as_deref(), Some(OsStr::new(POLL_SECS_VAR)));
        assert_eq!(env_of("json").as_deref(), Some(OsStr::new(JSON_VAR)));
    }
}
