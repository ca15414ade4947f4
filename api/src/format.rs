//! Display helpers shared by every sport.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// 1st, 2nd, 3rd, 4th ... 11th, 12th, 13th ... 21st
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, m) if m != 11 => "st",
        (2, m) if m != 12 => "nd",
        (3, m) if m != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// ESPN start times come as RFC 3339 or with the seconds dropped.
pub fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// 12-hour wall clock in `tz`: `7:05 PM`.
pub fn game_time_in<Tz>(start: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    start.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// Time left until `start`, e.g. `2 hr 5 min`. Minutes are shown whenever
/// there are no whole hours left.
pub fn countdown(start: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let remaining = (*start - *now).num_minutes().max(0);
    let hours = remaining / 60;
    let minutes = remaining % 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{hours} hr"));
    }
    if minutes > 0 || hours == 0 {
        parts.push(format!("{minutes} min"));
    }
    parts.join(" ")
}

/// Golf totals relative to par: `E`, `+3`, `-2`.
pub fn to_par(total: i64) -> String {
    match total {
        0 => "E".to_owned(),
        n if n > 0 => format!("+{n}"),
        n => n.to_string(),
    }
}

/// Section label for a season slug such as `regular-season` or `post-season`.
pub fn season_label(slug: &str) -> String {
    match slug {
        "regular-season" => "Regular Season".to_owned(),
        "post-season" | "postseason" => "Postseason".to_owned(),
        "preseason" | "pre-season" => "Preseason".to_owned(),
        "off-season" | "offseason" => "Offseason".to_owned(),
        other => other
            .split(['-', '_'])
            .filter(|w| !w.is_empty())
            .map(to_title_case)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn to_title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}
