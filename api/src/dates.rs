use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

pub const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// A valid event date, keyed upstream as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Accept only an 8-digit key that is also a real calendar day.
    pub fn from_key(key: &str) -> Option<Self> {
        if !is_date_key(key) {
            return None;
        }
        NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok().map(Self)
    }

    /// Accept any of the shapes ESPN uses for calendar entries:
    /// `20240601`, `2024-06-01`, RFC 3339, or `2024-06-01T07:00Z`.
    /// Timestamps resolve to their UTC calendar day.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_date(raw).map(Self)
    }

    pub fn key(&self) -> String {
        self.0.format(DATE_KEY_FORMAT).to_string()
    }

    /// `Jun 1`
    pub fn format_short(&self) -> String {
        self.0.format("%b %-d").to_string()
    }

    pub fn days_from(&self, reference: NaiveDate) -> i64 {
        (self.0 - reference).num_days().abs()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

/// `^\d{8}$`
pub fn is_date_key(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if is_date_key(raw) {
        return NaiveDate::parse_from_str(raw, DATE_KEY_FORMAT).ok();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc().date());
    }
    // ESPN drops the seconds: "2024-06-01T07:00Z"
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|dt| dt.date())
}

pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_key() -> String {
    format_date_key(today())
}

/// The date with the smallest absolute day difference from `reference`.
/// Ties keep whichever date was encountered first.
pub fn closest_date(dates: &[CalendarDate], reference: NaiveDate) -> Option<CalendarDate> {
    let mut best: Option<(CalendarDate, i64)> = None;
    for date in dates {
        let diff = date.days_from(reference);
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((*date, diff)),
        }
    }
    best.map(|(date, _)| date)
}
