//! "How watchable is this game" heuristic shown next to baseball rows.
//!
//! The thresholds are hand-tuned; the trait keeps the table swappable.

use crate::EventStatus;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

pub trait ExcitementPolicy {
    /// Score in `[MIN_SCORE, MAX_SCORE]`, or exactly `0.0` for games that are
    /// not being played.
    fn score(&self, home: u32, away: u32, status: &EventStatus) -> f64;
}

/// Piecewise lookup over combined runs and run differential. Each band is
/// `(lower bound, points)`; the last band whose bound is reached applies.
#[derive(Debug, Clone)]
pub struct BandedExcitement {
    pub total_bands: Vec<(u32, f64)>,
    pub margin_bands: Vec<(u32, f64)>,
}

impl Default for BandedExcitement {
    fn default() -> Self {
        Self {
            total_bands: vec![(0, 0.5), (3, 1.5), (6, 2.5), (9, 3.5), (13, 4.5), (18, 5.0)],
            margin_bands: vec![(0, 5.0), (1, 4.5), (2, 3.5), (3, 2.5), (5, 1.5), (8, 0.5), (12, 0.0)],
        }
    }
}

fn band_points(bands: &[(u32, f64)], value: u32) -> f64 {
    bands
        .iter()
        .take_while(|(bound, _)| value >= *bound)
        .last()
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

impl ExcitementPolicy for BandedExcitement {
    fn score(&self, home: u32, away: u32, status: &EventStatus) -> f64 {
        if status.is_interrupted() {
            return 0.0;
        }
        let total = home.saturating_add(away);
        let margin = home.abs_diff(away);
        let raw = band_points(&self.total_bands, total) + band_points(&self.margin_bands, margin);
        raw.clamp(MIN_SCORE, MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_for_every_realistic_score() {
        let policy = BandedExcitement::default();
        for home in 0..=50 {
            for away in 0..=50 {
                let s = policy.score(home, away, &EventStatus::InProgress);
                assert!((MIN_SCORE..=MAX_SCORE).contains(&s), "{home}-{away} scored {s}");
                assert_eq!(s, policy.score(home, away, &EventStatus::InProgress));
            }
        }
    }

    #[test]
    fn interrupted_games_score_zero() {
        let policy = BandedExcitement::default();
        assert_eq!(policy.score(5, 4, &EventStatus::Suspended), 0.0);
        assert_eq!(policy.score(0, 0, &EventStatus::Postponed), 0.0);
    }

    #[test]
    fn close_slugfest_beats_blowout() {
        let policy = BandedExcitement::default();
        let close = policy.score(9, 8, &EventStatus::InProgress);
        let blowout = policy.score(14, 1, &EventStatus::InProgress);
        assert!(close > blowout);
    }

    #[test]
    fn scoreless_tie_hits_the_floor_of_the_margin_table() {
        let policy = BandedExcitement::default();
        assert_eq!(policy.score(0, 0, &EventStatus::Scheduled), 5.5);
        assert_eq!(policy.score(20, 0, &EventStatus::Final), 5.0);
    }
}
