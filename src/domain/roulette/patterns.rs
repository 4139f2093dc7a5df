//! Human-readable patterns observed on the most recent spin.

use super::outcome::{Half, Outcome, Parity};
use std::fmt;

/// Spins looked back on for repeats and distances
const LOOKBACK: usize = 3;

/// Mean distance at or below which recent numbers count as clustered
const CLOSE_DISTANCE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Zero,
    Even,
    Odd,
    Low,
    High,
    Column(u8),
    Dozen(u8),
    RecentRepeat,
    CloseToRecent { mean_distance: f64 },
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Zero => write!(f, "Zero"),
            Pattern::Even => write!(f, "Even number"),
            Pattern::Odd => write!(f, "Odd number"),
            Pattern::Low => write!(f, "Low number (1-18)"),
            Pattern::High => write!(f, "High number (19-36)"),
            Pattern::Column(c) => write!(f, "Column: {}", c),
            Pattern::Dozen(d) => write!(f, "Dozen: {}", d),
            Pattern::RecentRepeat => write!(f, "Repeat within the last {} spins", LOOKBACK),
            Pattern::CloseToRecent { mean_distance } => write!(
                f,
                "Low mean distance to the last {} spins ({:.2})",
                LOOKBACK, mean_distance
            ),
        }
    }
}

/// Patterns detected on one spin relative to the spins before it
#[derive(Debug, Clone, PartialEq)]
pub struct PatternReport {
    pub outcome: Outcome,
    pub patterns: Vec<Pattern>,
}

impl PatternReport {
    /// Describes `last` given the spins that preceded it (oldest first).
    pub fn describe(last: Outcome, previous: &[Outcome]) -> Self {
        let mut patterns = Vec::new();

        match last.parity() {
            None => patterns.push(Pattern::Zero),
            Some(Parity::Even) => patterns.push(Pattern::Even),
            Some(Parity::Odd) => patterns.push(Pattern::Odd),
        }
        match last.half() {
            Some(Half::Low) => patterns.push(Pattern::Low),
            Some(Half::High) => patterns.push(Pattern::High),
            None => {}
        }
        patterns.push(Pattern::Column(last.column()));
        patterns.push(Pattern::Dozen(last.dozen()));

        let recent = &previous[previous.len().saturating_sub(LOOKBACK)..];
        if recent.contains(&last) {
            patterns.push(Pattern::RecentRepeat);
        }

        if !recent.is_empty() {
            let mean_distance = recent
                .iter()
                .map(|o| (last.number() as f64 - o.number() as f64).abs())
                .sum::<f64>()
                / recent.len() as f64;
            if mean_distance <= CLOSE_DISTANCE {
                patterns.push(Pattern::CloseToRecent { mean_distance });
            }
        }

        Self { outcome: last, patterns }
    }

    /// Describes the last spin of a raw history once it holds at least
    /// `min_len` spins. Off-wheel values in the lookback are ignored.
    pub fn from_history(numbers: &[i64], min_len: usize) -> Option<Self> {
        if numbers.is_empty() || numbers.len() < min_len {
            return None;
        }
        let (last, before) = numbers.split_last()?;
        let last = Outcome::new(*last).ok()?;
        let start = before.len().saturating_sub(LOOKBACK);
        let previous: Vec<Outcome> = before[start..]
            .iter()
            .filter_map(|&n| Outcome::new(n).ok())
            .collect();
        Some(Self::describe(last, &previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(values: &[i64]) -> Vec<Outcome> {
        values.iter().map(|&v| Outcome::new(v).unwrap()).collect()
    }

    #[test]
    fn test_basic_patterns() {
        let report = PatternReport::describe(Outcome::new(20).unwrap(), &[]);
        assert_eq!(
            report.patterns,
            vec![
                Pattern::Even,
                Pattern::High,
                Pattern::Column(2),
                Pattern::Dozen(2)
            ]
        );
    }

    #[test]
    fn test_zero_patterns() {
        let report = PatternReport::describe(Outcome::ZERO, &outcomes(&[30, 31, 32]));
        assert_eq!(report.patterns[0], Pattern::Zero);
        assert!(report.patterns.contains(&Pattern::Column(0)));
        assert!(!report.patterns.contains(&Pattern::RecentRepeat));
    }

    #[test]
    fn test_repeat_and_close_distance() {
        let report = PatternReport::describe(Outcome::new(10).unwrap(), &outcomes(&[1, 9, 10, 12]));
        assert!(report.patterns.contains(&Pattern::RecentRepeat));
        // |10-9| + |10-10| + |10-12| = 3, mean 1.0
        assert!(
            report
                .patterns
                .contains(&Pattern::CloseToRecent { mean_distance: 1.0 })
        );
    }

    #[test]
    fn test_from_history_requires_min_len() {
        assert!(PatternReport::from_history(&[1, 2, 3], 36).is_none());
        let report = PatternReport::from_history(&[1, 2, 3], 3).unwrap();
        assert_eq!(report.outcome.number(), 3);
    }
}
