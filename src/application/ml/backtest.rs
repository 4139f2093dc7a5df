//! Hit tracking and walk-forward replay of a recorded history.

use super::predictor::RoulettePredictor;
use crate::domain::ml::CandidateSet;
use crate::domain::roulette::Outcome;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Running tally of how often the spin that followed landed in the candidates
#[derive(Debug, Clone, Default, Serialize)]
pub struct HitTracker {
    rounds: usize,
    hits: usize,
    /// Distinct numbers that were hit, in the order first hit
    hit_numbers: Vec<u8>,
}

impl HitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores one round. Empty candidate sets are not counted as rounds.
    pub fn record(&mut self, candidates: &CandidateSet, actual: Outcome) -> bool {
        if candidates.is_empty() {
            return false;
        }
        self.rounds += 1;
        let hit = candidates.contains(actual);
        if hit {
            self.hits += 1;
            if !self.hit_numbers.contains(&actual.number()) {
                self.hit_numbers.push(actual.number());
            }
        }
        hit
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn hit_numbers(&self) -> &[u8] {
        &self.hit_numbers
    }

    /// Share of scored rounds that were hits, 0 before any round
    pub fn hit_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.hits as f64 / self.rounds as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for HitTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hit rate: {:.2}% ({}/{})",
            self.hit_rate() * 100.0,
            self.hits,
            self.rounds
        )
    }
}

/// Replays `history`: for every position from warm-up onward, predicts from
/// the prefix before it and scores the prediction against the actual spin.
/// Off-wheel actual values are skipped.
pub fn walk_forward(predictor: &mut RoulettePredictor, history: &[i64]) -> HitTracker {
    let mut tracker = HitTracker::new();
    let start = predictor.config().warm_up();

    for end in start..history.len() {
        let Ok(actual) = Outcome::new(history[end]) else {
            continue;
        };
        let candidates = predictor.predict(&history[..end]);
        tracker.record(&candidates, actual);
    }

    info!("Walk-forward over {} spins: {}", history.len(), tracker);
    tracker
}
