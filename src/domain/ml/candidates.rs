//! Top-k candidate selection over the classifier's distribution.

use crate::domain::roulette::{OUTCOME_COUNT, Outcome};
use serde::Serialize;
use std::fmt;

/// Probability for every outcome class, indexed by outcome number
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities([f64; OUTCOME_COUNT]);

impl ClassProbabilities {
    pub fn new(values: [f64; OUTCOME_COUNT]) -> Self {
        Self(values)
    }

    /// Builds from per-class vote counts; all zeros when `total` is 0
    pub fn from_votes(votes: &[u32; OUTCOME_COUNT], total: u32) -> Self {
        let mut values = [0.0; OUTCOME_COUNT];
        if total > 0 {
            for (value, &count) in values.iter_mut().zip(votes.iter()) {
                *value = count as f64 / total as f64;
            }
        }
        Self(values)
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        self.0[outcome.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn total_mass(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Classes sorted by probability descending; equal probabilities keep
    /// ascending class order.
    pub fn ranked(&self) -> Vec<(Outcome, f64)> {
        let mut ranked: Vec<(Outcome, f64)> = Outcome::all().map(|o| (o, self.get(o))).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Ordered, distinct outcomes returned by one prediction cycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CandidateSet(Vec<Outcome>);

impl CandidateSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.0
    }

    pub fn numbers(&self) -> Vec<u8> {
        self.0.iter().map(|o| o.number()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, outcome: Outcome) -> bool {
        self.0.contains(&outcome)
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.0.iter().map(|o| o.to_string()).collect();
        write!(f, "{}", numbers.join(" "))
    }
}

/// Picks up to `k` candidates.
///
/// First pass: classes with probability >= `threshold`, highest first.
/// If that yields fewer than `k`, the remaining slots are filled from the
/// overall ranking, skipping classes already chosen.
pub fn select_candidates(probabilities: &ClassProbabilities, k: usize, threshold: f64) -> CandidateSet {
    let ranked = probabilities.ranked();

    let mut selected: Vec<Outcome> = ranked
        .iter()
        .filter(|(_, p)| *p >= threshold)
        .take(k)
        .map(|(o, _)| *o)
        .collect();

    if selected.len() < k {
        for (outcome, _) in &ranked {
            if selected.len() == k {
                break;
            }
            if !selected.contains(outcome) {
                selected.push(*outcome);
            }
        }
    }

    CandidateSet(selected)
}
