use crate::domain::errors::PredictionError;
use crate::domain::roulette::{OUTCOME_COUNT, Outcome};

/// Ordered list of per-position feature names.
/// Every window position contributes exactly these values, in this order,
/// at training time and at prediction time.
pub const FEATURE_NAMES: &[&str] = &[
    "mod_2",
    "mod_3",
    "high_half",
    "color_code",
    "column",
    "row",
    "dozen",
    "frequency",
    "delta_previous",
    "window_even_share",
    "window_odd_share",
    "seen_last_3",
    "mean_distance_last_3",
];

/// Features contributed by each window position
pub const FEATURES_PER_POSITION: usize = FEATURE_NAMES.len();

/// Positions looked back on for the repeat and distance features
const LOOKBACK: usize = 3;

/// Total feature vector length for windows of `window_len` outcomes
pub fn feature_vector_len(window_len: usize) -> usize {
    FEATURES_PER_POSITION * window_len
}

/// Outcome counts over a history prefix
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySnapshot {
    counts: [u32; OUTCOME_COUNT],
    total: usize,
}

impl FrequencySnapshot {
    /// Counts every entry of `prefix`. Off-wheel entries add to the total only.
    pub fn from_prefix(prefix: &[i64]) -> Self {
        let mut counts = [0u32; OUTCOME_COUNT];
        for &n in prefix {
            if let Ok(outcome) = Outcome::new(n) {
                counts[outcome.index()] += 1;
            }
        }
        Self {
            counts,
            total: prefix.len(),
        }
    }

    /// Extends the prefix by one entry
    pub fn observe(&mut self, value: i64) {
        if let Ok(outcome) = Outcome::new(value) {
            self.counts[outcome.index()] += 1;
        }
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, outcome: Outcome) -> u32 {
        self.counts[outcome.index()]
    }

    /// count(n) / total, 0 when nothing has been observed
    pub fn normalized(&self, outcome: Outcome) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(outcome) as f64 / self.total as f64
        }
    }
}

/// Window-wide parity shares, shared by every position of one window
#[derive(Debug, Clone, Copy)]
struct WindowShares {
    even: f64,
    odd: f64,
}

impl WindowShares {
    fn of(window: &[Outcome]) -> Self {
        if window.is_empty() {
            return Self { even: 0.0, odd: 0.0 };
        }
        let len = window.len() as f64;
        let even = window
            .iter()
            .filter(|o| !o.is_zero() && o.number() % 2 == 0)
            .count();
        let odd = window.iter().filter(|o| o.number() % 2 == 1).count();
        Self {
            even: even as f64 / len,
            odd: odd as f64 / len,
        }
    }
}

/// Features of the outcome at `index` within `window`
pub fn position_features(
    window: &[Outcome],
    index: usize,
    frequencies: &FrequencySnapshot,
) -> Vec<f64> {
    position_features_with(window, index, frequencies, WindowShares::of(window))
}

fn position_features_with(
    window: &[Outcome],
    index: usize,
    frequencies: &FrequencySnapshot,
    shares: WindowShares,
) -> Vec<f64> {
    let outcome = window[index];
    let n = outcome.number() as f64;
    let previous = &window[index.saturating_sub(LOOKBACK)..index];

    let delta_previous = match index.checked_sub(1) {
        Some(prev) => n - window[prev].number() as f64,
        None => 0.0,
    };
    let seen_recently = if previous.contains(&outcome) { 1.0 } else { 0.0 };
    let mean_distance = if previous.len() < LOOKBACK {
        0.0
    } else {
        previous
            .iter()
            .map(|o| (n - o.number() as f64).abs())
            .sum::<f64>()
            / LOOKBACK as f64
    };

    vec![
        (outcome.number() % 2) as f64,
        (outcome.number() % 3) as f64,
        if outcome.number() >= 19 { 1.0 } else { 0.0 },
        outcome.color().code(),
        outcome.column() as f64,
        outcome.row() as f64,
        outcome.dozen() as f64,
        frequencies.normalized(outcome),
        delta_previous,
        shares.even,
        shares.odd,
        seen_recently,
        mean_distance,
    ]
}

/// Flattened feature vector of a whole window: position features concatenated
/// oldest first. This is the single extraction path for training examples and
/// the live input.
pub fn window_features(window: &[Outcome], frequencies: &FrequencySnapshot) -> Vec<f64> {
    let shares = WindowShares::of(window);
    let mut features = Vec::with_capacity(feature_vector_len(window.len()));
    for index in 0..window.len() {
        features.extend(position_features_with(window, index, frequencies, shares));
    }
    features
}

/// Fails fast when a vector does not have the agreed length
pub fn check_feature_len(features: &[f64], expected: usize) -> Result<(), PredictionError> {
    if features.len() != expected {
        return Err(PredictionError::FeatureContractViolation {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}
