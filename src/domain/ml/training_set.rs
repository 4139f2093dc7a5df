//! Supervised pairs built by sliding a window across the history.

use super::config::{EngineConfig, TrainingScope};
use super::feature_registry::{FrequencySnapshot, check_feature_len, feature_vector_len, window_features};
use crate::domain::errors::{InvalidOutcome, PredictionError};
use crate::domain::roulette::Outcome;
use tracing::debug;

/// Features of one window paired with the outcome that followed it
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub features: Vec<f64>,
    pub target: Outcome,
}

/// All examples of one training cycle. Every feature vector has the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainingSet {
    examples: Vec<TrainingExample>,
    feature_len: usize,
    /// Windows dropped because they contained an off-wheel value
    discarded: usize,
}

impl TrainingSet {
    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn feature_len(&self) -> usize {
        self.feature_len
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Feature rows and targets as parallel vectors
    pub fn to_matrix(&self) -> (Vec<Vec<f64>>, Vec<Outcome>) {
        self.examples
            .iter()
            .map(|e| (e.features.clone(), e.target))
            .unzip()
    }

    /// Keeps only the most recent `n` examples
    fn retain_trailing(&mut self, n: usize) {
        if self.examples.len() > n {
            let drop = self.examples.len() - n;
            self.examples.drain(..drop);
        }
    }
}

/// Validates a raw slice into outcomes, failing on the first off-wheel value
pub fn to_outcomes(values: &[i64]) -> Result<Vec<Outcome>, InvalidOutcome> {
    values.iter().map(|&v| Outcome::new(v)).collect()
}

/// Builds the training set for `history`.
///
/// For every target position `i` in `window_max ..= len - 2` the window is
/// `history[i - min(window_max, i) .. i]` and the target is `history[i]`.
/// Frequencies use only `history[..i]`. Windows or targets holding an
/// off-wheel value are skipped.
pub fn build_training_set(
    history: &[i64],
    config: &EngineConfig,
) -> Result<TrainingSet, PredictionError> {
    let window_max = config.window_max;
    let expected_len = feature_vector_len(window_max);
    let mut set = TrainingSet {
        feature_len: expected_len,
        ..Default::default()
    };

    // Counts over history[..i], advanced one outcome per position
    let mut frequencies = FrequencySnapshot::from_prefix(&history[..window_max.min(history.len())]);
    let last_target = history.len().saturating_sub(1);
    for i in window_max..last_target {
        if i > window_max {
            frequencies.observe(history[i - 1]);
        }
        let window_len = window_max.min(i);
        let raw_window = &history[i - window_len..i];

        let (window, target) = match (to_outcomes(raw_window), Outcome::new(history[i])) {
            (Ok(window), Ok(target)) => (window, target),
            _ => {
                set.discarded += 1;
                continue;
            }
        };

        let features = window_features(&window, &frequencies);
        check_feature_len(&features, expected_len)?;
        set.examples.push(TrainingExample { features, target });
    }

    if let TrainingScope::Trailing(n) = config.training_scope {
        set.retain_trailing(n);
    }

    debug!(
        "Built {} training examples ({} windows discarded) from {} outcomes",
        set.len(),
        set.discarded,
        history.len()
    );
    Ok(set)
}

/// Live input: features of the last `window_max` outcomes, with frequencies
/// over everything but the very last outcome.
pub fn build_live_features(
    history: &[i64],
    config: &EngineConfig,
) -> Result<Vec<f64>, PredictionError> {
    let start = history.len().saturating_sub(config.window_max);
    let window = to_outcomes(&history[start..])?;
    let frequencies = FrequencySnapshot::from_prefix(&history[..history.len().saturating_sub(1)]);
    Ok(window_features(&window, &frequencies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::feature_registry::FEATURES_PER_POSITION;

    fn small_config() -> EngineConfig {
        EngineConfig {
            window_min: 3,
            window_max: 4,
            ..Default::default()
        }
    }

    fn sequential(len: usize) -> Vec<i64> {
        (0..len).map(|i| (i % 37) as i64).collect()
    }

    #[test]
    fn test_example_positions() {
        let history = sequential(10);
        let set = build_training_set(&history, &small_config()).unwrap();

        // Targets at positions 4..=8
        let targets: Vec<u8> = set.examples().iter().map(|e| e.target.number()).collect();
        assert_eq!(targets, vec![4, 5, 6, 7, 8]);
        assert_eq!(set.feature_len(), feature_vector_len(4));
        assert!(set.examples().iter().all(|e| e.features.len() == set.feature_len()));
    }

    #[test]
    fn test_no_examples_for_short_history() {
        let config = small_config();
        // len 5 -> positions 4..4: none
        assert!(build_training_set(&sequential(5), &config).unwrap().is_empty());
        assert_eq!(build_training_set(&sequential(6), &config).unwrap().len(), 1);
    }

    #[test]
    fn test_windows_with_invalid_values_are_discarded() {
        let mut history = sequential(12);
        history[1] = 37;
        history[9] = -1;
        let set = build_training_set(&history, &small_config()).unwrap();

        // Targets 4..=10. Windows covering index 1: target 4, 5.
        // Windows or targets covering index 9: targets 9, 10.
        let targets: Vec<u8> = set.examples().iter().map(|e| e.target.number()).collect();
        assert_eq!(targets, vec![6, 7, 8]);
        assert_eq!(set.discarded(), 4);
    }

    #[test]
    fn test_frequencies_do_not_look_ahead() {
        let history: Vec<i64> = vec![1, 2, 3, 4, 9, 9];
        let set = build_training_set(&history, &small_config()).unwrap();
        assert_eq!(set.len(), 1);

        // Only the example with target history[4] exists; its window is [1, 2, 3, 4]
        // and none of them is the upcoming 9, so the last position's frequency is 1/4.
        let example = &set.examples()[0];
        let last_position = &example.features[3 * FEATURES_PER_POSITION..];
        assert_eq!(last_position[7], 0.25);
    }

    #[test]
    fn test_running_frequencies_match_prefix_counts() {
        let mut history: Vec<i64> = (0..40).map(|i| (i * 7 % 37) as i64).collect();
        history[6] = 37;
        history[15] = -2;
        let config = small_config();
        let set = build_training_set(&history, &config).unwrap();

        let mut expected = Vec::new();
        for i in config.window_max..history.len() - 1 {
            let (Ok(window), Ok(_)) = (
                to_outcomes(&history[i - config.window_max..i]),
                Outcome::new(history[i]),
            ) else {
                continue;
            };
            let frequencies = FrequencySnapshot::from_prefix(&history[..i]);
            expected.push(window_features(&window, &frequencies));
        }

        let actual: Vec<Vec<f64>> = set.examples().iter().map(|e| e.features.clone()).collect();
        assert!(set.discarded() > 0);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_trailing_scope_keeps_latest_examples() {
        let config = EngineConfig {
            training_scope: TrainingScope::Trailing(2),
            ..small_config()
        };
        let set = build_training_set(&sequential(10), &config).unwrap();
        let targets: Vec<u8> = set.examples().iter().map(|e| e.target.number()).collect();
        assert_eq!(targets, vec![7, 8]);
    }

    #[test]
    fn test_live_features_match_training_length() {
        let history = sequential(10);
        let config = small_config();
        let set = build_training_set(&history, &config).unwrap();
        let live = build_live_features(&history, &config).unwrap();
        assert_eq!(live.len(), set.feature_len());
    }

    #[test]
    fn test_live_features_exclude_last_outcome_from_frequencies() {
        let history: Vec<i64> = vec![5, 6, 7, 8, 9, 9];
        let live = build_live_features(&history, &small_config()).unwrap();
        // Window [7, 8, 9, 9]; frequencies over [5, 6, 7, 8, 9]: 9 seen once of 5
        let last_position = &live[3 * FEATURES_PER_POSITION..];
        assert!((last_position[7] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_live_features_reject_invalid_outcome() {
        let history: Vec<i64> = vec![5, 6, 7, 8, 40];
        assert_eq!(
            build_live_features(&history, &small_config()),
            Err(PredictionError::InvalidOutcome(InvalidOutcome(40)))
        );
    }
}
