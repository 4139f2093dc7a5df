use crate::domain::errors::ConfigError;
use crate::domain::roulette::OUTCOME_COUNT;
use serde::{Deserialize, Serialize};

/// Which supervised pairs are fitted each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrainingScope {
    /// Every pair the history yields. Cost grows with the history.
    #[default]
    Full,
    /// Only the most recent `n` pairs. Bounded cost, less data per fit.
    Trailing(usize),
}

/// Random forest hyperparameters, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_samples_split: usize,
    /// Share of feature columns each tree sees
    pub feature_fraction: f64,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            feature_fraction: 0.33,
            seed: 42,
        }
    }
}

/// Prediction engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// History length below which no prediction is attempted (warm-up is `window_min + 1`)
    pub window_min: usize,
    /// Outcomes per window, for both training examples and the live input
    pub window_max: usize,
    pub top_k: usize,
    /// Minimum class probability to be picked before the fallback kicks in.
    /// Values above 1 disable the first pass entirely.
    pub probability_threshold: f64,
    pub training_scope: TrainingScope,
    pub forest: ForestConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_min: 18,
            window_max: 36,
            top_k: 4,
            probability_threshold: 0.01,
            training_scope: TrainingScope::Full,
            forest: ForestConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Minimum history length before a prediction is attempted
    pub fn warm_up(&self) -> usize {
        self.window_min + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_min < 1 {
            return Err(ConfigError::WindowMinTooSmall(self.window_min));
        }
        if self.window_max < self.window_min {
            return Err(ConfigError::WindowOrder {
                window_min: self.window_min,
                window_max: self.window_max,
            });
        }
        if self.top_k < 1 || self.top_k > OUTCOME_COUNT {
            return Err(ConfigError::TopKOutOfRange {
                value: self.top_k,
                max: OUTCOME_COUNT,
            });
        }
        if !self.probability_threshold.is_finite() || self.probability_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.probability_threshold));
        }
        if self.training_scope == TrainingScope::Trailing(0) {
            return Err(ConfigError::EmptyTrailingScope);
        }
        if self.forest.n_trees == 0 {
            return Err(ConfigError::NoTrees);
        }
        let fraction = self.forest.feature_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::InvalidFeatureFraction(fraction));
        }
        Ok(())
    }
}
