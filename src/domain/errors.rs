use thiserror::Error;

/// A spin result that does not exist on a single-zero wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid outcome {0}: roulette numbers range from 0 to 36")]
pub struct InvalidOutcome(pub i64);

/// Errors raised by one prediction cycle
///
/// `RoulettePredictor::predict` absorbs all of these into an empty candidate
/// set. `RoulettePredictor::try_predict` hands them back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Insufficient data: need at least {required} outcomes, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("No training examples could be built from {history_len} outcomes")]
    NoTrainingExamples { history_len: usize },

    #[error("Feature contract violation: expected {expected} features, got {actual}")]
    FeatureContractViolation { expected: usize, actual: usize },

    #[error(transparent)]
    InvalidOutcome(#[from] InvalidOutcome),

    #[error("Training failed: {reason}")]
    TrainingFailure { reason: String },

    #[error("Inference failed: {reason}")]
    InferenceFailure { reason: String },
}

impl PredictionError {
    /// Whether this is the normal warm-up state rather than a fault
    pub fn is_warming_up(&self) -> bool {
        matches!(
            self,
            PredictionError::InsufficientData { .. } | PredictionError::NoTrainingExamples { .. }
        )
    }
}

/// Errors related to engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("window_min must be at least 1, got {0}")]
    WindowMinTooSmall(usize),

    #[error("window_max ({window_max}) must be >= window_min ({window_min})")]
    WindowOrder { window_min: usize, window_max: usize },

    #[error("top_k must be between 1 and {max}, got {value}")]
    TopKOutOfRange { value: usize, max: usize },

    #[error("probability_threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("Trailing training scope must keep at least one example")]
    EmptyTrailingScope,

    #[error("Random forest needs at least one tree")]
    NoTrees,

    #[error("feature_fraction must be in (0, 1], got {0}")]
    InvalidFeatureFraction(f64),
}

/// Errors related to history ingestion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Too many numbers: {count} given, at most {max} accepted per entry")]
    TooManyNumbers { count: usize, max: usize },
}
