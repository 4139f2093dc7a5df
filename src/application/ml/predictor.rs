//! Roulette predictor - retrain-then-infer cycle
//!
//! Each call rebuilds the training set from the full history, refits the
//! classifier from scratch and returns the top-k candidates for the next spin.
//!
//! Usage:
//! ```ignore
//! let mut predictor = RoulettePredictor::new(EngineConfig::default())?;
//! let candidates = predictor.predict(&history);
//! ```

use super::smartcore_classifier::SmartCoreForest;
use crate::domain::errors::{ConfigError, PredictionError};
use crate::domain::ml::feature_registry::check_feature_len;
use crate::domain::ml::{
    CandidateSet, ClassProbabilities, EngineConfig, build_live_features, build_training_set,
    select_candidates,
};
use crate::domain::ports::OutcomeClassifier;
use tracing::{debug, error, warn};

/// Everything one successful cycle produced
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub candidates: CandidateSet,
    pub probabilities: ClassProbabilities,
    pub training_examples: usize,
    pub discarded_windows: usize,
}

/// Prediction engine for one session.
///
/// Owns the classifier exclusively. Calls take `&mut self`, so cycles are
/// serialized by the borrow checker.
pub struct RoulettePredictor {
    config: EngineConfig,
    classifier: Box<dyn OutcomeClassifier>,
}

impl RoulettePredictor {
    /// Predictor backed by the smartcore random forest
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let classifier = SmartCoreForest::new(config.forest.clone());
        Self::with_classifier(config, Box::new(classifier))
    }

    pub fn with_classifier(
        config: EngineConfig,
        classifier: Box<dyn OutcomeClassifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Candidates for the next spin; empty while there is not enough signal.
    ///
    /// Never fails in release builds: every error is logged and turned into an
    /// empty set. A feature length mismatch between training and live input
    /// is a bug, so debug builds and tests panic on it instead.
    pub fn predict(&mut self, history: &[i64]) -> CandidateSet {
        match self.try_predict(history) {
            Ok(candidates) => candidates,
            Err(e) => {
                match &e {
                    e if e.is_warming_up() => debug!("No prediction yet: {}", e),
                    PredictionError::FeatureContractViolation { .. } => {
                        error!("Feature extraction is inconsistent: {}", e);
                        debug_assert!(false, "{}", e);
                    }
                    _ => warn!("Prediction cycle failed: {}", e),
                }
                CandidateSet::empty()
            }
        }
    }

    /// Same as `predict` but reports why no candidates were produced
    pub fn try_predict(&mut self, history: &[i64]) -> Result<CandidateSet, PredictionError> {
        self.predict_detailed(history).map(|report| report.candidates)
    }

    /// Full cycle, also returning the distribution the candidates came from
    pub fn predict_detailed(&mut self, history: &[i64]) -> Result<PredictionReport, PredictionError> {
        let required = self.config.warm_up();
        if history.len() < required {
            return Err(PredictionError::InsufficientData {
                required,
                available: history.len(),
            });
        }

        let training_set = build_training_set(history, &self.config)?;
        if training_set.is_empty() {
            return Err(PredictionError::NoTrainingExamples {
                history_len: history.len(),
            });
        }

        let (features, targets) = training_set.to_matrix();
        self.classifier.fit(&features, &targets)?;

        let live = build_live_features(history, &self.config)?;
        check_feature_len(&live, training_set.feature_len())?;

        let probabilities = self.classifier.predict_proba(&live)?;
        let candidates = select_candidates(
            &probabilities,
            self.config.top_k,
            self.config.probability_threshold,
        );

        debug!(
            "Trained {} on {} examples, candidates: {}",
            self.classifier.name(),
            training_set.len(),
            candidates
        );

        Ok(PredictionReport {
            candidates,
            probabilities,
            training_examples: training_set.len(),
            discarded_windows: training_set.discarded(),
        })
    }
}

/// One-shot prediction with a fresh engine.
///
/// Invalid configuration is logged and yields no candidates.
pub fn predict(history: &[i64], config: &EngineConfig) -> CandidateSet {
    match RoulettePredictor::new(config.clone()) {
        Ok(mut predictor) => predictor.predict(history),
        Err(e) => {
            warn!("Rejected engine configuration: {}", e);
            CandidateSet::empty()
        }
    }
}
