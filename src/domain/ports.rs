use crate::domain::errors::PredictionError;
use crate::domain::ml::ClassProbabilities;
use crate::domain::roulette::Outcome;

/// Interface for the multi-class model behind the predictor.
///
/// Hyperparameters are fixed at construction. `fit` replaces any previous
/// model state entirely; nothing is carried over between fits.
pub trait OutcomeClassifier: Send {
    /// Fit from scratch on `features` (one row per example) and `targets`
    fn fit(&mut self, features: &[Vec<f64>], targets: &[Outcome]) -> Result<(), PredictionError>;

    /// Probability of every outcome class for one feature vector.
    /// Fails if called before a successful `fit`.
    fn predict_proba(&self, features: &[f64]) -> Result<ClassProbabilities, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
