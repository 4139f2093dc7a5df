pub mod backtest;
pub mod predictor;
pub mod smartcore_classifier;

pub use backtest::{HitTracker, walk_forward};
pub use predictor::{PredictionReport, RoulettePredictor, predict};
pub use smartcore_classifier::SmartCoreForest;
