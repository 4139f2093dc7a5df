// Prediction engine: classifier, retrain-then-infer cycle, hit tracking
pub mod ml;
