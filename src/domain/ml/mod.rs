pub mod candidates;
pub mod config;
pub mod feature_registry;
pub mod training_set;

pub use candidates::{CandidateSet, ClassProbabilities, select_candidates};
pub use config::{EngineConfig, ForestConfig, TrainingScope};
pub use training_set::{TrainingExample, TrainingSet, build_live_features, build_training_set};
