//! Engine configuration parsing from environment variables.
//!
//! Unset or unparsable values fall back to the engine defaults.

use crate::domain::ml::{EngineConfig, ForestConfig, TrainingScope};
use std::str::FromStr;

/// Engine environment configuration
#[derive(Debug, Clone)]
pub struct EngineEnvConfig {
    pub window_min: usize,
    pub window_max: usize,
    pub top_k: usize,
    pub probability_threshold: f64,
    /// 0 means train on every example
    pub trailing_examples: usize,
    pub n_trees: usize,
    pub max_depth: u16,
    pub seed: u64,
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl EngineEnvConfig {
    /// Reads settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EngineConfig::default();
        Self {
            window_min: parse_or(&lookup, "WHEELCAST_WINDOW_MIN", defaults.window_min),
            window_max: parse_or(&lookup, "WHEELCAST_WINDOW_MAX", defaults.window_max),
            top_k: parse_or(&lookup, "WHEELCAST_TOP_K", defaults.top_k),
            probability_threshold: parse_or(
                &lookup,
                "WHEELCAST_PROBABILITY_THRESHOLD",
                defaults.probability_threshold,
            ),
            trailing_examples: parse_or(&lookup, "WHEELCAST_TRAILING_EXAMPLES", 0),
            n_trees: parse_or(&lookup, "WHEELCAST_N_TREES", defaults.forest.n_trees),
            max_depth: parse_or(&lookup, "WHEELCAST_MAX_DEPTH", defaults.forest.max_depth),
            seed: parse_or(&lookup, "WHEELCAST_SEED", defaults.forest.seed),
        }
    }

    pub fn into_engine_config(self) -> EngineConfig {
        let training_scope = match self.trailing_examples {
            0 => TrainingScope::Full,
            n => TrainingScope::Trailing(n),
        };
        EngineConfig {
            window_min: self.window_min,
            window_max: self.window_max,
            top_k: self.top_k,
            probability_threshold: self.probability_threshold,
            training_scope,
            forest: ForestConfig {
                n_trees: self.n_trees,
                max_depth: self.max_depth,
                seed: self.seed,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineEnvConfig::from_lookup(|_| None).into_engine_config();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_engine_config_overrides() {
        let config = EngineEnvConfig::from_lookup(lookup_from(&[
            ("WHEELCAST_WINDOW_MIN", "10"),
            ("WHEELCAST_WINDOW_MAX", " 20 "),
            ("WHEELCAST_TOP_K", "6"),
            ("WHEELCAST_PROBABILITY_THRESHOLD", "0.05"),
            ("WHEELCAST_TRAILING_EXAMPLES", "200"),
            ("WHEELCAST_SEED", "7"),
        ]))
        .into_engine_config();

        assert_eq!(config.window_min, 10);
        assert_eq!(config.window_max, 20);
        assert_eq!(config.top_k, 6);
        assert!((config.probability_threshold - 0.05).abs() < 1e-12);
        assert_eq!(config.training_scope, TrainingScope::Trailing(200));
        assert_eq!(config.forest.seed, 7);
        assert_eq!(config.forest.n_trees, 100);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let env = EngineEnvConfig::from_lookup(lookup_from(&[
            ("WHEELCAST_TOP_K", "four"),
            ("WHEELCAST_MAX_DEPTH", "-3"),
        ]));
        assert_eq!(env.top_k, 4);
        assert_eq!(env.max_depth, 10);
    }
}
