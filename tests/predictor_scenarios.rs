use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wheelcast::application::ml::{RoulettePredictor, predict};
use wheelcast::domain::errors::PredictionError;
use wheelcast::domain::ml::feature_registry::feature_vector_len;
use wheelcast::domain::ml::{EngineConfig, build_live_features, build_training_set};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn sequential(len: usize) -> Vec<i64> {
    (0..len).map(|i| (i % 37) as i64).collect()
}

fn random_spins(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..=36)).collect()
}

fn assert_distinct_on_wheel(numbers: &[u8]) {
    assert!(numbers.iter().all(|&n| n <= 36), "off-wheel candidate in {:?}", numbers);
    let mut sorted = numbers.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), numbers.len(), "duplicate candidate in {:?}", numbers);
}

#[test]
fn test_below_warm_up_returns_nothing() {
    init_logging();
    let config = EngineConfig::default();

    // Scenario A: 17 spins, warm-up is 19
    assert!(predict(&sequential(17), &config).is_empty());

    for len in 0..config.warm_up() {
        let mut predictor = RoulettePredictor::new(config.clone()).unwrap();
        assert!(
            matches!(
                predictor.try_predict(&random_spins(len, 3)),
                Err(PredictionError::InsufficientData { .. })
            ),
            "len {} should be insufficient",
            len
        );
    }
}

#[test]
fn test_forty_sequential_spins_give_four_candidates() {
    init_logging();
    // Scenario B
    let config = EngineConfig::default();
    let candidates = predict(&sequential(40), &config);

    assert_eq!(candidates.len(), 4);
    assert_distinct_on_wheel(&candidates.numbers());
}

#[test]
fn test_unreachable_threshold_falls_back_to_ranking() {
    init_logging();
    // Scenario C
    let config = EngineConfig {
        probability_threshold: 1.1,
        ..Default::default()
    };
    let mut predictor = RoulettePredictor::new(config).unwrap();
    let report = predictor.predict_detailed(&random_spins(120, 11)).unwrap();

    let expected: Vec<u8> = report
        .probabilities
        .ranked()
        .iter()
        .take(4)
        .map(|(o, _)| o.number())
        .collect();
    assert_eq!(report.candidates.numbers(), expected);
}

#[test]
fn test_same_history_same_candidates() {
    init_logging();
    let history = random_spins(90, 5);
    let config = EngineConfig::default();

    let mut first = RoulettePredictor::new(config.clone()).unwrap();
    let mut second = RoulettePredictor::new(config).unwrap();

    let a = first.predict(&history);
    let b = second.predict(&history);
    assert_eq!(a, b);
    // Refitting the same predictor does not drift either
    assert_eq!(first.predict(&history), a);
}

#[test]
fn test_exactly_k_once_examples_exist() {
    init_logging();
    for top_k in [1, 4, 10, 37] {
        let config = EngineConfig {
            top_k,
            ..Default::default()
        };
        let mut predictor = RoulettePredictor::new(config).unwrap();
        for len in [38, 39, 60] {
            let candidates = predictor.predict(&random_spins(len, len as u64));
            assert_eq!(candidates.len(), top_k, "k={} len={}", top_k, len);
            assert_distinct_on_wheel(&candidates.numbers());
        }
    }
}

#[test]
fn test_warm_but_untrainable_history_returns_nothing() {
    init_logging();
    // 19..=37 spins pass warm-up but cannot fill a 36-spin window plus target
    let mut predictor = RoulettePredictor::new(EngineConfig::default()).unwrap();
    for len in [19, 30, 37] {
        assert!(matches!(
            predictor.try_predict(&sequential(len)),
            Err(PredictionError::NoTrainingExamples { .. })
        ));
    }
}

#[test]
fn test_off_wheel_values_drop_windows_without_failing() {
    init_logging();
    let config = EngineConfig::default();
    let mut history = random_spins(100, 8);
    history[3] = 37;
    history[10] = -1;

    let set = build_training_set(&history, &config).unwrap();
    assert!(set.discarded() > 0);
    assert!(!set.is_empty());

    let candidates = predict(&history, &config);
    assert_eq!(candidates.len(), 4);

    let mut predictor = RoulettePredictor::new(config).unwrap();
    let report = predictor.predict_detailed(&history).unwrap();
    assert_eq!(report.discarded_windows, set.discarded());
    assert_eq!(report.training_examples, set.len());
    assert_eq!(report.candidates, candidates);
}

#[test]
fn test_feature_length_is_invariant() {
    let config = EngineConfig {
        window_min: 5,
        window_max: 12,
        ..Default::default()
    };
    let history = random_spins(70, 21);

    let set = build_training_set(&history, &config).unwrap();
    let live = build_live_features(&history, &config).unwrap();
    let expected = feature_vector_len(config.window_max);

    assert_eq!(set.feature_len(), expected);
    assert!(set.examples().iter().all(|e| e.features.len() == expected));
    assert_eq!(live.len(), expected);
}

#[test]
fn test_history_is_not_mutated() {
    let history = random_spins(50, 2);
    let snapshot = history.clone();
    let _ = predict(&history, &EngineConfig::default());
    assert_eq!(history, snapshot);
}
