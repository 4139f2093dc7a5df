//! Wheelcast - next-spin candidates from a recorded roulette history
//!
//! # Usage
//! ```sh
//! cargo run -- --numbers "12 27 0 33 5" --save
//! cargo run -- --history spins.json --backtest
//! ```
//!
//! # Environment Variables
//! - `WHEELCAST_HISTORY_PATH` - History file (default: historico_resultados.json)
//! - `WHEELCAST_WINDOW_MIN` / `WHEELCAST_WINDOW_MAX` - Warm-up and window length
//! - `WHEELCAST_TOP_K` - Candidates per prediction (default: 4)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;
use wheelcast::application::ml::{RoulettePredictor, walk_forward};
use wheelcast::config::Config;
use wheelcast::domain::ml::TrainingScope;
use wheelcast::domain::roulette::PatternReport;
use wheelcast::infrastructure::persistence::{HistoryFile, parse_manual_numbers};

/// Spins shown in the recent-history line
const RECENT_SPINS: usize = 10;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON spin history
    #[arg(long)]
    history: Option<PathBuf>,

    /// Spins to append, separated by spaces (e.g. "12 27 0 33")
    #[arg(long)]
    numbers: Option<String>,

    /// Write appended spins back to the history file
    #[arg(long)]
    save: bool,

    /// Replay the history and report how often the next spin was a candidate
    #[arg(long)]
    backtest: bool,

    /// Minimum spins before predicting (warm-up is this plus one)
    #[arg(long)]
    window_min: Option<usize>,

    /// Spins per feature window
    #[arg(long)]
    window_max: Option<usize>,

    /// Number of candidates to return
    #[arg(long)]
    top_k: Option<usize>,

    /// Minimum class probability for the first selection pass
    #[arg(long)]
    threshold: Option<f64>,

    /// Train only on the most recent N examples. 0 = use all.
    #[arg(long)]
    trailing: Option<usize>,

    /// Random forest seed
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.history {
            config.history_path = path.clone();
        }
        let engine = &mut config.engine;
        if let Some(v) = self.window_min {
            engine.window_min = v;
        }
        if let Some(v) = self.window_max {
            engine.window_max = v;
        }
        if let Some(v) = self.top_k {
            engine.top_k = v;
        }
        if let Some(v) = self.threshold {
            engine.probability_threshold = v;
        }
        if let Some(v) = self.trailing {
            engine.training_scope = match v {
                0 => TrainingScope::Full,
                n => TrainingScope::Trailing(n),
            };
        }
        if let Some(v) = self.seed {
            engine.forest.seed = v;
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    args.apply(&mut config);

    let store = HistoryFile::new(&config.history_path);
    let mut history = store.load_history()?;

    if let Some(text) = &args.numbers {
        let numbers = parse_manual_numbers(text).context("Could not read manual numbers")?;
        let before = history.len();
        history.append_manual(&numbers);
        info!("Added {} manual spins", history.len() - before);

        if args.save {
            let new_records = &history.records()[before..];
            let added = store.merge(new_records)?;
            info!("Stored {} new spins in {:?}", added, store.path());
        }
    } else if args.save {
        warn!("--save given without --numbers; nothing to store");
    }

    let numbers = history.numbers();
    let mut predictor =
        RoulettePredictor::new(config.engine.clone()).context("Invalid engine configuration")?;
    info!(
        "Engine: {} (window {}..{}, k={})",
        predictor.classifier_name(),
        config.engine.window_min,
        config.engine.window_max,
        config.engine.top_k
    );

    let recent: Vec<String> = history
        .last_numbers(RECENT_SPINS)
        .iter()
        .map(|n| n.to_string())
        .collect();
    println!("Last spins: {}", recent.join(" "));

    match predictor.predict_detailed(&numbers) {
        Ok(report) => {
            if report.discarded_windows > 0 {
                warn!(
                    "Skipped {} windows holding numbers off the wheel",
                    report.discarded_windows
                );
            }
            println!(
                "Next {} candidates: {} (trained on {} examples)",
                report.candidates.len(),
                report.candidates,
                report.training_examples
            );
        }
        Err(e) if e.is_warming_up() => println!(
            "Waiting for enough spins to predict ({} of at least {})",
            numbers.len(),
            config.engine.warm_up()
        ),
        Err(e) => warn!("No candidates this round: {}", e),
    }

    match PatternReport::from_history(&numbers, config.engine.window_max) {
        Some(report) => {
            println!("Patterns on the last spin ({}):", report.outcome);
            for pattern in &report.patterns {
                println!("  - {}", pattern);
            }
        }
        None => println!("Patterns are shown once enough spins are recorded."),
    }

    if args.backtest {
        let tracker = walk_forward(&mut predictor, &numbers);
        println!("{}", tracker);
        if !tracker.hit_numbers().is_empty() {
            let hits: Vec<String> = tracker.hit_numbers().iter().map(|n| n.to_string()).collect();
            println!("Numbers hit: {}", hits.join(" "));
        }
    }

    Ok(())
}
