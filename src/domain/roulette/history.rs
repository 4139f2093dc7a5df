use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One observed spin as delivered by the results feed or typed in by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    /// Winning number; feeds occasionally publish rounds without one
    pub number: Option<i64>,
    #[serde(default = "default_color")]
    pub color: String,
    /// External round identifier used for deduplication
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub lucky_numbers: Vec<i64>,
}

fn default_color() -> String {
    "-".to_string()
}

impl SpinRecord {
    pub fn new(number: i64, timestamp: impl Into<String>) -> Self {
        Self {
            number: Some(number),
            color: default_color(),
            timestamp: Some(timestamp.into()),
            lucky_numbers: Vec::new(),
        }
    }

    /// Record for a number typed in by hand at position `index` of the history
    pub fn manual(number: u8, index: usize) -> Self {
        Self::new(number as i64, format!("manual_{}", index))
    }
}

/// Chronological, append-only session history
#[derive(Debug, Clone, Default)]
pub struct SpinHistory {
    records: Vec<SpinRecord>,
    seen: HashSet<String>,
}

impl SpinHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SpinRecord>) -> Self {
        let mut history = Self::new();
        for record in records {
            history.append(record);
        }
        history
    }

    /// Appends a record unless its timestamp was already seen.
    ///
    /// Returns `true` when the record was added.
    pub fn append(&mut self, record: SpinRecord) -> bool {
        if let Some(ts) = &record.timestamp {
            if !self.seen.insert(ts.clone()) {
                return false;
            }
        }
        self.records.push(record);
        true
    }

    /// Appends typed-in numbers, each stamped with its history position
    pub fn append_manual(&mut self, numbers: &[u8]) -> usize {
        let mut added = 0;
        for &number in numbers {
            let record = SpinRecord::manual(number, self.records.len());
            if self.append(record) {
                added += 1;
            }
        }
        added
    }

    pub fn records(&self) -> &[SpinRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw outcome sequence in chronological order, as consumed by the engine.
    /// Records without a number are skipped.
    pub fn numbers(&self) -> Vec<i64> {
        self.records.iter().filter_map(|r| r.number).collect()
    }

    /// The `n` most recent numbers
    pub fn last_numbers(&self, n: usize) -> Vec<i64> {
        let numbers = self.numbers();
        let start = numbers.len().saturating_sub(n);
        numbers[start..].to_vec()
    }
}
