//! JSON file holding every observed spin.
//!
//! The file is an array of `SpinRecord`s in the order they were observed.
//! Merges append new records after the stored ones and skip records whose
//! timestamp is already stored, so a spin is never counted twice.

use crate::domain::roulette::{SpinHistory, SpinRecord};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Handles persistence of the spin history to disk.
pub struct HistoryFile {
    file_path: PathBuf,
}

impl HistoryFile {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads all records. A missing file is an empty history; so is a corrupt
    /// one, which gets rewritten on the next save.
    pub fn load(&self) -> Result<Vec<SpinRecord>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read history file {:?}", self.file_path))?;
        match serde_json::from_str::<Vec<SpinRecord>>(&content) {
            Ok(records) => {
                info!("Loaded {} spins from {:?}", records.len(), self.file_path);
                Ok(records)
            }
            Err(e) => {
                warn!(
                    "History file {:?} is empty or corrupt ({}). Starting over.",
                    self.file_path, e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Loads the stored records into a deduplicated session history
    pub fn load_history(&self) -> Result<SpinHistory> {
        Ok(SpinHistory::from_records(self.load()?))
    }

    /// Appends `records` after the stored history and writes it back.
    ///
    /// Stored order is never changed. Returns the number of records actually added.
    pub fn merge(&self, records: &[SpinRecord]) -> Result<usize> {
        let mut stored = self.load()?;
        let mut seen: HashSet<String> = stored.iter().filter_map(|r| r.timestamp.clone()).collect();

        let mut added = 0;
        for record in records {
            let is_new = match &record.timestamp {
                Some(ts) => seen.insert(ts.clone()),
                None => true,
            };
            if is_new {
                stored.push(record.clone());
                added += 1;
            }
        }

        self.save(&stored)?;
        Ok(added)
    }

    /// Overwrites the file with `records`
    pub fn save(&self, records: &[SpinRecord]) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create history directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(records).context("Failed to serialize spin history")?;

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp file")?;
        fs::rename(&temp_path, &self.file_path).context("Failed to rename temp file")?;

        info!("Saved {} spins to {:?}", records.len(), self.file_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file() -> (HistoryFile, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create test temp dir");
        let file = HistoryFile::new(dir.path().join("historico_resultados.json"));
        (file, dir)
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let (file, _dir) = create_test_file();
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_as_empty() {
        let (file, _dir) = create_test_file();
        fs::write(file.path(), "{ not json").unwrap();
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_merge_skips_known_timestamps_and_keeps_arrival_order() {
        let (file, _dir) = create_test_file();
        let first = vec![
            SpinRecord::new(12, "2025-01-01T10:01:00Z"),
            SpinRecord::new(7, "2025-01-01T10:00:00Z"),
        ];
        assert_eq!(file.merge(&first).unwrap(), 2);

        let second = vec![
            SpinRecord::new(12, "2025-01-01T10:01:00Z"),
            SpinRecord::new(30, "2025-01-01T10:02:00Z"),
        ];
        assert_eq!(file.merge(&second).unwrap(), 1);

        let numbers: Vec<Option<i64>> = file.load().unwrap().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![Some(12), Some(7), Some(30)]);
    }

    #[test]
    fn test_many_manual_spins_reload_in_typed_order() {
        let (file, _dir) = create_test_file();
        let typed: Vec<u8> = (1..=12).collect();

        let mut history = SpinHistory::new();
        history.append_manual(&typed);
        assert_eq!(file.merge(history.records()).unwrap(), 12);

        let expected: Vec<i64> = typed.iter().map(|&n| n as i64).collect();
        assert_eq!(file.load_history().unwrap().numbers(), expected);

        // A later session continues after the stored spins
        let mut history = file.load_history().unwrap();
        let before = history.len();
        history.append_manual(&[20, 21]);
        assert_eq!(file.merge(&history.records()[before..]).unwrap(), 2);

        let reloaded = file.load_history().unwrap().numbers();
        assert_eq!(reloaded.len(), 14);
        assert_eq!(&reloaded[..12], expected.as_slice());
        assert_eq!(&reloaded[12..], &[20, 21]);
    }

    #[test]
    fn test_load_history_feeds_engine_numbers() {
        let (file, _dir) = create_test_file();
        file.save(&[
            SpinRecord::new(1, "a"),
            SpinRecord::new(2, "b"),
            SpinRecord::new(2, "b"),
        ])
        .unwrap();

        let history = file.load_history().unwrap();
        assert_eq!(history.numbers(), vec![1, 2]);
    }
}
