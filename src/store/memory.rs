//! In-memory sample store.
//!
//! Samples are kept sorted ascending by timestamp so range queries are a pair
//! of binary searches and recent queries a reverse scan. The store is
//! append-only from the engine's point of view; retention is the deployer's
//! concern.

use crate::core::time::TimeRange;
use crate::store::types::Sample;
use crate::store::SampleStore;
use std::io::BufRead;
use std::path::Path;

/// Timestamp-ordered in-memory sample store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    // Invariant: ascending by timestamp, stable for equal timestamps.
    samples: Vec<Sample>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample, preserving timestamp order.
    ///
    /// Samples arriving with a timestamp equal to an existing one are placed
    /// after it, so insertion order breaks ties.
    pub fn record(&mut self, sample: Sample) {
        let at = self
            .samples
            .partition_point(|s| s.timestamp <= sample.timestamp);
        self.samples.insert(at, sample);
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Load a store from a JSON Lines file: one sample object per line,
    /// blank lines ignored.
    pub fn from_jsonl(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path).map_err(|e| StoreError::Io(e.to_string()))?;
        let mut store = Self::new();

        for (index, line) in std::io::BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| StoreError::Io(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let sample: Sample = serde_json::from_str(&line).map_err(|e| StoreError::Parse {
                line: index + 1,
                message: e.to_string(),
            })?;
            store.record(sample);
        }

        Ok(store)
    }
}

impl SampleStore for MemoryStore {
    fn fetch_range(&self, range: &TimeRange) -> Vec<Sample> {
        let from = self
            .samples
            .partition_point(|s| s.timestamp < range.start());
        let to = self.samples.partition_point(|s| s.timestamp < range.end());
        self.samples[from..to].to_vec()
    }

    fn fetch_recent(&self, limit: usize, directional_only: bool) -> Vec<Sample> {
        self.samples
            .iter()
            .rev()
            .filter(|s| !directional_only || s.is_directional())
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Sample store errors.
#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Parse { line: usize, message: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {e}"),
            StoreError::Parse { line, message } => write!(f, "Parse error on line {line}: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}
