use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{Category, ClassificationScheme, Horizon};

/// Identity of one benchmark bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BenchmarkKey {
    pub scheme: ClassificationScheme,
    pub sector_id: String,
    pub year: i32,
    pub horizon: Horizon,
}

impl BenchmarkKey {
    pub fn new(
        scheme: ClassificationScheme,
        sector_id: impl Into<String>,
        year: i32,
        horizon: Horizon,
    ) -> Self {
        Self {
            scheme,
            sector_id: sector_id.into(),
            year,
            horizon,
        }
    }
}

impl fmt::Display for BenchmarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.scheme, self.sector_id, self.year, self.horizon)
    }
}

/// Cross-sectional statistics of one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStats {
    pub mean: f64,
    /// Sample standard deviation (N-1); `None` with a single observation
    pub std_dev: Option<f64>,
    pub sample_size: usize,
}

/// Per-sector aggregate of indicator results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBenchmark {
    pub key: BenchmarkKey,
    /// Companies that contributed at least one indicator value
    pub contributors: usize,
    pub indicators: BTreeMap<Category, BTreeMap<String, IndicatorStats>>,
}

impl SectorBenchmark {
    pub fn stats(&self, category: Category, name: &str) -> Option<&IndicatorStats> {
        self.indicators.get(&category)?.get(name)
    }
}

/// Result of an aggregation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BenchmarkOutcome {
    Produced(SectorBenchmark),
    /// Too few companies in the bucket; nothing should be persisted
    InsufficientSample {
        key: BenchmarkKey,
        contributors: usize,
        required: usize,
    },
}

impl BenchmarkOutcome {
    pub fn key(&self) -> &BenchmarkKey {
        match self {
            BenchmarkOutcome::Produced(b) => &b.key,
            BenchmarkOutcome::InsufficientSample { key, .. } => key,
        }
    }

    pub fn benchmark(&self) -> Option<&SectorBenchmark> {
        match self {
            BenchmarkOutcome::Produced(b) => Some(b),
            BenchmarkOutcome::InsufficientSample { .. } => None,
        }
    }

    pub fn into_benchmark(self) -> Option<SectorBenchmark> {
        match self {
            BenchmarkOutcome::Produced(b) => Some(b),
            BenchmarkOutcome::InsufficientSample { .. } => None,
        }
    }
}

/// A benchmark as held by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBenchmark {
    pub benchmark: SectorBenchmark,
    /// Monotonic write sequence; the highest revision wins
    pub revision: u64,
    pub written_at: DateTime<Utc>,
}
