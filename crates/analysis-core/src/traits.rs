use async_trait::async_trait;

use crate::{AnalysisError, BenchmarkKey, ClassificationScheme, SectorBenchmark, StatementRecord, StoredBenchmark};

/// Source of annual financial statements
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Returns `AnalysisError::StatementNotFound` when no statement exists
    async fn fetch_statement(&self, company_id: &str, year: i32) -> Result<StatementRecord, AnalysisError>;

    /// Every statement of the given year whose company sits in the sector under `scheme`
    async fn fetch_statements_for_sector(
        &self,
        scheme: ClassificationScheme,
        sector_id: &str,
        year: i32,
    ) -> Result<Vec<StatementRecord>, AnalysisError>;
}

/// Persistence for sector benchmarks, last write wins per key
#[async_trait]
pub trait BenchmarkStore: Send + Sync {
    /// Replace whatever is stored under the benchmark's key
    async fn put(&self, benchmark: SectorBenchmark) -> Result<StoredBenchmark, AnalysisError>;

    async fn get(&self, key: &BenchmarkKey) -> Result<Option<StoredBenchmark>, AnalysisError>;
}
