//! In-memory collaborators.
//!
//! `InMemoryBenchmarkStore` assigns the revision while holding the key's
//! shard lock, so the last completed write for a key is the one read back.

use analysis_core::{
    AnalysisError, BenchmarkKey, BenchmarkStore, ClassificationScheme, SectorBenchmark, StatementRecord,
    StatementStore, StoredBenchmark,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct InMemoryStatementStore {
    statements: DashMap<(String, i32), StatementRecord>,
}

impl InMemoryStatementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statements(statements: impl IntoIterator<Item = StatementRecord>) -> Self {
        let store = Self::new();
        for statement in statements {
            store.insert(statement);
        }
        store
    }

    /// Insert or replace the statement for its (company, year)
    pub fn insert(&self, statement: StatementRecord) {
        self.statements
            .insert((statement.company_id.clone(), statement.year), statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[async_trait]
impl StatementStore for InMemoryStatementStore {
    async fn fetch_statement(&self, company_id: &str, year: i32) -> Result<StatementRecord, AnalysisError> {
        self.statements
            .get(&(company_id.to_string(), year))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AnalysisError::StatementNotFound {
                company_id: company_id.to_string(),
                year,
            })
    }

    async fn fetch_statements_for_sector(
        &self,
        scheme: ClassificationScheme,
        sector_id: &str,
        year: i32,
    ) -> Result<Vec<StatementRecord>, AnalysisError> {
        let mut statements: Vec<StatementRecord> = self
            .statements
            .iter()
            .filter(|entry| {
                let statement = entry.value();
                statement.year == year && statement.sectors.sector_for(scheme) == Some(sector_id)
            })
            .map(|entry| entry.value().clone())
            .collect();
        statements.sort_by(|a, b| a.company_id.cmp(&b.company_id));
        Ok(statements)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBenchmarkStore {
    entries: DashMap<BenchmarkKey, StoredBenchmark>,
    sequence: AtomicU64,
}

impl InMemoryBenchmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every stored benchmark, ordered by key
    pub fn snapshot(&self) -> Vec<StoredBenchmark> {
        let mut all: Vec<StoredBenchmark> = self.entries.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.benchmark.key.cmp(&b.benchmark.key));
        all
    }

    fn stamp(&self, benchmark: SectorBenchmark) -> StoredBenchmark {
        StoredBenchmark {
            benchmark,
            revision: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            written_at: Utc::now(),
        }
    }
}

#[async_trait]
impl BenchmarkStore for InMemoryBenchmarkStore {
    async fn put(&self, benchmark: SectorBenchmark) -> Result<StoredBenchmark, AnalysisError> {
        // the shard stays locked from entry() until insert() returns
        let entry = self.entries.entry(benchmark.key.clone());
        let stored = self.stamp(benchmark);
        entry.insert(stored.clone());
        tracing::debug!("Stored benchmark {} (revision {})", stored.benchmark.key, stored.revision);
        Ok(stored)
    }

    async fn get(&self, key: &BenchmarkKey) -> Result<Option<StoredBenchmark>, AnalysisError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }
}
