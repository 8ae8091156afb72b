//! Batch recalculation of sector benchmarks.
//!
//! One run covers a fiscal year and a list of sector buckets. A failing
//! company or bucket is recorded in the report and the run moves on.
//!
//! Indicator computation runs on the blocking pool, so `recalculate` must be
//! awaited inside a tokio runtime.

use analysis_core::{
    AnalysisError, BenchmarkKey, BenchmarkOutcome, BenchmarkStore, ClassificationScheme, IndicatorResult,
    StatementRecord, StatementStore,
};
use chrono::{DateTime, Utc};
use fundamental_analysis::FundamentalAnalysisEngine;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::aggregator::BenchmarkAggregator;
use crate::config::BenchmarkConfig;

/// One (scheme, sector) pair; years and horizons are added by the job
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorBucket {
    pub scheme: ClassificationScheme,
    pub sector_id: String,
}

impl SectorBucket {
    pub fn new(scheme: ClassificationScheme, sector_id: impl Into<String>) -> Self {
        Self {
            scheme,
            sector_id: sector_id.into(),
        }
    }

    pub fn official(sector_id: impl Into<String>) -> Self {
        Self::new(ClassificationScheme::Official, sector_id)
    }

    pub fn reclassified(sector_id: impl Into<String>) -> Self {
        Self::new(ClassificationScheme::Reclassified, sector_id)
    }
}

impl fmt::Display for SectorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scheme, self.sector_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFailure {
    pub company_id: String,
    pub year: i32,
    pub error: AnalysisError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketFailure {
    pub bucket: SectorBucket,
    pub error: AnalysisError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecalculationReport {
    pub year: i32,
    /// Keys written to the benchmark store
    pub written: Vec<BenchmarkKey>,
    /// Keys skipped for lack of contributing companies
    pub insufficient: Vec<BenchmarkKey>,
    pub company_failures: Vec<CompanyFailure>,
    pub bucket_failures: Vec<BucketFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RecalculationReport {
    fn new(year: i32) -> Self {
        let now = Utc::now();
        Self {
            year,
            written: Vec::new(),
            insufficient: Vec::new(),
            company_failures: Vec::new(),
            bucket_failures: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.company_failures.is_empty() || !self.bucket_failures.is_empty()
    }
}

pub struct RecalculationJob {
    statements: Arc<dyn StatementStore>,
    benchmarks: Arc<dyn BenchmarkStore>,
    engine: Arc<FundamentalAnalysisEngine>,
    aggregator: BenchmarkAggregator,
    config: BenchmarkConfig,
}

impl RecalculationJob {
    pub fn new(
        statements: Arc<dyn StatementStore>,
        benchmarks: Arc<dyn BenchmarkStore>,
        engine: FundamentalAnalysisEngine,
        config: BenchmarkConfig,
    ) -> Self {
        Self {
            statements,
            benchmarks,
            engine: Arc::new(engine),
            aggregator: BenchmarkAggregator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Official buckets for every sector the engine's resolver knows
    pub fn official_buckets(&self) -> Vec<SectorBucket> {
        self.engine
            .resolver()
            .sectors()
            .into_iter()
            .map(SectorBucket::official)
            .collect()
    }

    /// Recompute and store the benchmarks of `buckets` for `year`, under every
    /// configured horizon.
    pub async fn recalculate(&self, year: i32, buckets: &[SectorBucket]) -> RecalculationReport {
        tracing::info!("Recalculating {} sector buckets for {}", buckets.len(), year);
        let mut report = RecalculationReport::new(year);

        for bucket in buckets {
            if !self.config.schemes.contains(&bucket.scheme) {
                tracing::debug!("Skipping {}: scheme not configured", bucket);
                continue;
            }
            if let Err(e) = self.recalculate_bucket(year, bucket, &mut report).await {
                tracing::warn!("Bucket {} failed for {}: {}", bucket, year, e);
                report.bucket_failures.push(BucketFailure {
                    bucket: bucket.clone(),
                    error: e,
                });
            }
        }

        report.finished_at = Utc::now();
        tracing::info!(
            "Recalculation {} done: {} written, {} insufficient, {} company failures, {} bucket failures",
            year,
            report.written.len(),
            report.insufficient.len(),
            report.company_failures.len(),
            report.bucket_failures.len()
        );
        report
    }

    async fn recalculate_bucket(
        &self,
        year: i32,
        bucket: &SectorBucket,
        report: &mut RecalculationReport,
    ) -> Result<(), AnalysisError> {
        let statements = self
            .statements
            .fetch_statements_for_sector(bucket.scheme, &bucket.sector_id, year)
            .await?;

        let mut pairs: Vec<(StatementRecord, Option<StatementRecord>)> = Vec::with_capacity(statements.len());
        for statement in statements {
            match self.statements.fetch_statement(&statement.company_id, year - 1).await {
                Ok(previous) => pairs.push((statement, Some(previous))),
                Err(AnalysisError::StatementNotFound { .. }) => pairs.push((statement, None)),
                Err(e) => {
                    tracing::warn!("{}: prior statement for {} unavailable: {}", bucket, statement.company_id, e);
                    report.company_failures.push(CompanyFailure {
                        company_id: statement.company_id,
                        year,
                        error: e,
                    });
                }
            }
        }

        // rayon fan-out kept off the async worker threads
        let engine = self.engine.clone();
        let computed: Vec<(String, Result<IndicatorResult, AnalysisError>)> =
            tokio::task::spawn_blocking(move || {
                pairs
                    .par_iter()
                    .map(|(current, previous)| {
                        (
                            current.company_id.clone(),
                            engine.calculate_indicators(current, previous.as_ref()),
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .await
            .map_err(|e| AnalysisError::TaskFailed(e.to_string()))?;

        let mut results = Vec::with_capacity(computed.len());
        for (company_id, outcome) in computed {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!("{}: skipping {}: {}", bucket, company_id, e);
                    report.company_failures.push(CompanyFailure {
                        company_id,
                        year,
                        error: e,
                    });
                }
            }
        }

        for horizon in &self.config.horizons {
            let outcome = self
                .aggregator
                .aggregate(&results, bucket.scheme, &bucket.sector_id, year, *horizon);
            match outcome {
                BenchmarkOutcome::Produced(benchmark) => {
                    let stored = self.benchmarks.put(benchmark).await?;
                    report.written.push(stored.benchmark.key);
                }
                BenchmarkOutcome::InsufficientSample { key, .. } => report.insufficient.push(key),
            }
        }

        Ok(())
    }
}
