//! Sector benchmarks over computed indicators.
//!
//! Aggregates indicator results per (scheme, sector, year, horizon) bucket,
//! compares single companies against a benchmark and drives batch
//! recalculation against pluggable statement and benchmark stores.

pub mod aggregator;
pub mod comparison;
pub mod config;
pub mod recalculation;
pub mod store;

#[cfg(test)]
mod tests;

pub use aggregator::BenchmarkAggregator;
pub use comparison::{compare, IndicatorComparison, RelativePosition};
pub use config::BenchmarkConfig;
pub use recalculation::{BucketFailure, CompanyFailure, RecalculationJob, RecalculationReport, SectorBucket};
pub use store::{InMemoryBenchmarkStore, InMemoryStatementStore};
