//! Sector benchmark aggregation.
//!
//! Mean and sample standard deviation (N-1) of every indicator across the
//! companies of one bucket. Missing values are excluded per indicator, so
//! sample sizes can differ between indicators of the same benchmark.

use analysis_core::{
    stats, BenchmarkKey, BenchmarkOutcome, Category, ClassificationScheme, Horizon, IndicatorResult, IndicatorStats,
    SectorBenchmark,
};
use std::collections::{BTreeMap, HashSet};

use crate::config::BenchmarkConfig;

#[derive(Debug, Clone)]
pub struct BenchmarkAggregator {
    min_companies: usize,
}

impl BenchmarkAggregator {
    pub fn new(min_companies: usize) -> Self {
        Self { min_companies }
    }

    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.min_companies)
    }

    pub fn min_companies(&self) -> usize {
        self.min_companies
    }

    /// Aggregate the results of one sector bucket.
    ///
    /// Results from another fiscal year and results without a single value
    /// do not contribute. A company counts once: its first result carrying
    /// values is kept. Fewer contributors than the
    /// configured minimum yields `InsufficientSample`.
    pub fn aggregate(
        &self,
        results: &[IndicatorResult],
        scheme: ClassificationScheme,
        sector_id: &str,
        year: i32,
        horizon: Horizon,
    ) -> BenchmarkOutcome {
        let key = BenchmarkKey::new(scheme, sector_id, year, horizon);

        let mut seen = HashSet::new();
        let contributors: Vec<&IndicatorResult> = results
            .iter()
            .filter(|r| {
                if r.year != year {
                    tracing::warn!("{}: dropping {} result from {}", key, r.company_id, r.year);
                    return false;
                }
                if !r.has_any_value() {
                    return false;
                }
                if !seen.insert(r.company_id.as_str()) {
                    tracing::warn!("{}: duplicate result for {}", key, r.company_id);
                    return false;
                }
                true
            })
            .collect();

        if contributors.len() < self.min_companies {
            tracing::info!(
                "{}: insufficient sample ({} of {} companies)",
                key,
                contributors.len(),
                self.min_companies
            );
            return BenchmarkOutcome::InsufficientSample {
                key,
                contributors: contributors.len(),
                required: self.min_companies,
            };
        }

        let mut samples: BTreeMap<Category, BTreeMap<String, Vec<f64>>> = BTreeMap::new();
        for result in &contributors {
            for category in Category::all() {
                for (name, indicator) in result.entries(category) {
                    if let Some(v) = indicator.value {
                        samples
                            .entry(category)
                            .or_default()
                            .entry(name.to_string())
                            .or_default()
                            .push(v);
                    }
                }
            }
        }

        let indicators: BTreeMap<Category, BTreeMap<String, IndicatorStats>> = samples
            .into_iter()
            .map(|(category, by_name)| {
                let per_name: BTreeMap<String, IndicatorStats> = by_name
                    .into_iter()
                    .filter_map(|(name, values)| {
                        let mean = stats::mean(&values)?;
                        Some((
                            name,
                            IndicatorStats {
                                mean,
                                std_dev: stats::sample_std_dev(&values),
                                sample_size: values.len(),
                            },
                        ))
                    })
                    .collect();
                (category, per_name)
            })
            .collect();

        tracing::debug!("{}: benchmark over {} companies", key, contributors.len());

        BenchmarkOutcome::Produced(SectorBenchmark {
            key,
            contributors: contributors.len(),
            indicators,
        })
    }
}

impl Default for BenchmarkAggregator {
    fn default() -> Self {
        Self::from_config(&BenchmarkConfig::default())
    }
}
