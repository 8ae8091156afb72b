//! Cross-year projection of indicators.
//!
//! Next year's value of an indicator is the recency-weighted mean of its
//! values over the last `window` fiscal years. The newest year weighs
//! `window`, the one before `window - 1`, and so on.

use analysis_core::{stats, AnalysisError, Category, IndicatorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of fiscal years looked back, newest included
    pub window: usize,
    /// Minimum number of yearly results required
    pub min_history: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 3,
            min_history: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedIndicator {
    pub value: Option<f64>,
    /// Years that carried a value for this indicator
    pub years_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorForecast {
    pub company_id: String,
    pub base_year: i32,
    pub target_year: i32,
    pub projections: BTreeMap<Category, BTreeMap<String, ProjectedIndicator>>,
}

impl IndicatorForecast {
    pub fn value(&self, category: Category, name: &str) -> Option<f64> {
        self.projections.get(&category)?.get(name)?.value
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrossYearForecastEvaluator {
    config: ForecastConfig,
}

impl CrossYearForecastEvaluator {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Project the year after the newest result in `series`.
    ///
    /// The series must belong to a single company with distinct years; order
    /// does not matter.
    pub fn project(&self, series: &[IndicatorResult]) -> Result<IndicatorForecast, AnalysisError> {
        if self.config.window == 0 {
            return Err(AnalysisError::ConfigError("forecast window must be positive".to_string()));
        }
        if series.len() < self.config.min_history.max(1) {
            return Err(AnalysisError::InsufficientData(format!(
                "{} yearly results, need at least {}",
                series.len(),
                self.config.min_history
            )));
        }

        let company_id = &series[0].company_id;
        if let Some(other) = series.iter().find(|r| &r.company_id != company_id) {
            return Err(AnalysisError::InvalidData(format!(
                "series mixes companies {} and {}",
                company_id, other.company_id
            )));
        }

        let mut ordered: Vec<&IndicatorResult> = series.iter().collect();
        ordered.sort_by_key(|r| r.year);
        if ordered.windows(2).any(|w| w[0].year == w[1].year) {
            return Err(AnalysisError::InvalidData(format!("duplicate fiscal year for {}", company_id)));
        }

        let base_year = ordered[ordered.len() - 1].year;
        let window = self.config.window as i64;

        let mut samples: BTreeMap<(Category, &'static str), Vec<(f64, f64)>> = BTreeMap::new();
        for result in &ordered {
            let weight = window - (base_year as i64 - result.year as i64);
            if weight <= 0 {
                continue;
            }
            for category in Category::all() {
                for (name, indicator) in result.entries(category) {
                    let entry = samples.entry((category, name)).or_default();
                    if let Some(v) = indicator.value {
                        entry.push((v, weight as f64));
                    }
                }
            }
        }

        let mut projections: BTreeMap<Category, BTreeMap<String, ProjectedIndicator>> = BTreeMap::new();
        for ((category, name), pairs) in samples {
            projections.entry(category).or_default().insert(
                name.to_string(),
                ProjectedIndicator {
                    value: stats::weighted_mean(&pairs),
                    years_used: pairs.len(),
                },
            );
        }

        tracing::debug!(
            "Projected {} indicators for {} ({} -> {})",
            projections.values().map(|m| m.len()).sum::<usize>(),
            company_id,
            base_year,
            base_year + 1
        );

        Ok(IndicatorForecast {
            company_id: company_id.clone(),
            base_year,
            target_year: base_year + 1,
            projections,
        })
    }
}
