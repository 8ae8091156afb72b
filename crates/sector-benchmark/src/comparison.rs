//! Company vs sector comparison for dashboard display.

use analysis_core::{stats, Category, IndicatorResult, SectorBenchmark};
use serde::{Deserialize, Serialize};

/// Band, in standard deviations, counted as in line with the sector
pub const IN_LINE_BAND: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativePosition {
    Above,
    InLine,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorComparison {
    pub category: Category,
    pub indicator: String,
    pub company_value: f64,
    pub sector_mean: f64,
    pub sector_std_dev: Option<f64>,
    pub z_score: Option<f64>,
    pub position: RelativePosition,
}

/// Compare every available indicator of `result` with the sector statistics.
/// Indicators missing on either side are left out.
pub fn compare(result: &IndicatorResult, benchmark: &SectorBenchmark) -> Vec<IndicatorComparison> {
    let mut comparisons = Vec::new();

    for category in Category::all() {
        for (name, indicator) in result.entries(category) {
            let (Some(value), Some(sector)) = (indicator.value, benchmark.stats(category, name)) else {
                continue;
            };

            let z_score = sector.std_dev.and_then(|sd| stats::z_score(value, sector.mean, sd));
            let position = match z_score {
                Some(z) if z > IN_LINE_BAND => RelativePosition::Above,
                Some(z) if z < -IN_LINE_BAND => RelativePosition::Below,
                Some(_) => RelativePosition::InLine,
                None if value > sector.mean => RelativePosition::Above,
                None if value < sector.mean => RelativePosition::Below,
                None => RelativePosition::InLine,
            };

            comparisons.push(IndicatorComparison {
                category,
                indicator: name.to_string(),
                company_value: value,
                sector_mean: sector.mean,
                sector_std_dev: sector.std_dev,
                z_score,
                position,
            });
        }
    }

    comparisons
}
