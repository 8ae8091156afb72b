//! Sector-aware financial ratio engine.
//!
//! Derives growth, profitability, payout, valuation and solidity indicators
//! from annual statements. Banks and insurers use net banking income as
//! revenue and their own solidity set; every other sector uses turnover.

pub mod calculator;
pub mod config;
pub mod forecast;
pub mod formulas;
pub mod sector_profile;
pub mod variant;

pub use calculator::RatioCalculator;
pub use config::CalculatorConfig;
pub use forecast::{CrossYearForecastEvaluator, ForecastConfig, IndicatorForecast, ProjectedIndicator};
pub use sector_profile::{SectorProfileResolver, FINANCIAL_SERVICES_SLUG};
pub use variant::VariantStrategy;

use analysis_core::{AnalysisError, IndicatorResult, SectorProfile, StatementRecord};

/// Resolves a statement's formula family and computes its indicators
#[derive(Debug, Clone, Default)]
pub struct FundamentalAnalysisEngine {
    resolver: SectorProfileResolver,
    config: CalculatorConfig,
}

impl FundamentalAnalysisEngine {
    pub fn new(resolver: SectorProfileResolver, config: CalculatorConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &SectorProfileResolver {
        &self.resolver
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn resolve_profile(&self, record: &StatementRecord) -> Result<SectorProfile, AnalysisError> {
        self.resolver.resolve(&record.sectors.official)
    }

    pub fn calculator_for(&self, record: &StatementRecord) -> Result<RatioCalculator, AnalysisError> {
        Ok(RatioCalculator::new(self.resolve_profile(record)?, self.config.clone()))
    }

    /// Indicators for year N, with year N-1 for growth when available.
    ///
    /// Fails only when the official sector is not in the resolver's table.
    pub fn calculate_indicators(
        &self,
        current: &StatementRecord,
        previous: Option<&StatementRecord>,
    ) -> Result<IndicatorResult, AnalysisError> {
        let calculator = self.calculator_for(current)?;
        Ok(calculator.calculate(current, previous))
    }
}
