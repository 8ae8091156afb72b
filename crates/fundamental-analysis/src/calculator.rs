use analysis_core::{
    GrowthIndicators, IndicatorResult, IndicatorValue, PayoutIndicators, ProfitabilityIndicators, SectorProfile,
    SolidityIndicators, StatementRecord, ValuationIndicators,
};

use crate::config::CalculatorConfig;
use crate::formulas::{
    ev_to_ebitda, growth_rate, payout_ratio, percentage, price_to_book, price_to_sales, target_price,
};
use crate::variant::VariantStrategy;

/// Ratio calculator for one formula family.
///
/// All operations are pure: missing operands and zero denominators produce
/// unavailable indicators, never errors.
#[derive(Debug, Clone)]
pub struct RatioCalculator {
    strategy: &'static VariantStrategy,
    config: CalculatorConfig,
}

impl RatioCalculator {
    pub fn new(profile: SectorProfile, config: CalculatorConfig) -> Self {
        Self {
            strategy: VariantStrategy::for_profile(profile),
            config,
        }
    }

    pub fn financial_services() -> Self {
        Self::new(SectorProfile::FinancialServices, CalculatorConfig::default())
    }

    pub fn standard() -> Self {
        Self::new(SectorProfile::Standard, CalculatorConfig::default())
    }

    pub fn profile(&self) -> SectorProfile {
        self.strategy.profile
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Revenue under this calculator's formula family
    pub fn revenue(&self, record: &StatementRecord) -> Option<f64> {
        (self.strategy.revenue)(record)
    }

    /// Compute all five categories for `current`, using `previous` for growth.
    ///
    /// A `previous` statement of another company, or of any year other than
    /// the one right before `current`, is ignored.
    pub fn calculate(&self, current: &StatementRecord, previous: Option<&StatementRecord>) -> IndicatorResult {
        for issue in current.quality_issues(self.config.balance_tolerance) {
            tracing::warn!("{} ({}): {}", current.company_id, current.year, issue);
        }

        let previous = previous.filter(|p| {
            let usable = p.company_id == current.company_id && p.year == current.year - 1;
            if !usable {
                tracing::warn!(
                    "Ignoring prior statement {} ({}) for {} ({})",
                    p.company_id,
                    p.year,
                    current.company_id,
                    current.year
                );
            }
            usable
        });

        tracing::debug!(
            "Calculating indicators for {} ({}) with {:?} formulas, prior year: {}",
            current.company_id,
            current.year,
            self.profile(),
            previous.is_some()
        );

        IndicatorResult {
            company_id: current.company_id.clone(),
            year: current.year,
            profile: self.profile(),
            growth: self.growth(current, previous),
            profitability: self.profitability(current),
            payout: self.payout(current),
            valuation: self.valuation(current),
            solidity: self.solidity(current),
        }
    }

    pub fn growth(&self, current: &StatementRecord, previous: Option<&StatementRecord>) -> GrowthIndicators {
        let min_base = self.config.growth_min_base;
        let rate = |field: fn(&StatementRecord) -> Option<f64>| {
            IndicatorValue::percent(previous.and_then(|p| growth_rate(field(current), field(p), min_base)))
        };

        GrowthIndicators {
            revenue_kind: self.strategy.revenue_kind,
            revenue: rate(self.strategy.revenue),
            net_income: rate(|r| r.net_income),
            ebit: rate(|r| r.ebit),
            ebitda: rate(|r| r.ebitda),
            capex: rate(|r| r.capex),
        }
    }

    pub fn profitability(&self, current: &StatementRecord) -> ProfitabilityIndicators {
        let revenue = self.revenue(current);

        ProfitabilityIndicators {
            net_margin: IndicatorValue::percent(percentage(current.net_income, revenue)),
            ebitda_margin: IndicatorValue::percent(percentage(current.ebitda, revenue)),
            operating_margin: IndicatorValue::percent(percentage(current.ebit, revenue)),
            return_on_equity: IndicatorValue::percent(percentage(current.net_income, current.equity)),
            return_on_assets: IndicatorValue::percent(percentage(current.net_income, current.total_assets)),
        }
    }

    pub fn payout(&self, current: &StatementRecord) -> PayoutIndicators {
        PayoutIndicators {
            dividend_per_share: IndicatorValue::currency(current.dividend_per_share, &self.config.currency),
            dividend_yield: IndicatorValue::percent(percentage(current.dividend_per_share, current.share_price)),
            payout_ratio: IndicatorValue::percent(payout_ratio(
                current.gross_dividends,
                current.net_income,
                self.config.payout_min_net_income,
            )),
        }
    }

    pub fn valuation(&self, current: &StatementRecord) -> ValuationIndicators {
        ValuationIndicators {
            per: IndicatorValue::ratio(current.per),
            price_to_book: IndicatorValue::ratio(price_to_book(
                current.share_price,
                current.equity,
                current.share_count,
            )),
            price_to_sales: IndicatorValue::ratio(price_to_sales(
                current.share_price,
                self.revenue(current),
                current.share_count,
            )),
            ev_to_ebitda: IndicatorValue::ratio(ev_to_ebitda(
                current.share_price,
                current.share_count,
                current.total_debt,
                current.ebitda,
            )),
            target_price: IndicatorValue::currency(target_price(), &self.config.currency),
        }
    }

    pub fn solidity(&self, current: &StatementRecord) -> SolidityIndicators {
        (self.strategy.solidity)(current, &self.config)
    }
}
