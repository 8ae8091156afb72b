//! The two points where the formula families differ: which field is revenue,
//! and which solidity indicators apply.

use analysis_core::{
    FinancialSolidity, IndicatorValue, RevenueKind, SectorProfile, SolidityIndicators, StandardSolidity,
    StatementRecord,
};

use crate::config::CalculatorConfig;
use crate::formulas::{market_cap, percentage, safe_div};

/// Variant-specific behavior plugged into the shared calculator
pub struct VariantStrategy {
    pub profile: SectorProfile,
    pub revenue_kind: RevenueKind,
    pub revenue: fn(&StatementRecord) -> Option<f64>,
    pub solidity: fn(&StatementRecord, &CalculatorConfig) -> SolidityIndicators,
}

pub static FINANCIAL_SERVICES: VariantStrategy = VariantStrategy {
    profile: SectorProfile::FinancialServices,
    revenue_kind: RevenueKind::NetBankingIncome,
    revenue: net_banking_income,
    solidity: financial_solidity,
};

pub static STANDARD: VariantStrategy = VariantStrategy {
    profile: SectorProfile::Standard,
    revenue_kind: RevenueKind::Turnover,
    revenue: turnover,
    solidity: standard_solidity,
};

impl std::fmt::Debug for VariantStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantStrategy")
            .field("profile", &self.profile)
            .field("revenue_kind", &self.revenue_kind)
            .finish()
    }
}

impl VariantStrategy {
    pub fn for_profile(profile: SectorProfile) -> &'static VariantStrategy {
        match profile {
            SectorProfile::FinancialServices => &FINANCIAL_SERVICES,
            SectorProfile::Standard => &STANDARD,
        }
    }
}

fn net_banking_income(r: &StatementRecord) -> Option<f64> {
    r.net_banking_income
}

fn turnover(r: &StatementRecord) -> Option<f64> {
    r.turnover
}

fn financial_solidity(r: &StatementRecord, config: &CalculatorConfig) -> SolidityIndicators {
    let resources = match (r.customer_deposits, r.equity) {
        (Some(deposits), Some(equity)) => Some(deposits + equity),
        _ => None,
    };

    SolidityIndicators::FinancialServices(FinancialSolidity {
        equity_to_assets: IndicatorValue::percent(percentage(r.equity, r.total_assets)),
        loans_to_resources: IndicatorValue::ratio(safe_div(r.customer_loans, resources)),
        loan_to_deposit: IndicatorValue::percent(percentage(r.customer_loans, r.customer_deposits)),
        debt_to_equity: IndicatorValue::percent(percentage(r.total_debt, r.equity)),
        cost_of_risk: IndicatorValue::currency(r.cost_of_risk, &config.currency),
    })
}

fn standard_solidity(r: &StatementRecord, _config: &CalculatorConfig) -> SolidityIndicators {
    SolidityIndicators::Standard(StandardSolidity {
        debt_to_market_cap: IndicatorValue::percent(percentage(
            r.total_debt,
            market_cap(r.share_price, r.share_count),
        )),
        debt_to_assets: IndicatorValue::percent(percentage(r.total_debt, r.total_assets)),
        gearing: IndicatorValue::percent(percentage(r.total_debt, r.equity)),
    })
}
