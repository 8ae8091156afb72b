//! Indicator result shapes.
//!
//! Every indicator keeps its numeric value and its display string side by
//! side. A missing value always formats to `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SectorProfile;

/// How an indicator is rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayFormat {
    /// `12.34%`
    Percent,
    /// `12.34x`
    Ratio,
    /// `12.34 FCFA`
    Currency(String),
}

impl DisplayFormat {
    pub fn render(&self, value: f64) -> String {
        match self {
            DisplayFormat::Percent => format!("{:.2}%", value),
            DisplayFormat::Ratio => format!("{:.2}x", value),
            DisplayFormat::Currency(code) => format!("{:.2} {}", value, code),
        }
    }

    /// Read a rendered string back into its number, ignoring the unit suffix
    pub fn parse(&self, rendered: &str) -> Option<f64> {
        let number = match self {
            DisplayFormat::Percent => rendered.strip_suffix('%')?,
            DisplayFormat::Ratio => rendered.strip_suffix('x')?,
            DisplayFormat::Currency(code) => rendered.strip_suffix(code.as_str())?.trim_end(),
        };
        number.parse().ok()
    }
}

/// A single computed indicator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub value: Option<f64>,
    pub formatted: Option<String>,
}

impl IndicatorValue {
    /// Non-finite values are treated as missing.
    pub fn new(value: Option<f64>, format: &DisplayFormat) -> Self {
        match value.filter(|v| v.is_finite()) {
            Some(v) => Self {
                value: Some(v),
                formatted: Some(format.render(v)),
            },
            None => Self::unavailable(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            value: None,
            formatted: None,
        }
    }

    pub fn percent(value: Option<f64>) -> Self {
        Self::new(value, &DisplayFormat::Percent)
    }

    pub fn ratio(value: Option<f64>) -> Self {
        Self::new(value, &DisplayFormat::Ratio)
    }

    pub fn currency(value: Option<f64>, code: &str) -> Self {
        Self::new(value, &DisplayFormat::Currency(code.to_string()))
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

/// The five indicator categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Growth,
    Profitability,
    Payout,
    Valuation,
    Solidity,
}

impl Category {
    pub fn all() -> [Self; 5] {
        [
            Self::Growth,
            Self::Profitability,
            Self::Payout,
            Self::Valuation,
            Self::Solidity,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::Profitability => "profitability",
            Self::Payout => "payout",
            Self::Valuation => "valuation",
            Self::Solidity => "solidity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which statement field stands for revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueKind {
    NetBankingIncome,
    Turnover,
}

impl RevenueKind {
    pub fn growth_key(&self) -> &'static str {
        match self {
            RevenueKind::NetBankingIncome => "net_banking_income_growth",
            RevenueKind::Turnover => "turnover_growth",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthIndicators {
    /// Field the revenue growth was measured on
    pub revenue_kind: RevenueKind,
    pub revenue: IndicatorValue,
    pub net_income: IndicatorValue,
    pub ebit: IndicatorValue,
    pub ebitda: IndicatorValue,
    pub capex: IndicatorValue,
}

impl GrowthIndicators {
    pub fn entries(&self) -> Vec<(&'static str, &IndicatorValue)> {
        vec![
            (self.revenue_kind.growth_key(), &self.revenue),
            ("net_income_growth", &self.net_income),
            ("ebit_growth", &self.ebit),
            ("ebitda_growth", &self.ebitda),
            ("capex_growth", &self.capex),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityIndicators {
    pub net_margin: IndicatorValue,
    pub ebitda_margin: IndicatorValue,
    pub operating_margin: IndicatorValue,
    pub return_on_equity: IndicatorValue,
    pub return_on_assets: IndicatorValue,
}

impl ProfitabilityIndicators {
    pub fn entries(&self) -> Vec<(&'static str, &IndicatorValue)> {
        vec![
            ("net_margin", &self.net_margin),
            ("ebitda_margin", &self.ebitda_margin),
            ("operating_margin", &self.operating_margin),
            ("return_on_equity", &self.return_on_equity),
            ("return_on_assets", &self.return_on_assets),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutIndicators {
    pub dividend_per_share: IndicatorValue,
    pub dividend_yield: IndicatorValue,
    pub payout_ratio: IndicatorValue,
}

impl PayoutIndicators {
    pub fn entries(&self) -> Vec<(&'static str, &IndicatorValue)> {
        vec![
            ("dividend_per_share", &self.dividend_per_share),
            ("dividend_yield", &self.dividend_yield),
            ("payout_ratio", &self.payout_ratio),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationIndicators {
    pub per: IndicatorValue,
    pub price_to_book: IndicatorValue,
    pub price_to_sales: IndicatorValue,
    pub ev_to_ebitda: IndicatorValue,
    /// Reserved for a future DCF / multiples model; always unavailable today
    pub target_price: IndicatorValue,
}

impl ValuationIndicators {
    pub fn entries(&self) -> Vec<(&'static str, &IndicatorValue)> {
        vec![
            ("per", &self.per),
            ("price_to_book", &self.price_to_book),
            ("price_to_sales", &self.price_to_sales),
            ("ev_to_ebitda", &self.ev_to_ebitda),
            ("target_price", &self.target_price),
        ]
    }
}

/// Solidity indicators for banks and insurers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSolidity {
    pub equity_to_assets: IndicatorValue,
    /// Loans / (deposits + equity), target below 1
    pub loans_to_resources: IndicatorValue,
    /// Prudential norm below 100%
    pub loan_to_deposit: IndicatorValue,
    pub debt_to_equity: IndicatorValue,
    pub cost_of_risk: IndicatorValue,
}

/// Solidity indicators for non-financial companies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardSolidity {
    /// Healthy below 50%
    pub debt_to_market_cap: IndicatorValue,
    pub debt_to_assets: IndicatorValue,
    /// Below 100% sound, 100-200% caution, above 200% high risk
    pub gearing: IndicatorValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile", rename_all = "snake_case")]
pub enum SolidityIndicators {
    FinancialServices(FinancialSolidity),
    Standard(StandardSolidity),
}

impl SolidityIndicators {
    pub fn entries(&self) -> Vec<(&'static str, &IndicatorValue)> {
        match self {
            SolidityIndicators::FinancialServices(s) => vec![
                ("equity_to_assets", &s.equity_to_assets),
                ("loans_to_resources", &s.loans_to_resources),
                ("loan_to_deposit", &s.loan_to_deposit),
                ("debt_to_equity", &s.debt_to_equity),
                ("cost_of_risk", &s.cost_of_risk),
            ],
            SolidityIndicators::Standard(s) => vec![
                ("debt_to_market_cap", &s.debt_to_market_cap),
                ("debt_to_assets", &s.debt_to_assets),
                ("gearing", &s.gearing),
            ],
        }
    }
}

/// Indicators for one company-year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub company_id: String,
    pub year: i32,
    pub profile: SectorProfile,
    pub growth: GrowthIndicators,
    pub profitability: ProfitabilityIndicators,
    pub payout: PayoutIndicators,
    pub valuation: ValuationIndicators,
    pub solidity: SolidityIndicators,
}

impl IndicatorResult {
    /// Named indicators of one category, in a stable order
    pub fn entries(&self, category: Category) -> Vec<(&'static str, &IndicatorValue)> {
        match category {
            Category::Growth => self.growth.entries(),
            Category::Profitability => self.profitability.entries(),
            Category::Payout => self.payout.entries(),
            Category::Valuation => self.valuation.entries(),
            Category::Solidity => self.solidity.entries(),
        }
    }

    pub fn value(&self, category: Category, name: &str) -> Option<f64> {
        self.entries(category)
            .into_iter()
            .find(|(key, _)| *key == name)
            .and_then(|(_, indicator)| indicator.value)
    }

    /// True when at least one indicator in any category has a value
    pub fn has_any_value(&self) -> bool {
        Category::all()
            .iter()
            .any(|c| self.entries(*c).iter().any(|(_, v)| v.is_available()))
    }
}
