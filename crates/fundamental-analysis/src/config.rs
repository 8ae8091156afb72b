use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Tunables for the ratio calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Currency code appended to monetary indicators
    pub currency: String,
    /// Prior-year values below this magnitude yield no growth rate
    pub growth_min_base: f64,
    /// Net income below this magnitude yields no payout ratio
    pub payout_min_net_income: f64,
    /// Relative tolerance of the balance-sheet data-quality check
    pub balance_tolerance: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            currency: "FCFA".to_string(),
            growth_min_base: 0.01,
            payout_min_net_income: 0.01,
            balance_tolerance: 0.01,
        }
    }
}

impl CalculatorConfig {
    /// Read overrides from the process environment. Loading a `.env` file
    /// is left to the binary.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            currency: env::var("RATIO_CURRENCY").unwrap_or(defaults.currency),
            growth_min_base: env::var("GROWTH_MIN_BASE")
                .unwrap_or_else(|_| defaults.growth_min_base.to_string())
                .parse()
                .context("GROWTH_MIN_BASE must be a number")?,
            payout_min_net_income: env::var("PAYOUT_MIN_NET_INCOME")
                .unwrap_or_else(|_| defaults.payout_min_net_income.to_string())
                .parse()
                .context("PAYOUT_MIN_NET_INCOME must be a number")?,
            balance_tolerance: env::var("BALANCE_TOLERANCE")
                .unwrap_or_else(|_| defaults.balance_tolerance.to_string())
                .parse()
                .context("BALANCE_TOLERANCE must be a number")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            anyhow::bail!("currency code must not be empty");
        }
        if self.growth_min_base < 0.0 || self.payout_min_net_income < 0.0 {
            anyhow::bail!("minimum bases must be non-negative");
        }
        if !(0.0..1.0).contains(&self.balance_tolerance) {
            anyhow::bail!("balance tolerance must be in [0, 1)");
        }
        Ok(())
    }
}
