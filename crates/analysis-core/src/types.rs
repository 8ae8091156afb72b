use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AnalysisError;

/// Sector taxonomies attached to a listed company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorClassification {
    /// Official exchange sector slug (drives the formula set)
    pub official: String,
    /// Internal reclassified sector slug, when one has been assigned
    #[serde(default)]
    pub reclassified: Option<String>,
}

impl SectorClassification {
    pub fn new(official: impl Into<String>) -> Self {
        Self {
            official: official.into(),
            reclassified: None,
        }
    }

    pub fn with_reclassified(mut self, reclassified: impl Into<String>) -> Self {
        self.reclassified = Some(reclassified.into());
        self
    }

    /// Sector id under the given scheme
    pub fn sector_for(&self, scheme: ClassificationScheme) -> Option<&str> {
        match scheme {
            ClassificationScheme::Official => Some(self.official.as_str()),
            ClassificationScheme::Reclassified => self.reclassified.as_deref(),
        }
    }
}

/// Which of the two sector taxonomies a benchmark bucket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationScheme {
    Official,
    Reclassified,
}

impl ClassificationScheme {
    pub fn all() -> [Self; 2] {
        [Self::Official, Self::Reclassified]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Reclassified => "reclassified",
        }
    }
}

impl fmt::Display for ClassificationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formula family applied to a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorProfile {
    /// Banks and insurers: revenue is net banking income
    FinancialServices,
    /// Every other sector: revenue is turnover
    Standard,
}

/// Investment time-frame bucket used by downstream indicator weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Horizon {
    pub fn all() -> [Self; 3] {
        [Self::ShortTerm, Self::MediumTerm, Self::LongTerm]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" | "short_term" | "court_terme" => Ok(Self::ShortTerm),
            "medium" | "medium_term" | "moyen_terme" => Ok(Self::MediumTerm),
            "long" | "long_term" | "long_terme" => Ok(Self::LongTerm),
            other => Err(AnalysisError::ConfigError(format!("unknown horizon '{}'", other))),
        }
    }
}

/// One company's annual financial statement.
///
/// Every financial field is optional: the ingestion pipeline fills what the
/// published accounts expose. Exactly one of `net_banking_income` and
/// `turnover` is expected, depending on the sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub company_id: String,
    pub year: i32,
    pub sectors: SectorClassification,

    // Balance sheet
    pub total_fixed_assets: Option<f64>,
    pub current_assets: Option<f64>,
    pub total_assets: Option<f64>,
    pub customer_loans: Option<f64>,
    pub customer_deposits: Option<f64>,
    pub equity: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub total_debt: Option<f64>,

    // Income statement
    pub net_banking_income: Option<f64>,
    pub turnover: Option<f64>,
    pub value_added: Option<f64>,
    pub ebit: Option<f64>,
    pub ebitda: Option<f64>,
    pub pre_tax_income: Option<f64>,
    pub net_income: Option<f64>,
    pub cost_of_risk: Option<f64>,
    pub capex: Option<f64>,

    // Shareholder / market data
    pub gross_dividends: Option<f64>,
    pub share_count: Option<f64>,
    pub per: Option<f64>,
    pub dividend_per_share: Option<f64>,
    pub share_price: Option<f64>,
}

impl Default for SectorClassification {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Data-quality findings on a statement. Reported, never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataQualityIssue {
    /// Both net banking income and turnover are populated
    BothRevenueFields,
    /// Neither revenue field is populated
    MissingRevenue,
    /// Total assets deviate from equity + current liabilities + debt
    Unbalanced {
        total_assets: f64,
        liabilities_and_equity: f64,
        relative_gap: f64,
    },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothRevenueFields => f.write_str("both net banking income and turnover are set"),
            Self::MissingRevenue => f.write_str("no revenue field is set"),
            Self::Unbalanced {
                total_assets,
                liabilities_and_equity,
                relative_gap,
            } => write!(
                f,
                "unbalanced statement: assets {} vs liabilities+equity {} ({:.2}% gap)",
                total_assets,
                liabilities_and_equity,
                relative_gap * 100.0
            ),
        }
    }
}

impl StatementRecord {
    pub fn new(company_id: impl Into<String>, year: i32, sectors: SectorClassification) -> Self {
        Self {
            company_id: company_id.into(),
            year,
            sectors,
            ..Default::default()
        }
    }

    /// `total assets ≈ equity + current liabilities + total debt` within
    /// `tolerance` (relative). `None` when any operand is missing.
    pub fn is_balanced(&self, tolerance: f64) -> Option<bool> {
        self.balance_gap().map(|(_, _, gap)| gap <= tolerance)
    }

    fn balance_gap(&self) -> Option<(f64, f64, f64)> {
        let assets = self.total_assets?;
        let sum = self.equity? + self.current_liabilities? + self.total_debt?;
        if assets == 0.0 {
            return None;
        }
        Some((assets, sum, ((assets - sum) / assets).abs()))
    }

    /// Run the data-quality checks against this statement
    pub fn quality_issues(&self, balance_tolerance: f64) -> Vec<DataQualityIssue> {
        let mut issues = Vec::new();

        match (self.net_banking_income, self.turnover) {
            (Some(_), Some(_)) => issues.push(DataQualityIssue::BothRevenueFields),
            (None, None) => issues.push(DataQualityIssue::MissingRevenue),
            _ => {}
        }

        if let Some((total_assets, liabilities_and_equity, relative_gap)) = self.balance_gap() {
            if relative_gap > balance_tolerance {
                issues.push(DataQualityIssue::Unbalanced {
                    total_assets,
                    liabilities_and_equity,
                    relative_gap,
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced() -> StatementRecord {
        StatementRecord {
            total_assets: Some(1000.0),
            equity: Some(400.0),
            current_liabilities: Some(350.0),
            total_debt: Some(250.0),
            turnover: Some(800.0),
            ..StatementRecord::new("SNTS", 2023, SectorClassification::new("telecommunications"))
        }
    }

    #[test]
    fn test_balanced_statement_has_no_issues() {
        let record = balanced();
        assert_eq!(record.is_balanced(0.01), Some(true));
        assert!(record.quality_issues(0.01).is_empty());
    }

    #[test]
    fn test_unbalanced_statement_is_reported() {
        let mut record = balanced();
        record.total_assets = Some(1100.0);
        assert_eq!(record.is_balanced(0.01), Some(false));
        let issues = record.quality_issues(0.01);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], DataQualityIssue::Unbalanced { .. }));
    }

    #[test]
    fn test_balance_within_one_percent() {
        let mut record = balanced();
        record.total_assets = Some(1009.0);
        assert_eq!(record.is_balanced(0.01), Some(true));
    }

    #[test]
    fn test_balance_unknown_when_operand_missing() {
        let mut record = balanced();
        record.total_debt = None;
        assert_eq!(record.is_balanced(0.01), None);
    }

    #[test]
    fn test_revenue_field_checks() {
        let mut record = balanced();
        record.net_banking_income = Some(10.0);
        assert!(record.quality_issues(0.01).contains(&DataQualityIssue::BothRevenueFields));

        record.net_banking_income = None;
        record.turnover = None;
        assert!(record.quality_issues(0.01).contains(&DataQualityIssue::MissingRevenue));
    }

    #[test]
    fn test_sector_for_scheme() {
        let sectors = SectorClassification::new("services-financiers").with_reclassified("banques");
        assert_eq!(sectors.sector_for(ClassificationScheme::Official), Some("services-financiers"));
        assert_eq!(sectors.sector_for(ClassificationScheme::Reclassified), Some("banques"));
        assert_eq!(
            SectorClassification::new("energie").sector_for(ClassificationScheme::Reclassified),
            None
        );
    }

    #[test]
    fn test_horizon_parsing() {
        assert_eq!("short".parse::<Horizon>().unwrap(), Horizon::ShortTerm);
        assert_eq!("Moyen_Terme".parse::<Horizon>().unwrap(), Horizon::MediumTerm);
        assert_eq!("long_term".parse::<Horizon>().unwrap(), Horizon::LongTerm);
        assert!("decade".parse::<Horizon>().is_err());
    }
}
