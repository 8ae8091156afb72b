//! Official sector → formula family mapping.
//!
//! The table is configuration: callers may inject their own taxonomy. An id
//! missing from the table is a hard error, never a silent `Standard`.

use analysis_core::{AnalysisError, SectorProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slug of the BRVM official sector holding banks and insurers
pub const FINANCIAL_SERVICES_SLUG: &str = "services-financiers";

/// BRVM official sectors outside financial services
const BRVM_STANDARD_SLUGS: &[&str] = &[
    "consommation-de-base",
    "consommation-discretionnaire",
    "energie",
    "industriels",
    "services-publics",
    "telecommunications",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SectorEntry {
    sector: String,
    profile: SectorProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorProfileResolver {
    table: HashMap<String, SectorProfile>,
}

impl SectorProfileResolver {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SectorProfile)>,
        S: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(sector, profile)| (normalize(&sector.into()), profile))
                .collect(),
        }
    }

    /// Load a table from `[{"sector": "...", "profile": "financial_services"}, ...]`
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let entries: Vec<SectorEntry> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::ConfigError(format!("invalid sector table: {}", e)))?;
        if entries.is_empty() {
            return Err(AnalysisError::ConfigError("sector table is empty".to_string()));
        }
        Ok(Self::from_entries(entries.into_iter().map(|e| (e.sector, e.profile))))
    }

    pub fn insert(&mut self, sector: impl Into<String>, profile: SectorProfile) {
        self.table.insert(normalize(&sector.into()), profile);
    }

    pub fn resolve(&self, official_sector_id: &str) -> Result<SectorProfile, AnalysisError> {
        self.table
            .get(&normalize(official_sector_id))
            .copied()
            .ok_or_else(|| AnalysisError::UnknownSector(official_sector_id.to_string()))
    }

    pub fn is_known(&self, official_sector_id: &str) -> bool {
        self.table.contains_key(&normalize(official_sector_id))
    }

    /// Known sector ids, sorted
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = self.table.keys().map(String::as_str).collect();
        sectors.sort_unstable();
        sectors
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for SectorProfileResolver {
    /// The BRVM official taxonomy
    fn default() -> Self {
        let mut resolver = Self::from_entries(BRVM_STANDARD_SLUGS.iter().map(|s| (*s, SectorProfile::Standard)));
        resolver.insert(FINANCIAL_SERVICES_SLUG, SectorProfile::FinancialServices);
        resolver
    }
}

fn normalize(sector: &str) -> String {
    sector.trim().to_lowercase()
}
