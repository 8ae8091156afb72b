use analysis_core::{ClassificationScheme, Horizon};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Companies required before a bucket's benchmark is produced
    pub min_companies: usize,
    /// Horizons each bucket is keyed under
    pub horizons: Vec<Horizon>,
    /// Classification schemes recalculated by batch jobs
    pub schemes: Vec<ClassificationScheme>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            min_companies: 3,
            horizons: Horizon::all().to_vec(),
            schemes: ClassificationScheme::all().to_vec(),
        }
    }
}

impl BenchmarkConfig {
    /// Read overrides from the process environment; `.env` loading is the
    /// caller's concern.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let min_companies = match env::var("BENCHMARK_MIN_COMPANIES") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("BENCHMARK_MIN_COMPANIES must be a positive integer")?,
            Err(_) => defaults.min_companies,
        };

        let horizons = match env::var("BENCHMARK_HORIZONS") {
            Ok(raw) => parse_horizons(&raw)?,
            Err(_) => defaults.horizons,
        };

        let config = Self {
            min_companies,
            horizons,
            schemes: defaults.schemes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_companies == 0 {
            anyhow::bail!("min_companies must be at least 1");
        }
        if self.horizons.is_empty() {
            anyhow::bail!("at least one horizon is required");
        }
        if self.schemes.is_empty() {
            anyhow::bail!("at least one classification scheme is required");
        }
        Ok(())
    }
}

/// Parse a comma separated horizon list such as `short,medium,long`
pub fn parse_horizons(raw: &str) -> Result<Vec<Horizon>> {
    let mut horizons = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let horizon: Horizon = part.parse().with_context(|| format!("invalid horizon '{}'", part))?;
        if !horizons.contains(&horizon) {
            horizons.push(horizon);
        }
    }
    Ok(horizons)
}
