use std::fs;
use std::path::Path;

use regime_core::{RulesError, TaxRules};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid rules: {0}")]
    Invalid(#[from] RulesError),
}

/// Loader for tax-year rules stored as TOML.
///
/// Amounts and rates are written as strings so they parse exactly:
///
/// ```toml
/// assessment_year = "2025-26"
/// cess_rate = "0.04"
/// standard_deduction = "50000"
///
/// [old_regime]
/// top_rate = "0.30"
/// deduction_cap = "150000"
/// slabs = [
///     { upper_bound = "250000", marginal_rate = "0" },
///     { upper_bound = "500000", marginal_rate = "0.05" },
///     { upper_bound = "1000000", marginal_rate = "0.20" },
/// ]
/// rebate = { threshold = "500000", rule = { kind = "tax_cap", cap = "12500" } }
/// ```
pub struct RulesLoader;

impl RulesLoader {
    /// Parse and validate a rules document.
    pub fn from_toml_str(content: &str) -> Result<TaxRules, RulesLoadError> {
        let rules: TaxRules = toml::from_str(content)?;
        rules.validate()?;

        info!(assessment_year = %rules.assessment_year, "rules loaded");
        Ok(rules)
    }

    /// Read, parse and validate a rules file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<TaxRules, RulesLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
