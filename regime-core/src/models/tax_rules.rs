//! Tax-year parameters for both regimes.
//!
//! Every statutory figure the engine uses lives here as data, so a new
//! assessment year is a configuration change rather than a code change.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{RebatePolicy, RebateRule, RegimeId, Slab, SlabTable};
use crate::calculations::compute_slab_tax;

/// Health and education cess for AY 2025-26.
pub const CESS_RATE: Decimal = dec!(0.04);

/// Standard deduction for salaried taxpayers, AY 2025-26.
pub const STANDARD_DEDUCTION: Decimal = dec!(50000);

/// Chapter VI-A ceiling under the Old regime, AY 2025-26.
pub const OLD_REGIME_DEDUCTION_CAP: Decimal = dec!(150000);

/// Errors found while validating [`TaxRules`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("cess rate must be between 0 and 1, got {0}")]
    InvalidCessRate(Decimal),

    #[error("standard deduction must be non-negative, got {0}")]
    InvalidStandardDeduction(Decimal),

    #[error("{regime} regime top rate must be between 0 and 1, got {rate}")]
    InvalidTopRate { regime: RegimeId, rate: Decimal },

    #[error("{regime} regime deduction cap must be non-negative, got {cap}")]
    InvalidDeductionCap { regime: RegimeId, cap: Decimal },

    #[error("{regime} regime rebate threshold must be non-negative, got {threshold}")]
    InvalidRebateThreshold { regime: RegimeId, threshold: Decimal },

    #[error("{regime} regime rebate cap must be non-negative, got {cap}")]
    InvalidRebateCap { regime: RegimeId, cap: Decimal },

    #[error("{regime} regime rebate income fraction must be between 0 and 1, got {fraction}")]
    InvalidRebateFraction { regime: RegimeId, fraction: Decimal },

    #[error(
        "{regime} regime rebate waives {waiver} at income {income} but slab tax is {tax}; \
         income at or below the threshold must owe nothing"
    )]
    RebateDoesNotCoverThreshold {
        regime: RegimeId,
        income: Decimal,
        tax: Decimal,
        waiver: Decimal,
    },
}

/// Regime-specific parameters consumed by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub slabs: SlabTable,

    /// Rate applied to income above the last slab bound.
    pub top_rate: Decimal,

    pub rebate: RebatePolicy,

    /// Ceiling on Chapter VI-A deductions; zero disallows them.
    #[serde(default)]
    pub deduction_cap: Decimal,
}

impl RegimeConfig {
    /// Validates rates, caps and the full-waiver property of the rebate.
    ///
    /// Slab tax and both rebate rules are piecewise linear in income, so
    /// checking every slab bound up to the threshold, plus the threshold
    /// itself, covers the whole range.
    pub fn validate(
        &self,
        regime: RegimeId,
    ) -> Result<(), RulesError> {
        if self.top_rate < Decimal::ZERO || self.top_rate > Decimal::ONE {
            return Err(RulesError::InvalidTopRate {
                regime,
                rate: self.top_rate,
            });
        }
        if self.deduction_cap < Decimal::ZERO {
            return Err(RulesError::InvalidDeductionCap {
                regime,
                cap: self.deduction_cap,
            });
        }
        if self.rebate.threshold < Decimal::ZERO {
            return Err(RulesError::InvalidRebateThreshold {
                regime,
                threshold: self.rebate.threshold,
            });
        }
        match self.rebate.rule {
            RebateRule::ProportionalCap {
                income_fraction,
                cap,
            } => {
                if income_fraction < Decimal::ZERO || income_fraction > Decimal::ONE {
                    return Err(RulesError::InvalidRebateFraction {
                        regime,
                        fraction: income_fraction,
                    });
                }
                if cap < Decimal::ZERO {
                    return Err(RulesError::InvalidRebateCap { regime, cap });
                }
            }
            RebateRule::TaxCap { cap } => {
                if cap < Decimal::ZERO {
                    return Err(RulesError::InvalidRebateCap { regime, cap });
                }
            }
        }

        let threshold = self.rebate.threshold;
        let checkpoints = self
            .slabs
            .iter()
            .map(|s| s.upper_bound)
            .filter(|bound| *bound < threshold)
            .chain(std::iter::once(threshold));

        for income in checkpoints {
            let tax = compute_slab_tax(income, &self.slabs, self.top_rate);
            let waiver = self.rebate.waiver(tax, income);
            if waiver < tax {
                return Err(RulesError::RebateDoesNotCoverThreshold {
                    regime,
                    income,
                    tax,
                    waiver,
                });
            }
        }

        Ok(())
    }
}

/// Complete parameter set for one assessment year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    pub assessment_year: String,
    pub cess_rate: Decimal,
    pub standard_deduction: Decimal,
    pub new_regime: RegimeConfig,
    pub old_regime: RegimeConfig,
}

impl TaxRules {
    /// Rules for assessment year 2025-26 (non-senior individuals).
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use regime_core::{RegimeId, TaxRules};
    ///
    /// let rules = TaxRules::ay_2025_26();
    ///
    /// assert_eq!(rules.cess_rate, dec!(0.04));
    /// assert_eq!(rules.regime(RegimeId::New).rebate.threshold, dec!(700000));
    /// assert_eq!(rules.regime(RegimeId::Old).deduction_cap, dec!(150000));
    /// assert!(rules.validate().is_ok());
    /// ```
    pub fn ay_2025_26() -> Self {
        Self {
            assessment_year: "2025-26".to_string(),
            cess_rate: CESS_RATE,
            standard_deduction: STANDARD_DEDUCTION,
            new_regime: RegimeConfig {
                slabs: new_regime_slabs(),
                top_rate: dec!(0.30),
                rebate: RebatePolicy::proportional_cap(dec!(700000), dec!(0.3), dec!(25000)),
                deduction_cap: Decimal::ZERO,
            },
            old_regime: RegimeConfig {
                slabs: old_regime_slabs(),
                top_rate: dec!(0.30),
                rebate: RebatePolicy::tax_cap(dec!(500000), dec!(12500)),
                deduction_cap: OLD_REGIME_DEDUCTION_CAP,
            },
        }
    }

    pub fn regime(
        &self,
        regime: RegimeId,
    ) -> &RegimeConfig {
        match regime {
            RegimeId::New => &self.new_regime,
            RegimeId::Old => &self.old_regime,
        }
    }

    pub fn regime_mut(
        &mut self,
        regime: RegimeId,
    ) -> &mut RegimeConfig {
        match regime {
            RegimeId::New => &mut self.new_regime,
            RegimeId::Old => &mut self.old_regime,
        }
    }

    /// Validates shared constants and both regime configurations.
    ///
    /// # Errors
    ///
    /// Returns the first [`RulesError`] found, checking the shared
    /// constants first and then the New and Old regimes in that order.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.cess_rate < Decimal::ZERO || self.cess_rate > Decimal::ONE {
            return Err(RulesError::InvalidCessRate(self.cess_rate));
        }
        if self.standard_deduction < Decimal::ZERO {
            return Err(RulesError::InvalidStandardDeduction(
                self.standard_deduction,
            ));
        }
        for regime in RegimeId::ALL {
            self.regime(regime).validate(regime)?;
        }
        Ok(())
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::ay_2025_26()
    }
}

// Built from constants known to satisfy the table invariants.
fn new_regime_slabs() -> SlabTable {
    SlabTable::new(vec![
        Slab::new(dec!(300000), dec!(0.00)),
        Slab::new(dec!(700000), dec!(0.05)),
        Slab::new(dec!(1000000), dec!(0.10)),
        Slab::new(dec!(1200000), dec!(0.15)),
        Slab::new(dec!(1500000), dec!(0.20)),
    ])
    .unwrap_or_else(|e| unreachable!("built-in new regime slabs are invalid: {e}"))
}

fn old_regime_slabs() -> SlabTable {
    SlabTable::new(vec![
        Slab::new(dec!(250000), dec!(0.00)),
        Slab::new(dec!(500000), dec!(0.05)),
        Slab::new(dec!(1000000), dec!(0.20)),
    ])
    .unwrap_or_else(|e| unreachable!("built-in old regime slabs are invalid: {e}"))
}

impl fmt::Display for TaxRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Assessment year {}", self.assessment_year)?;
        writeln!(f, "  cess rate: {}", self.cess_rate)?;
        writeln!(f, "  standard deduction: {}", self.standard_deduction)?;
        for regime in RegimeId::ALL {
            let config = self.regime(regime);
            writeln!(f, "  {}:", regime.label())?;
            let mut lower = Decimal::ZERO;
            for slab in &config.slabs {
                writeln!(
                    f,
                    "    {} - {}: {}",
                    lower, slab.upper_bound, slab.marginal_rate
                )?;
                lower = slab.upper_bound;
            }
            writeln!(f, "    above {}: {}", lower, config.top_rate)?;
            match config.rebate.rule {
                RebateRule::ProportionalCap {
                    income_fraction,
                    cap,
                } => writeln!(
                    f,
                    "    rebate up to {}: min(income x {}, {})",
                    config.rebate.threshold, income_fraction, cap
                )?,
                RebateRule::TaxCap { cap } => writeln!(
                    f,
                    "    rebate up to {}: min(tax, {})",
                    config.rebate.threshold, cap
                )?,
            }
            writeln!(f, "    chapter VI-A cap: {}", config.deduction_cap)?;
        }
        Ok(())
    }
}
