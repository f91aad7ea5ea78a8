//! Liability under a single regime.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable income: gross salary - HRA - standard deduction + other income (minimum 0) |
//! | 2    | Net taxable income: step 1 - min(Chapter VI-A deductions, regime cap) (minimum 0) |
//! | 3    | Slab tax on step 2 (exact) |
//! | 4    | Rebate, when step 2 is at or below the regime threshold |
//! | 5    | Cess: step 4 x cess rate (exact) |
//! | 6    | Round step 4 and step 4 + step 5 to whole units |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::{IncomeInputs, RegimeEvaluator, RegimeId, TaxRules};
//!
//! let rules = TaxRules::ay_2025_26();
//! let evaluator = RegimeEvaluator::from_rules(&rules, RegimeId::Old);
//!
//! let result = evaluator.evaluate(&IncomeInputs::new(dec!(600000), dec!(0), dec!(0)));
//!
//! assert_eq!(result.net_taxable_income, dec!(550000));
//! assert_eq!(result.tax_before_cess, dec!(22500));
//! assert_eq!(result.cess, dec!(900));
//! assert_eq!(result.total_liability, dec!(23400));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_to_unit};
use crate::calculations::{apply_rebate, compute_slab_tax};
use crate::{IncomeInputs, RegimeConfig, RegimeId, RegimeResult, TaxRules};

/// Evaluator for one regime's liability.
///
/// Holds the regime parameters and the shared constants; each call to
/// [`RegimeEvaluator::evaluate`] is independent of every other.
#[derive(Debug, Clone)]
pub struct RegimeEvaluator<'a> {
    regime: RegimeId,
    config: &'a RegimeConfig,
    standard_deduction: Decimal,
    cess_rate: Decimal,
}

impl<'a> RegimeEvaluator<'a> {
    pub fn new(
        regime: RegimeId,
        config: &'a RegimeConfig,
        standard_deduction: Decimal,
        cess_rate: Decimal,
    ) -> Self {
        Self {
            regime,
            config,
            standard_deduction,
            cess_rate,
        }
    }

    /// Creates an evaluator for `regime` using the shared constants in `rules`.
    pub fn from_rules(
        rules: &'a TaxRules,
        regime: RegimeId,
    ) -> Self {
        Self::new(
            regime,
            rules.regime(regime),
            rules.standard_deduction,
            rules.cess_rate,
        )
    }

    pub fn regime(&self) -> RegimeId {
        self.regime
    }

    /// Evaluates liability for `inputs`, which must already be non-negative.
    pub fn evaluate(
        &self,
        inputs: &IncomeInputs,
    ) -> RegimeResult {
        let taxable_income =
            self.taxable_income(inputs.gross_salary, inputs.other_income, inputs.hra_claimed);
        let net_taxable_income =
            self.net_taxable_income(taxable_income, inputs.chapter_via_deductions);

        let slab_tax = compute_slab_tax(net_taxable_income, &self.config.slabs, self.config.top_rate);
        let rebate_applied = self.config.rebate.is_eligible(net_taxable_income);
        let tax_after_rebate = apply_rebate(slab_tax, net_taxable_income, &self.config.rebate);
        let cess = self.cess(tax_after_rebate);

        let result = RegimeResult {
            regime: self.regime,
            taxable_income,
            net_taxable_income,
            slab_tax,
            rebate: slab_tax - tax_after_rebate,
            rebate_applied,
            tax_before_cess: round_to_unit(tax_after_rebate),
            cess,
            total_liability: round_to_unit(tax_after_rebate + cess),
        };

        debug!(
            regime = %self.regime,
            taxable_income = %result.taxable_income,
            net_taxable_income = %result.net_taxable_income,
            slab_tax = %result.slab_tax,
            rebate = %result.rebate,
            total_liability = %result.total_liability,
            "regime evaluated"
        );

        result
    }

    /// Income after HRA and the standard deduction.
    fn taxable_income(
        &self,
        gross_salary: Decimal,
        other_income: Decimal,
        hra_claimed: Decimal,
    ) -> Decimal {
        non_negative(gross_salary - hra_claimed - self.standard_deduction + other_income)
    }

    /// Taxable income less Chapter VI-A deductions, capped per regime.
    fn net_taxable_income(
        &self,
        taxable_income: Decimal,
        deductions: Decimal,
    ) -> Decimal {
        let allowed = deductions.min(self.config.deduction_cap);
        non_negative(taxable_income - non_negative(allowed))
    }

    fn cess(
        &self,
        tax_after_rebate: Decimal,
    ) -> Decimal {
        tax_after_rebate * self.cess_rate
    }
}

/// Evaluates `regime` for `inputs` under `rules`.
///
/// Shorthand for [`RegimeEvaluator::from_rules`] followed by
/// [`RegimeEvaluator::evaluate`].
pub fn evaluate_regime(
    inputs: &IncomeInputs,
    regime: RegimeId,
    rules: &TaxRules,
) -> RegimeResult {
    RegimeEvaluator::from_rules(rules, regime).evaluate(inputs)
}
