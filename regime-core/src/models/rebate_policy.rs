use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much of the computed tax is waived for an eligible taxpayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RebateRule {
    /// Waive `min(net_income × income_fraction, cap)`.
    ProportionalCap { income_fraction: Decimal, cap: Decimal },

    /// Waive `min(tax, cap)`.
    TaxCap { cap: Decimal },
}

/// Threshold-triggered rebate.
///
/// Applies only when net taxable income is at or below `threshold`; the
/// waiver is taken after slab tax is summed and before cess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebatePolicy {
    pub threshold: Decimal,
    pub rule: RebateRule,
}

impl RebatePolicy {
    pub fn proportional_cap(
        threshold: Decimal,
        income_fraction: Decimal,
        cap: Decimal,
    ) -> Self {
        Self {
            threshold,
            rule: RebateRule::ProportionalCap {
                income_fraction,
                cap,
            },
        }
    }

    pub fn tax_cap(
        threshold: Decimal,
        cap: Decimal,
    ) -> Self {
        Self {
            threshold,
            rule: RebateRule::TaxCap { cap },
        }
    }

    /// Whether `net_income` qualifies for the rebate.
    pub fn is_eligible(
        &self,
        net_income: Decimal,
    ) -> bool {
        net_income <= self.threshold
    }

    /// Waiver the rule grants at the given income and raw tax, ignoring the
    /// threshold. Never negative for non-negative arguments.
    pub fn waiver(
        &self,
        raw_tax: Decimal,
        net_income: Decimal,
    ) -> Decimal {
        match self.rule {
            RebateRule::ProportionalCap {
                income_fraction,
                cap,
            } => (net_income * income_fraction).min(cap),
            RebateRule::TaxCap { cap } => raw_tax.min(cap),
        }
    }
}
