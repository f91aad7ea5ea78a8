use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RegimeId;

/// Liability under one regime, produced once per evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub regime: RegimeId,

    /// Income after HRA and standard deduction, before Chapter VI-A deductions.
    pub taxable_income: Decimal,

    /// Income the slabs and the rebate threshold are applied to.
    pub net_taxable_income: Decimal,

    /// Exact slab tax before rebate.
    pub slab_tax: Decimal,

    /// Exact amount waived by the rebate.
    pub rebate: Decimal,

    /// Whether net income fell at or below the rebate threshold.
    pub rebate_applied: bool,

    /// Post-rebate tax, rounded to the whole currency unit.
    pub tax_before_cess: Decimal,

    /// Cess on the exact post-rebate tax.
    pub cess: Decimal,

    /// Post-rebate tax plus cess, rounded to the whole currency unit.
    pub total_liability: Decimal,
}

/// Which regime is recommended and by how much it saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub cheaper_regime: RegimeId,
    pub savings: Decimal,
}

impl ComparisonOutcome {
    pub fn costlier_regime(&self) -> RegimeId {
        self.cheaper_regime.other()
    }

    /// The Old regime is recommended on ties as well, because its deduction
    /// headroom is usually unexplored. Callers surface this as a prompt to
    /// review deductions.
    pub fn suggests_deduction_review(&self) -> bool {
        self.cheaper_regime == RegimeId::Old
    }
}

/// Both regime results plus the recommendation derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: RegimeResult,
    pub old_regime: RegimeResult,
    pub outcome: ComparisonOutcome,
}

impl RegimeComparison {
    pub fn result(
        &self,
        regime: RegimeId,
    ) -> &RegimeResult {
        match regime {
            RegimeId::New => &self.new_regime,
            RegimeId::Old => &self.old_regime,
        }
    }

    pub fn recommended(&self) -> &RegimeResult {
        self.result(self.outcome.cheaper_regime)
    }
}
