mod income_inputs;
mod rebate_policy;
mod regime_id;
mod regime_result;
mod slab_table;
mod tax_rules;

pub use income_inputs::{IncomeInputs, MAX_INPUT_AMOUNT};
pub use rebate_policy::{RebatePolicy, RebateRule};
pub use regime_id::RegimeId;
pub use regime_result::{ComparisonOutcome, RegimeComparison, RegimeResult};
pub use slab_table::{Slab, SlabTable, SlabTableError};
pub use tax_rules::{
    CESS_RATE, OLD_REGIME_DEDUCTION_CAP, RegimeConfig, RulesError, STANDARD_DEDUCTION, TaxRules,
};
