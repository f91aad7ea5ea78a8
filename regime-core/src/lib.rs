//! Income-tax liability under the New and Old regimes, and the
//! recommendation between them.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::{IncomeInputs, RegimeId, TaxRules, compare_regimes};
//!
//! let rules = TaxRules::ay_2025_26();
//! let inputs = IncomeInputs::new(dec!(1000000), dec!(0), dec!(0));
//!
//! let comparison = compare_regimes(&inputs, &rules);
//!
//! assert_eq!(comparison.new_regime.total_liability, dec!(46800));
//! assert_eq!(comparison.old_regime.total_liability, dec!(106600));
//! assert_eq!(comparison.outcome.cheaper_regime, RegimeId::New);
//! assert_eq!(comparison.outcome.savings, dec!(59800));
//! ```

pub mod calculations;
pub mod models;

pub use calculations::{
    RegimeEvaluator, apply_rebate, compare, compare_regimes, compute_slab_tax, evaluate_regime,
};
pub use models::*;
