//! Tax calculation for the New and Old regimes.
//!
//! This module provides the shared slab engine, rebate application, the
//! per-regime evaluator and the comparison that recommends a regime.

pub mod common;
mod comparison;
mod rebate;
mod regime;
mod slab_tax;

pub use comparison::{compare, compare_regimes};
pub use rebate::apply_rebate;
pub use regime::{RegimeEvaluator, evaluate_regime};
pub use slab_tax::compute_slab_tax;
