//! Progressive slab tax.
//!
//! Evaluates a piecewise-linear marginal-rate schedule: each band of income
//! is taxed only at its own rate, and income above the last stated bound is
//! taxed at the top rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::{Slab, SlabTable, compute_slab_tax};
//!
//! let table = SlabTable::new(vec![
//!     Slab::new(dec!(300000), dec!(0.00)),
//!     Slab::new(dec!(700000), dec!(0.05)),
//!     Slab::new(dec!(1000000), dec!(0.10)),
//! ])
//! .unwrap();
//!
//! // 4,00,000 at 5% plus 2,50,000 at 10%
//! assert_eq!(compute_slab_tax(dec!(950000), &table, dec!(0.30)), dec!(45000));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::SlabTable;

/// Computes exact, unrounded tax on `income` under `table`, with `top_rate`
/// applied above the table's last bound.
///
/// Zero or negative income yields zero. Rounding is left to the caller so
/// that it happens once, on the final liability.
pub fn compute_slab_tax(
    income: Decimal,
    table: &SlabTable,
    top_rate: Decimal,
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for slab in table {
        if income <= previous_bound {
            break;
        }
        let band_amount = income.min(slab.upper_bound) - previous_bound;
        tax += band_amount * slab.marginal_rate;
        trace!(
            upper_bound = %slab.upper_bound,
            rate = %slab.marginal_rate,
            %band_amount,
            "slab band taxed"
        );
        previous_bound = slab.upper_bound;
    }

    let last_bound = table.last_bound();
    if income > last_bound {
        tax += (income - last_bound) * top_rate;
    }

    tax
}
