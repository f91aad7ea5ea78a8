//! Common utility functions for regime calculations.
//!
//! This module provides the rounding policy and clamping helpers shared by
//! the slab engine and the regime evaluator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to the nearest whole currency unit, half away from zero.
///
/// Values at exactly .5 round up to the next unit for positive amounts,
/// matching the rounding the liability figures have always been reported with.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(45000.49)), dec!(45000));
/// assert_eq!(round_to_unit(dec!(45000.5)), dec!(45001));
/// assert_eq!(round_to_unit(dec!(-0.5)), dec!(-1)); // Away from zero
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-50000)), dec!(0));
/// assert_eq!(non_negative(dec!(950000)), dec!(950000));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
