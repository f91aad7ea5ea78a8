use rust_decimal::Decimal;
use tracing::debug;

use crate::RebatePolicy;
use crate::calculations::common::non_negative;

/// Applies the rebate in `policy` to `raw_tax`.
///
/// Income above the threshold leaves the tax unchanged. At or below it, the
/// policy's waiver is subtracted and the result is floored at zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::{RebatePolicy, apply_rebate};
///
/// let policy = RebatePolicy::tax_cap(dec!(500000), dec!(12500));
///
/// assert_eq!(apply_rebate(dec!(12500), dec!(500000), &policy), dec!(0));
/// assert_eq!(apply_rebate(dec!(22500), dec!(550000), &policy), dec!(22500));
/// ```
pub fn apply_rebate(
    raw_tax: Decimal,
    net_income: Decimal,
    policy: &RebatePolicy,
) -> Decimal {
    if !policy.is_eligible(net_income) {
        return raw_tax;
    }

    let waiver = policy.waiver(raw_tax, net_income);
    debug!(%net_income, %raw_tax, %waiver, "rebate applies");
    non_negative(raw_tax - waiver)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn new_regime_policy() -> RebatePolicy {
        RebatePolicy::proportional_cap(dec!(700000), dec!(0.3), dec!(25000))
    }

    fn old_regime_policy() -> RebatePolicy {
        RebatePolicy::tax_cap(dec!(500000), dec!(12500))
    }

    #[test]
    fn income_above_threshold_keeps_full_tax() {
        assert_eq!(
            apply_rebate(dec!(45000), dec!(950000), &new_regime_policy()),
            dec!(45000)
        );
        assert_eq!(
            apply_rebate(dec!(22500), dec!(550000), &old_regime_policy()),
            dec!(22500)
        );
    }

    #[test]
    fn proportional_rebate_zeroes_tax_at_threshold() {
        // Slab tax at exactly 7,00,000 is 20,000; waiver is min(2,10,000, 25,000).
        assert_eq!(
            apply_rebate(dec!(20000), dec!(700000), &new_regime_policy()),
            dec!(0)
        );
    }

    #[test]
    fn tax_cap_rebate_zeroes_tax_at_threshold() {
        assert_eq!(
            apply_rebate(dec!(12500), dec!(500000), &old_regime_policy()),
            dec!(0)
        );
    }

    #[test]
    fn rebate_never_produces_negative_tax() {
        assert_eq!(
            apply_rebate(dec!(100), dec!(310000), &new_regime_policy()),
            dec!(0)
        );
    }

    #[test]
    fn partial_waiver_when_cap_is_smaller_than_tax() {
        let policy = RebatePolicy::tax_cap(dec!(500000), dec!(5000));

        assert_eq!(apply_rebate(dec!(12500), dec!(500000), &policy), dec!(7500));
    }

    #[test]
    fn one_unit_above_threshold_gets_no_rebate() {
        assert_eq!(
            apply_rebate(dec!(20000.05), dec!(700001), &new_regime_policy()),
            dec!(20000.05)
        );
    }
}
