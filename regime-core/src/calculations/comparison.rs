use tracing::info;

use crate::calculations::evaluate_regime;
use crate::{ComparisonOutcome, IncomeInputs, RegimeComparison, RegimeId, RegimeResult, TaxRules};

/// Picks the cheaper of two results.
///
/// `first` wins only when its total liability is strictly lower; on a tie
/// `second` is recommended. Savings is the absolute difference in total
/// liability.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::{IncomeInputs, RegimeId, TaxRules, compare, evaluate_regime};
///
/// let rules = TaxRules::ay_2025_26();
/// // Both regimes owe nothing at this income, so the tie goes to the second argument.
/// let inputs = IncomeInputs::new(dec!(500000), dec!(0), dec!(0));
/// let new_regime = evaluate_regime(&inputs, RegimeId::New, &rules);
/// let old_regime = evaluate_regime(&inputs, RegimeId::Old, &rules);
///
/// let outcome = compare(&new_regime, &old_regime);
///
/// assert_eq!(outcome.cheaper_regime, RegimeId::Old);
/// assert_eq!(outcome.savings, dec!(0));
/// ```
pub fn compare(
    first: &RegimeResult,
    second: &RegimeResult,
) -> ComparisonOutcome {
    let cheaper_regime = if first.total_liability < second.total_liability {
        first.regime
    } else {
        second.regime
    };

    ComparisonOutcome {
        cheaper_regime,
        savings: (first.total_liability - second.total_liability).abs(),
    }
}

/// Evaluates both regimes for `inputs` and recommends one.
///
/// Inputs are normalized first, so negative figures are treated as zero.
/// The Old regime is recommended whenever it is not strictly more
/// expensive than the New regime.
pub fn compare_regimes(
    inputs: &IncomeInputs,
    rules: &TaxRules,
) -> RegimeComparison {
    let inputs = inputs.normalized();

    let new_regime = evaluate_regime(&inputs, RegimeId::New, rules);
    let old_regime = evaluate_regime(&inputs, RegimeId::Old, rules);
    let outcome = compare(&new_regime, &old_regime);

    info!(
        assessment_year = %rules.assessment_year,
        recommended = %outcome.cheaper_regime,
        savings = %outcome.savings,
        "regimes compared"
    );

    RegimeComparison {
        new_regime,
        old_regime,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn result_with_total(
        regime: RegimeId,
        total_liability: Decimal,
    ) -> RegimeResult {
        RegimeResult {
            regime,
            taxable_income: dec!(0),
            net_taxable_income: dec!(0),
            slab_tax: dec!(0),
            rebate: dec!(0),
            rebate_applied: false,
            tax_before_cess: dec!(0),
            cess: dec!(0),
            total_liability,
        }
    }

    // =========================================================================
    // compare tests
    // =========================================================================

    #[test]
    fn compare_prefers_strictly_cheaper_first() {
        let new_regime = result_with_total(RegimeId::New, dec!(46800));
        let old_regime = result_with_total(RegimeId::Old, dec!(106600));

        let outcome = compare(&new_regime, &old_regime);

        assert_eq!(
            outcome,
            ComparisonOutcome {
                cheaper_regime: RegimeId::New,
                savings: dec!(59800),
            }
        );
    }

    #[test]
    fn compare_prefers_cheaper_second() {
        let new_regime = result_with_total(RegimeId::New, dec!(30000));
        let old_regime = result_with_total(RegimeId::Old, dec!(12000));

        let outcome = compare(&new_regime, &old_regime);

        assert_eq!(outcome.cheaper_regime, RegimeId::Old);
        assert_eq!(outcome.savings, dec!(18000));
    }

    #[test]
    fn compare_tie_goes_to_second() {
        let new_regime = result_with_total(RegimeId::New, dec!(5000));
        let old_regime = result_with_total(RegimeId::Old, dec!(5000));

        let outcome = compare(&new_regime, &old_regime);

        assert_eq!(outcome.cheaper_regime, RegimeId::Old);
        assert_eq!(outcome.savings, dec!(0));
    }

    #[test]
    fn compare_tie_follows_argument_order() {
        let new_regime = result_with_total(RegimeId::New, dec!(0));
        let old_regime = result_with_total(RegimeId::Old, dec!(0));

        assert_eq!(compare(&old_regime, &new_regime).cheaper_regime, RegimeId::New);
    }

    #[test]
    fn outcome_helpers() {
        let outcome = ComparisonOutcome {
            cheaper_regime: RegimeId::Old,
            savings: dec!(0),
        };

        assert_eq!(outcome.costlier_regime(), RegimeId::New);
        assert!(outcome.suggests_deduction_review());
    }

    // =========================================================================
    // compare_regimes tests
    // =========================================================================

    #[test]
    fn compare_regimes_recommends_new_for_six_lakh_salary() {
        let rules = TaxRules::default();
        let inputs = IncomeInputs::new(dec!(600000), dec!(0), dec!(0));

        let comparison = compare_regimes(&inputs, &rules);

        assert_eq!(comparison.new_regime.total_liability, dec!(0));
        assert_eq!(comparison.old_regime.total_liability, dec!(23400));
        assert_eq!(comparison.outcome.cheaper_regime, RegimeId::New);
        assert_eq!(comparison.outcome.savings, dec!(23400));
        assert!(!comparison.outcome.suggests_deduction_review());
        assert_eq!(comparison.recommended().regime, RegimeId::New);
    }

    #[test]
    fn compare_regimes_recommends_old_when_both_owe_nothing() {
        let rules = TaxRules::default();

        let comparison = compare_regimes(&IncomeInputs::default(), &rules);

        assert_eq!(comparison.outcome.cheaper_regime, RegimeId::Old);
        assert_eq!(comparison.outcome.savings, dec!(0));
    }

    #[test]
    fn compare_regimes_clamps_negative_inputs() {
        let rules = TaxRules::default();
        let inputs = IncomeInputs::new(dec!(1000000), dec!(-25000), dec!(-100000));

        let comparison = compare_regimes(&inputs, &rules);

        assert_eq!(comparison.new_regime.taxable_income, dec!(950000));
        assert_eq!(comparison.old_regime.taxable_income, dec!(950000));
    }

    #[test]
    fn compare_regimes_full_deductions_favour_old() {
        let rules = TaxRules::default();
        // Net old income 6,00,000 after 80C: 12,500 + 20,000 = 32,500 + 4% = 33,800.
        // New regime on 7,50,000: 20,000 + 5,000 = 25,000 + 4% = 26,000.
        let inputs = IncomeInputs::new(dec!(800000), dec!(0), dec!(0))
            .with_chapter_via_deductions(dec!(150000));

        let comparison = compare_regimes(&inputs, &rules);

        assert_eq!(comparison.old_regime.total_liability, dec!(33800));
        assert_eq!(comparison.new_regime.total_liability, dec!(26000));
        assert_eq!(comparison.outcome.cheaper_regime, RegimeId::New);
        assert_eq!(comparison.outcome.savings, dec!(7800));
    }

    #[test]
    fn compare_regimes_with_hra_favours_old() {
        let rules = TaxRules::default();
        // Taxable 5,50,000 in both; with 80C the old net is 4,00,000 (rebated).
        let inputs = IncomeInputs::new(dec!(900000), dec!(0), dec!(300000))
            .with_chapter_via_deductions(dec!(150000));

        let comparison = compare_regimes(&inputs, &rules);

        assert_eq!(comparison.new_regime.total_liability, dec!(0));
        assert_eq!(comparison.old_regime.total_liability, dec!(0));
        assert_eq!(comparison.outcome.cheaper_regime, RegimeId::Old);
    }

    #[test]
    fn result_lookup_by_regime() {
        let rules = TaxRules::default();
        let comparison = compare_regimes(&IncomeInputs::new(dec!(1000000), dec!(0), dec!(0)), &rules);

        assert_eq!(comparison.result(RegimeId::New), &comparison.new_regime);
        assert_eq!(comparison.result(RegimeId::Old), &comparison.old_regime);
    }
}
