use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest amount any input field may carry (10^15). Larger values are
/// clamped so that every sum and product in an evaluation stays in range.
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1000000000000000);

/// Raw income figures shared by both regime evaluations.
///
/// Missing or unparseable values are expected to arrive as zero; negative
/// and oversized values are clamped by [`IncomeInputs::normalized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeInputs {
    pub gross_salary: Decimal,
    pub other_income: Decimal,
    pub hra_claimed: Decimal,
    /// Combined Chapter VI-A style deductions (80C, 80D, ...).
    #[serde(default)]
    pub chapter_via_deductions: Decimal,
}

impl IncomeInputs {
    pub fn new(
        gross_salary: Decimal,
        other_income: Decimal,
        hra_claimed: Decimal,
    ) -> Self {
        Self {
            gross_salary,
            other_income,
            hra_claimed,
            chapter_via_deductions: Decimal::ZERO,
        }
    }

    pub fn with_chapter_via_deductions(
        mut self,
        deductions: Decimal,
    ) -> Self {
        self.chapter_via_deductions = deductions;
        self
    }

    /// Returns a copy with every field clamped to `0..=MAX_INPUT_AMOUNT`.
    pub fn normalized(&self) -> Self {
        Self {
            gross_salary: clamp_field("gross_salary", self.gross_salary),
            other_income: clamp_field("other_income", self.other_income),
            hra_claimed: clamp_field("hra_claimed", self.hra_claimed),
            chapter_via_deductions: clamp_field(
                "chapter_via_deductions",
                self.chapter_via_deductions,
            ),
        }
    }
}

fn clamp_field(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, %value, "negative input clamped to zero");
        Decimal::ZERO
    } else if value > MAX_INPUT_AMOUNT {
        warn!(field, %value, ceiling = %MAX_INPUT_AMOUNT, "oversized input clamped to ceiling");
        MAX_INPUT_AMOUNT
    } else {
        value
    }
}
