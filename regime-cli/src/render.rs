//! Plain-text and JSON output.
//!
//! Figures are printed as bare numbers: no currency symbol, no grouping.

use regime_core::{RegimeComparison, RegimeResult, TaxRules};
use regime_data::ScenarioRow;
use serde::Serialize;

/// One scenario of a batch run, as written in JSON output.
#[derive(Debug, Serialize)]
pub struct BatchEntry<'a> {
    pub row: usize,
    pub label: Option<&'a str>,
    pub comparison: RegimeComparison,
}

impl<'a> BatchEntry<'a> {
    pub fn new(
        scenario: &'a ScenarioRow,
        comparison: &RegimeComparison,
    ) -> Self {
        Self {
            row: scenario.row,
            label: scenario.label.as_deref(),
            comparison: tidy_comparison(comparison),
        }
    }
}

/// Drops trailing zeros left over from rate multiplication (`1800.00`).
fn tidy_result(result: &RegimeResult) -> RegimeResult {
    RegimeResult {
        taxable_income: result.taxable_income.normalize(),
        net_taxable_income: result.net_taxable_income.normalize(),
        slab_tax: result.slab_tax.normalize(),
        rebate: result.rebate.normalize(),
        tax_before_cess: result.tax_before_cess.normalize(),
        cess: result.cess.normalize(),
        total_liability: result.total_liability.normalize(),
        ..result.clone()
    }
}

fn tidy_comparison(comparison: &RegimeComparison) -> RegimeComparison {
    let mut outcome = comparison.outcome;
    outcome.savings = outcome.savings.normalize();

    RegimeComparison {
        new_regime: tidy_result(&comparison.new_regime),
        old_regime: tidy_result(&comparison.old_regime),
        outcome,
    }
}

fn result_text(result: &RegimeResult) -> String {
    let rows = [
        ("taxable income", result.taxable_income),
        ("net taxable income", result.net_taxable_income),
        ("slab tax", result.slab_tax),
        ("rebate", result.rebate),
        ("tax before cess", result.tax_before_cess),
        ("cess", result.cess),
        ("total liability", result.total_liability),
    ];
    let mut out = format!("{}\n", result.regime.label());
    for (label, value) in rows {
        out.push_str(&format!("  {label:<20}{value}\n"));
    }
    out
}

/// Renders both regime results and the recommendation.
pub fn comparison_text(comparison: &RegimeComparison) -> String {
    let comparison = tidy_comparison(comparison);
    let outcome = &comparison.outcome;
    let hint = if outcome.suggests_deduction_review() {
        " (Check Deductions!)"
    } else {
        ""
    };

    format!(
        "{}{}Recommended: {}{hint}\nSavings: {}\n",
        result_text(&comparison.new_regime),
        result_text(&comparison.old_regime),
        outcome.cheaper_regime.label(),
        outcome.savings,
    )
}

/// Renders each scenario under a `== label ==` heading.
pub fn batch_text(entries: &[(&ScenarioRow, RegimeComparison)]) -> String {
    let mut out = String::new();
    for (index, (scenario, comparison)) in entries.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("== {} ==\n", scenario.display_label()));
        out.push_str(&comparison_text(comparison));
    }
    out
}

pub fn comparison_json(comparison: &RegimeComparison) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&tidy_comparison(comparison))
}

pub fn batch_json(entries: &[(&ScenarioRow, RegimeComparison)]) -> serde_json::Result<String> {
    let entries: Vec<BatchEntry<'_>> = entries
        .iter()
        .map(|(scenario, comparison)| BatchEntry::new(scenario, comparison))
        .collect();
    serde_json::to_string_pretty(&entries)
}

pub fn rules_text(rules: &TaxRules) -> String {
    rules.to_string()
}

pub fn rules_json(rules: &TaxRules) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rules)
}
