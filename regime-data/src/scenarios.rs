//! CSV loader for batches of income scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Empty
//! optional cells read as zero.
//!
//! | Column                   | Required | Type    | Notes                      |
//! |--------------------------|----------|---------|----------------------------|
//! | `label`                  | no       | string  | Shown next to the results  |
//! | `gross_salary`           | yes      | decimal | e.g. `1000000`             |
//! | `other_income`           | no       | decimal |                            |
//! | `hra_claimed`            | no       | decimal | HRA exemption claimed      |
//! | `chapter_via_deductions` | no       | decimal | 80C etc.; Old regime only  |
//!
//! ### Example
//!
//! ```csv
//! label,gross_salary,other_income,hra_claimed,chapter_via_deductions
//! junior,600000,,,
//! senior,1800000,25000,240000,150000
//! ```
use std::path::Path;

use regime_core::IncomeInputs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    gross_salary: Decimal,
    other_income: Option<Decimal>,
    hra_claimed: Option<Decimal>,
    chapter_via_deductions: Option<Decimal>,
}

/// One scenario read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioRow {
    /// 1-based data row (the header is row 0).
    pub row: usize,
    pub label: Option<String>,
    pub inputs: IncomeInputs,
}

impl ScenarioRow {
    /// The label, or `row N` when the file gave none.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("row {}", self.row),
        }
    }
}

/// Errors that can occur while loading a scenario batch.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad structure, missing `gross_salary`, or a non-numeric amount.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> ScenarioRow {
    let inputs = IncomeInputs::new(
        row.gross_salary,
        row.other_income.unwrap_or_default(),
        row.hra_claimed.unwrap_or_default(),
    )
    .with_chapter_via_deductions(row.chapter_via_deductions.unwrap_or_default());

    ScenarioRow {
        row: row_number,
        label: row.label.filter(|label| !label.is_empty()),
        inputs,
    }
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// [`ScenarioLoadError::Parse`] with the 1-based row of the first record
/// that cannot be read.
pub fn load_from_str(input: &str) -> Result<Vec<ScenarioRow>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let scenarios = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row_number = idx + 1;
            result
                .map(|row| convert_row(row, row_number))
                .map_err(|source| ScenarioLoadError::Parse {
                    row: row_number,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = scenarios.len(), "scenarios loaded");
    Ok(scenarios)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ScenarioRow>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}
