use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use regime_core::{IncomeInputs, RegimeComparison, TaxRules, compare_regimes};
use regime_data::{RulesLoader, SlabScheduleLoader, scenarios};
use tracing::{debug, info};

use crate::render;
use crate::utils::normalize_amount;

/// Compares income-tax liability under the New and Old regimes.
///
/// Uses the built-in AY 2025-26 rules unless `--rules` or `--slabs`
/// point at replacements.
#[derive(Debug, Parser)]
#[command(name = "regime-compare", version)]
pub struct Cli {
    /// TOML file with a complete set of tax-year rules.
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// CSV file (regime,upper_bound,rate) replacing slab tables.
    #[arg(long, global = true)]
    pub slabs: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log level or filter directive. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare both regimes for one set of figures.
    Compare(CompareArgs),

    /// Compare both regimes for every row of a scenario CSV.
    Batch {
        /// CSV with gross_salary and optional label, other_income,
        /// hra_claimed, chapter_via_deductions columns.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the active rules.
    Rules,
}

/// Amounts as typed. Commas are ignored; anything unparseable counts as 0.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Annual gross salary.
    #[arg(long, allow_hyphen_values = true)]
    pub salary: String,

    /// Income from other sources.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub other_income: String,

    /// HRA exemption claimed.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub hra: String,

    /// Chapter VI-A deductions (80C etc.), honoured by the Old regime only.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub deductions: String,
}

impl CompareArgs {
    pub fn inputs(&self) -> IncomeInputs {
        IncomeInputs::new(
            normalize_amount("gross_salary", &self.salary),
            normalize_amount("other_income", &self.other_income),
            normalize_amount("hra_claimed", &self.hra),
        )
        .with_chapter_via_deductions(normalize_amount(
            "chapter_via_deductions",
            &self.deductions,
        ))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Built-in rules, replaced by `rules_path` and then patched by `slabs_path`.
pub fn load_rules(
    rules_path: Option<&Path>,
    slabs_path: Option<&Path>,
) -> Result<TaxRules> {
    let mut rules = match rules_path {
        Some(path) => RulesLoader::from_path(path)
            .with_context(|| format!("failed to load rules from '{}'", path.display()))?,
        None => TaxRules::ay_2025_26(),
    };

    if let Some(path) = slabs_path {
        let file = File::open(path)
            .with_context(|| format!("cannot open slab file '{}'", path.display()))?;
        let records = SlabScheduleLoader::parse(file)
            .with_context(|| format!("failed to read slabs from '{}'", path.display()))?;
        SlabScheduleLoader::apply(&records, &mut rules)
            .with_context(|| format!("failed to apply slabs from '{}'", path.display()))?;
    }

    debug!(assessment_year = %rules.assessment_year, "rules ready");
    Ok(rules)
}

/// Executes the parsed command, writing results to `out`.
pub fn run<W: Write>(
    cli: &Cli,
    out: &mut W,
) -> Result<()> {
    let rules = load_rules(cli.rules.as_deref(), cli.slabs.as_deref())?;

    let rendered = match &cli.command {
        Command::Compare(args) => {
            let comparison = compare_regimes(&args.inputs(), &rules);
            match cli.format {
                OutputFormat::Text => render::comparison_text(&comparison),
                OutputFormat::Json => render::comparison_json(&comparison)? + "\n",
            }
        }
        Command::Batch { file } => {
            let rows = scenarios::load_from_file(file)
                .with_context(|| format!("failed to load scenarios from '{}'", file.display()))?;
            info!(count = rows.len(), "comparing scenario batch");
            let entries: Vec<(_, RegimeComparison)> = rows
                .iter()
                .map(|row| (row, compare_regimes(&row.inputs, &rules)))
                .collect();
            match cli.format {
                OutputFormat::Text => render::batch_text(&entries),
                OutputFormat::Json => render::batch_json(&entries)? + "\n",
            }
        }
        Command::Rules => match cli.format {
            OutputFormat::Text => render::rules_text(&rules),
            OutputFormat::Json => render::rules_json(&rules)? + "\n",
        },
    };

    out.write_all(rendered.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
