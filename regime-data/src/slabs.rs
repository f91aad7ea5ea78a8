use std::collections::BTreeMap;
use std::io::Read;

use regime_core::{RegimeId, RulesError, Slab, SlabTable, SlabTableError, TaxRules};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading a slab schedule.
#[derive(Debug, Error)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid regime: {0}")]
    InvalidRegime(String),

    #[error("{0} regime has no top rate row (a row with an empty upper_bound)")]
    MissingTopRate(RegimeId),

    #[error("{0} regime has more than one top rate row")]
    DuplicateTopRate(RegimeId),

    #[error("{regime} regime slab table is invalid: {source}")]
    InvalidTable {
        regime: RegimeId,
        #[source]
        source: SlabTableError,
    },

    #[error("Schedule produces invalid rules: {0}")]
    InvalidRules(#[from] RulesError),
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a slab schedule CSV file.
///
/// - `regime`: `new` or `old`
/// - `upper_bound`: the upper bound of this band (empty for the top rate row)
/// - `rate`: the marginal rate as a decimal (e.g. 0.05 for 5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub regime: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Slab table and top rate assembled for one regime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeSchedule {
    pub slabs: SlabTable,
    pub top_rate: Decimal,
}

/// Loader for slab schedules from CSV files.
///
/// Each regime's bands are listed in ascending order, followed by exactly
/// one row with an empty `upper_bound` carrying the rate above the last band:
///
/// ```csv
/// regime,upper_bound,rate
/// old,250000,0.00
/// old,500000,0.05
/// old,1000000,0.20
/// old,,0.30
/// ```
pub struct SlabScheduleLoader;

impl SlabScheduleLoader {
    /// Parse slab records from a CSV reader.
    ///
    /// Returns the records in file order. The reader can be any type that
    /// implements `Read`, such as a file or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by regime and build a validated schedule for each.
    ///
    /// Regimes absent from the records are absent from the result.
    pub fn build(
        records: &[SlabRecord]
    ) -> Result<BTreeMap<RegimeId, RegimeSchedule>, SlabLoaderError> {
        let mut bands: BTreeMap<RegimeId, Vec<Slab>> = BTreeMap::new();
        let mut top_rates: BTreeMap<RegimeId, Decimal> = BTreeMap::new();

        for record in records {
            let regime = RegimeId::parse(&record.regime)
                .ok_or_else(|| SlabLoaderError::InvalidRegime(record.regime.clone()))?;

            match record.upper_bound {
                Some(upper_bound) => bands
                    .entry(regime)
                    .or_default()
                    .push(Slab::new(upper_bound, record.rate)),
                None => {
                    if top_rates.insert(regime, record.rate).is_some() {
                        return Err(SlabLoaderError::DuplicateTopRate(regime));
                    }
                }
            }
        }

        let mut schedules = BTreeMap::new();
        for (regime, slabs) in bands {
            let top_rate = top_rates
                .remove(&regime)
                .ok_or(SlabLoaderError::MissingTopRate(regime))?;
            let slabs = SlabTable::new(slabs)
                .map_err(|source| SlabLoaderError::InvalidTable { regime, source })?;
            schedules.insert(regime, RegimeSchedule { slabs, top_rate });
        }

        // A top rate with no bands cannot form a table.
        if let Some((&regime, _)) = top_rates.iter().next() {
            return Err(SlabLoaderError::InvalidTable {
                regime,
                source: SlabTableError::Empty,
            });
        }

        Ok(schedules)
    }

    /// Replace the slab tables and top rates in `rules` with those in
    /// `records`, then validate the result.
    ///
    /// Returns the regimes that were replaced. On error `rules` is left
    /// unchanged.
    pub fn apply(
        records: &[SlabRecord],
        rules: &mut TaxRules,
    ) -> Result<Vec<RegimeId>, SlabLoaderError> {
        let schedules = Self::build(records)?;

        let mut updated = rules.clone();
        for (regime, schedule) in &schedules {
            let config = updated.regime_mut(*regime);
            config.slabs = schedule.slabs.clone();
            config.top_rate = schedule.top_rate;
        }
        updated.validate()?;

        *rules = updated;
        let replaced: Vec<RegimeId> = schedules.into_keys().collect();
        info!(?replaced, "slab schedules applied");
        Ok(replaced)
    }
}
