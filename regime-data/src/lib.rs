//! File loaders for tax-year rules, slab schedules and scenario batches.

mod rules;
pub mod scenarios;
mod slabs;

pub use rules::{RulesLoadError, RulesLoader};
pub use scenarios::{ScenarioLoadError, ScenarioRow};
pub use slabs::{RegimeSchedule, SlabLoaderError, SlabRecord, SlabScheduleLoader};
