use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a slab table would violate its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabTableError {
    #[error("slab table must contain at least one slab")]
    Empty,

    #[error("slab {index} has non-positive upper bound {bound}")]
    NonPositiveBound { index: usize, bound: Decimal },

    #[error("slab {index} upper bound {bound} does not exceed previous bound {previous}")]
    BoundsNotIncreasing {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("slab {index} marginal rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },
}

/// One band of a slab table: income up to `upper_bound` (from the previous
/// bound) is taxed at `marginal_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    pub upper_bound: Decimal,
    pub marginal_rate: Decimal,
}

impl Slab {
    pub fn new(
        upper_bound: Decimal,
        marginal_rate: Decimal,
    ) -> Self {
        Self {
            upper_bound,
            marginal_rate,
        }
    }
}

/// Ordered bands covering income from zero up to the last upper bound.
///
/// Bounds are strictly increasing and every rate lies in `[0, 1]`. Income
/// above the last bound is taxed at a top rate held next to the table in
/// [`RegimeConfig`](crate::RegimeConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slab>", into = "Vec<Slab>")]
pub struct SlabTable {
    slabs: Vec<Slab>,
}

impl SlabTable {
    /// Builds a table, rejecting empty, overlapping or out-of-range input.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use regime_core::{Slab, SlabTable, SlabTableError};
    ///
    /// let table = SlabTable::new(vec![
    ///     Slab::new(dec!(250000), dec!(0)),
    ///     Slab::new(dec!(500000), dec!(0.05)),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.last_bound(), dec!(500000));
    ///
    /// let overlapping = SlabTable::new(vec![
    ///     Slab::new(dec!(500000), dec!(0.05)),
    ///     Slab::new(dec!(250000), dec!(0.20)),
    /// ]);
    /// assert!(matches!(
    ///     overlapping,
    ///     Err(SlabTableError::BoundsNotIncreasing { index: 1, .. })
    /// ));
    /// ```
    pub fn new(slabs: Vec<Slab>) -> Result<Self, SlabTableError> {
        if slabs.is_empty() {
            return Err(SlabTableError::Empty);
        }

        let mut previous = Decimal::ZERO;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.upper_bound <= Decimal::ZERO {
                return Err(SlabTableError::NonPositiveBound {
                    index,
                    bound: slab.upper_bound,
                });
            }
            if index > 0 && slab.upper_bound <= previous {
                return Err(SlabTableError::BoundsNotIncreasing {
                    index,
                    bound: slab.upper_bound,
                    previous,
                });
            }
            if slab.marginal_rate < Decimal::ZERO || slab.marginal_rate > Decimal::ONE {
                return Err(SlabTableError::InvalidRate {
                    index,
                    rate: slab.marginal_rate,
                });
            }
            previous = slab.upper_bound;
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slab> {
        self.slabs.iter()
    }

    pub fn len(&self) -> usize {
        self.slabs.len()
    }

    /// Always false for a constructed table; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }

    /// Upper bound of the highest stated band.
    pub fn last_bound(&self) -> Decimal {
        self.slabs
            .last()
            .map(|s| s.upper_bound)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<Slab>> for SlabTable {
    type Error = SlabTableError;

    fn try_from(slabs: Vec<Slab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<SlabTable> for Vec<Slab> {
    fn from(table: SlabTable) -> Self {
        table.slabs
    }
}

impl<'a> IntoIterator for &'a SlabTable {
    type Item = &'a Slab;
    type IntoIter = std::slice::Iter<'a, Slab>;

    fn into_iter(self) -> Self::IntoIter {
        self.slabs.iter()
    }
}
