//! Mutable selected subset with positional bookkeeping.

use crate::error::SelectError;
use crate::pool::CandidatePool;

/// The selected subset of scaled records.
///
/// Order is significant: slot `i` holds the scaled log spectrum
/// `pool[indices[i]] + ln(scale_factors[i])`, and the three parallel
/// containers stay positionally aligned through every slot replacement.
/// All selected pool indices are distinct at every observation point.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSet {
    /// Flat row-major `n_select x n_periods` scaled log spectra.
    log_spectra: Vec<f64>,
    /// Pool index per slot.
    indices: Vec<usize>,
    /// Scale factor per slot.
    scale_factors: Vec<f64>,
    /// Number of periods per record.
    n_periods: usize,
}

impl SelectedSet {
    /// Builds a selected set from pool indices with unit scale factors.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidNSelect`] for an empty index list,
    /// [`SelectError::IndexOutOfRange`] or [`SelectError::DuplicateIndex`]
    /// for bad indices.
    pub fn from_pool(pool: &CandidatePool, indices: Vec<usize>) -> Result<Self, SelectError> {
        let factors = vec![1.0; indices.len()];
        Self::from_pool_scaled(pool, indices, factors)
    }

    /// Builds a selected set from pool indices and per-slot scale factors.
    ///
    /// Slot rows are derived as `pool[index] + ln(factor)`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidNSelect`] for an empty index list,
    /// [`SelectError::SelectionSizeMismatch`] if the factor list disagrees
    /// in length, [`SelectError::IndexOutOfRange`],
    /// [`SelectError::DuplicateIndex`], or
    /// [`SelectError::InvalidScaleFactor`] for a non-finite or non-positive
    /// factor.
    pub fn from_pool_scaled(
        pool: &CandidatePool,
        indices: Vec<usize>,
        scale_factors: Vec<f64>,
    ) -> Result<Self, SelectError> {
        if indices.is_empty() {
            return Err(SelectError::InvalidNSelect { n_select: 0 });
        }
        if scale_factors.len() != indices.len() {
            return Err(SelectError::SelectionSizeMismatch {
                expected: indices.len(),
                got: scale_factors.len(),
            });
        }

        let n_records = pool.n_records();
        let mut seen = vec![false; n_records];
        for &index in &indices {
            if index >= n_records {
                return Err(SelectError::IndexOutOfRange {
                    index,
                    pool_size: n_records,
                });
            }
            if seen[index] {
                return Err(SelectError::DuplicateIndex { index });
            }
            seen[index] = true;
        }
        for (slot, &value) in scale_factors.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(SelectError::InvalidScaleFactor { slot, value });
            }
        }

        let n_periods = pool.n_periods();
        let mut log_spectra = Vec::with_capacity(indices.len() * n_periods);
        for (&index, &factor) in indices.iter().zip(scale_factors.iter()) {
            let ln_f = factor.ln();
            log_spectra.extend(pool.record(index).iter().map(|v| v + ln_f));
        }

        Ok(Self {
            log_spectra,
            indices,
            scale_factors,
            n_periods,
        })
    }

    /// Returns the number of slots.
    pub fn n_select(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of periods per record.
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Returns the pool index per slot.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the scale factor per slot.
    pub fn scale_factors(&self) -> &[f64] {
        &self.scale_factors
    }

    /// Returns the flat row-major scaled log spectra.
    pub fn log_spectra(&self) -> &[f64] {
        &self.log_spectra
    }

    /// Returns the scaled log spectrum at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= n_select()`.
    pub fn row(&self, slot: usize) -> &[f64] {
        let start = slot * self.n_periods;
        &self.log_spectra[start..start + self.n_periods]
    }

    /// True if `pool_index` occupies a slot other than `slot`.
    ///
    /// The occupant of `slot` itself is treated as removed, so it may
    /// legally be re-selected for its own slot.
    pub(crate) fn occupied_elsewhere(&self, slot: usize, pool_index: usize) -> bool {
        self.indices
            .iter()
            .enumerate()
            .any(|(s, &i)| s != slot && i == pool_index)
    }

    /// Overwrites `slot` with the scaled record `pool_index`.
    ///
    /// All other slots keep their positions. Never resizes; the slot row is
    /// rewritten in place.
    pub(crate) fn replace_slot(
        &mut self,
        slot: usize,
        pool: &CandidatePool,
        pool_index: usize,
        factor: f64,
    ) {
        debug_assert!(slot < self.n_select());
        debug_assert!(!self.occupied_elsewhere(slot, pool_index));

        let ln_f = factor.ln();
        let start = slot * self.n_periods;
        for (dst, &src) in self.log_spectra[start..start + self.n_periods]
            .iter_mut()
            .zip(pool.record(pool_index))
        {
            *dst = src + ln_f;
        }
        self.indices[slot] = pool_index;
        self.scale_factors[slot] = factor;

        self.debug_validate(pool);
    }

    /// Debug-asserts the alignment invariants against the pool.
    pub(crate) fn debug_validate(&self, pool: &CandidatePool) {
        debug_assert_eq!(self.indices.len(), self.scale_factors.len());
        debug_assert_eq!(self.log_spectra.len(), self.indices.len() * self.n_periods);
        if cfg!(debug_assertions) {
            for slot in 0..self.n_select() {
                for other in slot + 1..self.n_select() {
                    debug_assert_ne!(self.indices[slot], self.indices[other]);
                }
                let ln_f = self.scale_factors[slot].ln();
                for (&got, &raw) in self.row(slot).iter().zip(pool.record(self.indices[slot])) {
                    debug_assert!((got - (raw + ln_f)).abs() < 1e-9);
                }
            }
        }
    }
}
