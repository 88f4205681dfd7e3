//! Immutable candidate pool of log spectra.

use crate::error::SelectError;

/// Candidate pool: one log spectrum per ground-motion record.
///
/// Stored as a flat row-major `n_records x n_periods` matrix. The pool is
/// read-only for the whole optimization run.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    /// Flat row-major log-spectral ordinates.
    log_spectra: Vec<f64>,
    /// Number of periods per record.
    n_periods: usize,
}

impl CandidatePool {
    /// Creates a pool from a flat row-major matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::EmptyPool`] if the matrix is empty,
    /// [`SelectError::PoolShapeMismatch`] if its length is not divisible by
    /// `n_periods`, or [`SelectError::NonFiniteInput`] if any ordinate is
    /// NaN or infinite.
    pub fn new(log_spectra: Vec<f64>, n_periods: usize) -> Result<Self, SelectError> {
        if n_periods == 0 || log_spectra.is_empty() {
            if log_spectra.is_empty() {
                return Err(SelectError::EmptyPool);
            }
            return Err(SelectError::PoolShapeMismatch {
                len: log_spectra.len(),
                n_periods,
            });
        }
        if !log_spectra.len().is_multiple_of(n_periods) {
            return Err(SelectError::PoolShapeMismatch {
                len: log_spectra.len(),
                n_periods,
            });
        }
        if log_spectra.iter().any(|v| !v.is_finite()) {
            return Err(SelectError::NonFiniteInput {
                input: "pool log spectra",
            });
        }
        Ok(Self {
            log_spectra,
            n_periods,
        })
    }

    /// Returns the number of records in the pool.
    pub fn n_records(&self) -> usize {
        self.log_spectra.len() / self.n_periods
    }

    /// Returns the number of periods per record.
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Returns the log spectrum of record `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_records()`.
    pub fn record(&self, index: usize) -> &[f64] {
        let start = index * self.n_periods;
        &self.log_spectra[start..start + self.n_periods]
    }

    /// Returns the flat row-major matrix.
    pub fn log_spectra(&self) -> &[f64] {
        &self.log_spectra
    }
}
