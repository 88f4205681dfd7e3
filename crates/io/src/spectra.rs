//! In-memory candidate-pool spectra table.

use crate::error::IoError;

/// Response-spectrum pool read from Parquet.
///
/// `log_spectra` is row-major: record `i` occupies
/// `[i * n_periods, (i + 1) * n_periods)` and follows the shared `periods`
/// axis order.
#[derive(Debug, Clone)]
pub struct SpectraTable {
    /// Shared period axis, in file order.
    periods: Vec<f64>,
    /// Record identifiers from the file, ascending.
    record_ids: Vec<u32>,
    /// Flat row-major log spectral values.
    log_spectra: Vec<f64>,
}

impl SpectraTable {
    /// Builds a table from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the table is empty, the value
    /// count does not equal `record_ids.len() * periods.len()`, or any
    /// period or spectral value is non-finite.
    pub fn new(
        periods: Vec<f64>,
        record_ids: Vec<u32>,
        log_spectra: Vec<f64>,
    ) -> Result<Self, IoError> {
        if periods.is_empty() || record_ids.is_empty() {
            return Err(IoError::validation("spectra table is empty"));
        }
        if log_spectra.len() != periods.len() * record_ids.len() {
            return Err(IoError::validation(format!(
                "expected {} values ({} records x {} periods), got {}",
                periods.len() * record_ids.len(),
                record_ids.len(),
                periods.len(),
                log_spectra.len()
            )));
        }
        if let Some(p) = periods.iter().find(|p| !p.is_finite()) {
            return Err(IoError::validation(format!("non-finite period {p}")));
        }
        if log_spectra.iter().any(|v| !v.is_finite()) {
            return Err(IoError::validation("non-finite log spectral value"));
        }
        Ok(Self {
            periods,
            record_ids,
            log_spectra,
        })
    }

    /// Number of records in the pool.
    pub fn n_records(&self) -> usize {
        self.record_ids.len()
    }

    /// Number of periods on the shared axis.
    pub fn n_periods(&self) -> usize {
        self.periods.len()
    }

    /// Shared period axis.
    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    /// Record identifiers, ascending.
    pub fn record_ids(&self) -> &[u32] {
        &self.record_ids
    }

    /// Flat row-major log spectral values.
    pub fn log_spectra(&self) -> &[f64] {
        &self.log_spectra
    }

    /// Consumes the table, returning the flat log spectra.
    pub fn into_log_spectra(self) -> Vec<f64> {
        self.log_spectra
    }

    /// Log spectrum of record `i` along the period axis.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_records()`.
    pub fn record(&self, i: usize) -> &[f64] {
        let n = self.n_periods();
        &self.log_spectra[i * n..(i + 1) * n]
    }
}
