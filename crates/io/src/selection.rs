//! Selection-result rows for Parquet output.

use crate::error::IoError;

/// Final selection: one row per subset slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTable {
    /// Pool record identifier per slot.
    records: Vec<u32>,
    /// Amplitude scale factor per slot.
    scale_factors: Vec<f64>,
}

impl SelectionTable {
    /// Builds a table from per-slot records and factors.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the table is empty, the slices
    /// differ in length, or a factor is non-finite or non-positive.
    pub fn new(records: Vec<u32>, scale_factors: Vec<f64>) -> Result<Self, IoError> {
        if records.is_empty() {
            return Err(IoError::validation("selection table is empty"));
        }
        if records.len() != scale_factors.len() {
            return Err(IoError::validation(format!(
                "{} records but {} scale factors",
                records.len(),
                scale_factors.len()
            )));
        }
        if let Some((slot, f)) = scale_factors
            .iter()
            .enumerate()
            .find(|(_, f)| !f.is_finite() || **f <= 0.0)
        {
            return Err(IoError::validation(format!(
                "scale factor for slot {slot} must be finite and positive, got {f}"
            )));
        }
        Ok(Self {
            records,
            scale_factors,
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the table has no rows. Cannot occur for a validated table.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pool record identifier per slot.
    pub fn records(&self) -> &[u32] {
        &self.records
    }

    /// Amplitude scale factor per slot.
    pub fn scale_factors(&self) -> &[f64] {
        &self.scale_factors
    }
}
