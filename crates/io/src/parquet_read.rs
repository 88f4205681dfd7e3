//! Low-level Parquet reading and column extraction.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::{DataType, Float64Type, UInt32Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::debug;

use crate::error::IoError;
use crate::selection::SelectionTable;
use crate::spectra::SpectraTable;

/// Expected columns of the long-format spectra input.
const SPECTRA_COLUMNS: [(&str, DataType); 3] = [
    ("record", DataType::UInt32),
    ("period", DataType::Float64),
    ("log_sa", DataType::Float64),
];

/// Expected columns of the selection output.
const SELECTION_COLUMNS: [(&str, DataType); 3] = [
    ("slot", DataType::UInt32),
    ("record", DataType::UInt32),
    ("scale_factor", DataType::Float64),
];

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> =
        reader
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::Parquet {
                reason: e.to_string(),
            })?;

    Ok(batches)
}

/// Validates a batch schema against expected column names and types.
///
/// # Errors
///
/// Returns [`IoError::Validation`] listing every mismatched column.
pub(crate) fn validate_schema(
    batch: &RecordBatch,
    expected: &[(&str, DataType)],
) -> Result<(), IoError> {
    let num_cols = batch.num_columns();
    if num_cols != expected.len() {
        return Err(IoError::validation(format!(
            "expected {} columns, got {num_cols}",
            expected.len()
        )));
    }

    let schema = batch.schema();
    let mut mismatches: Vec<String> = Vec::new();
    for (i, (name, data_type)) in expected.iter().enumerate() {
        let field = schema.field(i);
        if field.name() != *name {
            mismatches.push(format!(
                "column {i}: expected '{name}', got '{}'",
                field.name()
            ));
        } else if field.data_type() != data_type {
            mismatches.push(format!(
                "column '{name}': expected {data_type}, got {}",
                field.data_type()
            ));
        }
    }

    if !mismatches.is_empty() {
        return Err(IoError::Validation {
            count: mismatches.len(),
            details: mismatches.join("; "),
        });
    }
    Ok(())
}

/// Reads a long-format spectra pool from Parquet.
///
/// Expects `record: UInt32`, `period: Float64`, `log_sa: Float64` columns.
/// Rows are grouped by record identifier; every record must cover the same
/// period axis in the same order. Records come back sorted by identifier.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Parquet`], or
/// [`IoError::Validation`] for schema mismatches, an empty file, ragged
/// period axes, or non-finite values.
pub fn read_spectra(path: &Path) -> Result<SpectraTable, IoError> {
    let batches = read_batches(path)?;
    let first = batches
        .iter()
        .find(|b| b.num_rows() > 0)
        .ok_or_else(|| IoError::validation("spectra file contains no rows"))?;
    validate_schema(first, &SPECTRA_COLUMNS)?;

    // record id -> (periods, values), in file row order per record
    let mut groups: BTreeMap<u32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for batch in &batches {
        validate_schema(batch, &SPECTRA_COLUMNS)?;
        let record_col = batch.column(0).as_primitive::<UInt32Type>();
        let period_col = batch.column(1).as_primitive::<Float64Type>();
        let log_sa_col = batch.column(2).as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let entry = groups.entry(record_col.value(row)).or_default();
            entry.0.push(period_col.value(row));
            entry.1.push(log_sa_col.value(row));
        }
    }

    // First record defines the axis; file values are compared exactly since
    // a shared axis is written identically for every record.
    let axis: Vec<f64> = match groups.values().next() {
        Some((periods, _)) => periods.clone(),
        None => return Err(IoError::validation("spectra file contains no rows")),
    };

    let mut mismatches: Vec<String> = Vec::new();
    let mut record_ids = Vec::with_capacity(groups.len());
    let mut log_spectra = Vec::with_capacity(groups.len() * axis.len());
    for (id, (periods, values)) in &groups {
        if periods != &axis {
            mismatches.push(format!("record {id}: period axis differs"));
            continue;
        }
        record_ids.push(*id);
        log_spectra.extend_from_slice(values);
    }
    if !mismatches.is_empty() {
        return Err(IoError::Validation {
            count: mismatches.len(),
            details: mismatches.join("; "),
        });
    }

    debug!(
        n_records = record_ids.len(),
        n_periods = axis.len(),
        "spectra pool loaded"
    );
    SpectraTable::new(axis, record_ids, log_spectra)
}

/// Reads a selection result previously written by
/// [`write_selection`](crate::writer::write_selection).
///
/// Rows come back in slot order regardless of their order in the file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Parquet`], or
/// [`IoError::Validation`] for schema mismatches, an empty file, or
/// duplicate or non-contiguous slots.
pub fn read_selection(path: &Path) -> Result<SelectionTable, IoError> {
    let batches = read_batches(path)?;
    let first = batches
        .iter()
        .find(|b| b.num_rows() > 0)
        .ok_or_else(|| IoError::validation("selection file contains no rows"))?;
    validate_schema(first, &SELECTION_COLUMNS)?;

    let mut rows: BTreeMap<u32, (u32, f64)> = BTreeMap::new();
    for batch in &batches {
        validate_schema(batch, &SELECTION_COLUMNS)?;
        let slot_col = batch.column(0).as_primitive::<UInt32Type>();
        let record_col = batch.column(1).as_primitive::<UInt32Type>();
        let factor_col = batch.column(2).as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let slot = slot_col.value(row);
            if rows
                .insert(slot, (record_col.value(row), factor_col.value(row)))
                .is_some()
            {
                return Err(IoError::validation(format!("duplicate slot {slot}")));
            }
        }
    }

    if let Some(&last) = rows.keys().next_back() {
        if last as usize + 1 != rows.len() {
            return Err(IoError::validation(format!(
                "slots are not contiguous: {} rows but max slot {last}",
                rows.len()
            )));
        }
    }

    let (records, scale_factors) = rows.into_values().unzip();
    SelectionTable::new(records, scale_factors)
}
