//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::selection::SelectionTable;

/// Builds the Arrow schema for selection output.
pub(crate) fn build_schema() -> Schema {
    Schema::new(vec![
        Field::new("slot", DataType::UInt32, false),
        Field::new("record", DataType::UInt32, false),
        Field::new("scale_factor", DataType::Float64, false),
    ])
}

/// Converts a [`SelectionTable`] into an Arrow [`RecordBatch`].
///
/// Slots are emitted as `0..len`, matching the table's row order.
pub(crate) fn selection_to_record_batch(
    table: &SelectionTable,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let slots: Vec<u32> = (0..table.len() as u32).collect();
    let slot_col: ArrayRef = Arc::new(UInt32Array::from(slots));
    let record_col: ArrayRef = Arc::new(UInt32Array::from(table.records().to_vec()));
    let factor_col: ArrayRef = Arc::new(Float64Array::from(table.scale_factors().to_vec()));

    RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![slot_col, record_col, factor_col],
    )
    .map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_layout() {
        let schema = build_schema();
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.field(0).name(), "slot");
        assert_eq!(schema.field(1).name(), "record");
        assert_eq!(schema.field(2).name(), "scale_factor");
        assert_eq!(schema.field(2).data_type(), &DataType::Float64);
    }

    #[test]
    fn record_batch_from_table() {
        let table = SelectionTable::new(vec![7, 3, 11], vec![1.0, 0.5, 2.0]).unwrap();
        let schema = build_schema();
        let batch = selection_to_record_batch(&table, &schema).unwrap();

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 3);
    }
}
