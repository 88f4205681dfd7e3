//! Reading long-format spectra pools.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, RecordBatch, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use poseidon_io::{IoError, read_spectra};

/// Writes a long-format parquet file with the given rows.
fn write_long_format(path: &Path, rows: &[(u32, f64, f64)]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("record", DataType::UInt32, false),
        Field::new("period", DataType::Float64, false),
        Field::new("log_sa", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(UInt32Array::from(
                rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.2).collect::<Vec<_>>(),
            )),
        ],
    )
    .unwrap();

    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn reads_and_groups_by_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pool.parquet");
    // Two records over a three-period axis, records interleaved on purpose.
    write_long_format(
        &path,
        &[
            (7, 0.1, -0.5),
            (3, 0.1, 0.0),
            (3, 0.5, 0.1),
            (7, 0.5, -0.4),
            (3, 1.0, 0.2),
            (7, 1.0, -0.3),
        ],
    );

    let table = read_spectra(&path).unwrap();
    assert_eq!(table.n_records(), 2);
    assert_eq!(table.n_periods(), 3);
    assert_eq!(table.periods(), &[0.1, 0.5, 1.0]);
    // Records sorted by identifier.
    assert_eq!(table.record_ids(), &[3, 7]);
    assert_eq!(table.record(0), &[0.0, 0.1, 0.2]);
    assert_eq!(table.record(1), &[-0.5, -0.4, -0.3]);
}

#[test]
fn ragged_period_axis_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pool.parquet");
    // Record 1 is missing the 1.0 period.
    write_long_format(
        &path,
        &[
            (0, 0.1, 0.0),
            (0, 1.0, 0.1),
            (1, 0.1, 0.2),
        ],
    );

    let err = read_spectra(&path).unwrap_err();
    match err {
        IoError::Validation { details, .. } => {
            assert!(details.contains("record 1"));
            assert!(details.contains("period axis differs"));
        }
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn reordered_period_axis_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pool.parquet");
    write_long_format(
        &path,
        &[
            (0, 0.1, 0.0),
            (0, 1.0, 0.1),
            (1, 1.0, 0.2),
            (1, 0.1, 0.3),
        ],
    );

    assert!(matches!(
        read_spectra(&path).unwrap_err(),
        IoError::Validation { .. }
    ));
}

#[test]
fn wrong_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pool.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("record", DataType::UInt32, false),
        Field::new("period", DataType::Float64, false),
        Field::new("spectral_acceleration", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(UInt32Array::from(vec![0u32])),
            Arc::new(Float64Array::from(vec![0.1])),
            Arc::new(Float64Array::from(vec![1.0])),
        ],
    )
    .unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let err = read_spectra(&path).unwrap_err();
    assert!(err.to_string().contains("log_sa"));
}

#[test]
fn empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pool.parquet");
    write_long_format(&path, &[]);

    let err = read_spectra(&path).unwrap_err();
    assert!(err.to_string().contains("no rows"));
}

#[test]
fn missing_file_is_reported() {
    let result = read_spectra(Path::new("/nonexistent/pool.parquet"));
    assert!(matches!(result.unwrap_err(), IoError::FileNotFound { .. }));
}
