//! # poseidon-io
//!
//! Read candidate-pool response spectra from Parquet and write selection
//! results back out.
//!
//! Input is long format, one row per `(record, period)` pair with columns
//! `record: UInt32`, `period: Float64`, `log_sa: Float64`. Every record must
//! cover the same period axis in the same order. Output is one row per
//! subset slot with columns `slot: UInt32`, `record: UInt32`,
//! `scale_factor: Float64`.
//!
//! ```no_run
//! use std::path::Path;
//! use poseidon_io::{SelectionTable, WriterConfig, read_spectra, write_selection};
//!
//! let pool = read_spectra(Path::new("pool.parquet"))?;
//! assert!(pool.n_records() > 0);
//!
//! let table = SelectionTable::new(vec![4, 1, 9], vec![1.0, 0.8, 1.3])?;
//! write_selection(Path::new("selection.parquet"), &table, &WriterConfig::default())?;
//! # Ok::<(), poseidon_io::IoError>(())
//! ```

pub mod error;
pub mod selection;
pub mod spectra;
pub mod writer;

pub(crate) mod parquet_read;
pub(crate) mod parquet_write;

pub use error::IoError;
pub use parquet_read::{read_selection, read_spectra};
pub use selection::SelectionTable;
pub use spectra::SpectraTable;
pub use writer::{Compression, WriterConfig, write_selection};
