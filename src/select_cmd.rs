//! Select command: optimize a record subset and write the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span};

use poseidon_io::{SelectionTable, SpectraTable, read_spectra, write_selection};
use poseidon_select::{CandidatePool, NoProgress, optimize, rank_initial};

use crate::cli::SelectArgs;
use crate::config::PoseidonConfig;
use crate::convert;

/// Summary written next to the selection Parquet.
#[derive(Debug, Serialize)]
struct Summary {
    n_select: usize,
    metric: String,
    scaling: String,
    records: Vec<u32>,
    scale_factors: Vec<f64>,
    passes_run: usize,
    converged: bool,
    mean_error_pct: Option<f64>,
    sd_error_pct: Option<f64>,
}

/// Run the selection pipeline.
pub fn run(args: SelectArgs) -> Result<()> {
    let _cmd = info_span!("select").entered();

    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PoseidonConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let pool_path = args
        .pool
        .clone()
        .or_else(|| config.io.pool.clone())
        .ok_or_else(|| anyhow!("no pool path: set [io].pool in config or use --pool"))?;

    info!(path = %pool_path.display(), "reading candidate pool");
    let table = read_spectra(&pool_path)
        .with_context(|| format!("failed to read pool: {}", pool_path.display()))?;
    info!(
        n_records = table.n_records(),
        n_periods = table.n_periods(),
        "candidate pool loaded"
    );

    let target = convert::build_target(&config.target)?;
    let selection_config = convert::build_selection_config(&config.selection)?;
    let pool = CandidatePool::new(table.log_spectra().to_vec(), table.n_periods())?;

    let initial = rank_initial(&selection_config, &target, &pool)?;
    info!(n_select = initial.n_select(), "initial subset ranked");

    let result = optimize(&selection_config, &target, &pool, initial, &mut NoProgress)
        .context("optimization failed")?;
    info!(
        passes = result.passes_run(),
        converged = result.converged(),
        "optimization finished"
    );

    let output = write_result(&args, &config, &table, &result)?;

    let summary = Summary {
        n_select: selection_config.n_select(),
        metric: config.selection.metric.to_lowercase(),
        scaling: config.selection.scaling.to_lowercase(),
        records: record_ids(&table, result.selected().indices()),
        scale_factors: result.selected().scale_factors().to_vec(),
        passes_run: result.passes_run(),
        converged: result.converged(),
        mean_error_pct: result.errors_pct().map(|(m, _)| m),
        sd_error_pct: result.errors_pct().map(|(_, s)| s),
    };
    let summary_path = output.with_extension("summary.json");
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    std::fs::write(&summary_path, json)
        .with_context(|| format!("failed to write summary: {}", summary_path.display()))?;
    info!(path = %summary_path.display(), "summary written");

    Ok(())
}

/// Maps pool row indices back to the file's record identifiers.
fn record_ids(table: &SpectraTable, indices: &[usize]) -> Vec<u32> {
    indices.iter().map(|&i| table.record_ids()[i]).collect()
}

/// Writes the selection Parquet and returns the path used.
fn write_result(
    args: &SelectArgs,
    config: &PoseidonConfig,
    table: &SpectraTable,
    result: &poseidon_select::SelectionResult,
) -> Result<PathBuf> {
    let output = args
        .output
        .clone()
        .or_else(|| config.io.output.clone())
        .unwrap_or_else(|| Path::new("selection.parquet").to_path_buf());

    let rows = SelectionTable::new(
        record_ids(table, result.selected().indices()),
        result.selected().scale_factors().to_vec(),
    )?;
    let writer_config = convert::build_writer_config(&config.io)?;
    write_selection(&output, &rows, &writer_config)
        .with_context(|| format!("failed to write selection: {}", output.display()))?;
    info!(path = %output.display(), "selection written");
    Ok(output)
}
