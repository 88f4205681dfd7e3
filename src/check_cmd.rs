//! Check command: validate configuration and data shapes without optimizing.

use anyhow::{Context, Result, bail};
use tracing::info_span;

use poseidon_io::read_spectra;

use crate::cli::CheckArgs;
use crate::config::PoseidonConfig;
use crate::convert;

/// Relative tolerance for covariance-diagonal vs stdev^2 agreement.
const COV_DIAGONAL_RTOL: f64 = 1e-6;

/// Run the configuration and data check.
pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PoseidonConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let target = convert::build_target(&config.target)?;
    let selection_config = convert::build_selection_config(&config.selection)?;
    convert::build_writer_config(&config.io)?;
    println!(
        "config OK: n_select {}, scaling {}, metric {}, {} target periods",
        selection_config.n_select(),
        config.selection.scaling.to_lowercase(),
        config.selection.metric.to_lowercase(),
        target.n_periods()
    );

    let mut problems: Vec<String> = Vec::new();

    if let Some((period, sigma)) = target
        .stdev_log()
        .iter()
        .enumerate()
        .find(|(_, s)| **s == 0.0)
    {
        problems.push(format!(
            "target stdev is zero at period {period} (value {sigma})"
        ));
    }

    if let Some(cov) = target.covariance() {
        let n = target.n_periods();
        let disagreements = (0..n)
            .filter(|&p| {
                let sigma_sq = target.stdev_log()[p] * target.stdev_log()[p];
                (cov[p * n + p] - sigma_sq).abs() > COV_DIAGONAL_RTOL * sigma_sq.max(f64::MIN_POSITIVE)
            })
            .count();
        if disagreements > 0 {
            problems.push(format!(
                "covariance diagonal disagrees with stdev^2 at {disagreements} period(s)"
            ));
        } else {
            println!("covariance diagonal agrees with stdev^2");
        }
    }

    let pool_path = args.pool.or_else(|| config.io.pool.clone());
    if let Some(path) = pool_path {
        let table = read_spectra(&path)
            .with_context(|| format!("failed to read pool: {}", path.display()))?;
        let periods = table.periods();
        // read_spectra guarantees a non-empty axis.
        let (lo, hi) = periods
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });
        println!(
            "pool OK: {} records x {} periods ({lo}..{hi} s)",
            table.n_records(),
            table.n_periods()
        );

        if target.n_periods() != table.n_periods() {
            problems.push(format!(
                "target has {} periods but pool has {}",
                target.n_periods(),
                table.n_periods()
            ));
        }
        if selection_config.n_select() >= table.n_records() {
            problems.push(format!(
                "n_select {} must be smaller than pool size {}",
                selection_config.n_select(),
                table.n_records()
            ));
        }
        if let Some(index) = selection_config.conditioning_period() {
            if index >= table.n_periods() {
                problems.push(format!(
                    "conditioning period {index} out of range for {} periods",
                    table.n_periods()
                ));
            }
        }
    } else {
        println!("no pool path given, skipping data checks");
    }

    if !problems.is_empty() {
        bail!("{} problem(s) found:\n  {}", problems.len(), problems.join("\n  "));
    }
    println!("all checks passed");
    Ok(())
}
