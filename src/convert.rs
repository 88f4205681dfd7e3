//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use poseidon_io::{Compression, WriterConfig};
use poseidon_select::{MetricKind, Scaling, SelectionConfig, TargetSpectrum};

use crate::config::{IoToml, SelectionToml, TargetToml};

/// Parses a scaling mode name string into the corresponding enum variant.
pub fn parse_scaling(s: &str) -> Result<Scaling> {
    match s.to_lowercase().as_str() {
        "off" => Ok(Scaling::Off),
        "conditional" => Ok(Scaling::Conditional),
        "joint" => Ok(Scaling::Joint),
        other => bail!("unknown scaling mode: {other:?}"),
    }
}

/// Parses a deviation metric name string into the corresponding enum variant.
pub fn parse_metric(s: &str) -> Result<MetricKind> {
    match s.to_lowercase().as_str() {
        "sse" => Ok(MetricKind::Sse),
        "ks" => Ok(MetricKind::Ks),
        other => bail!("unknown deviation metric: {other:?}"),
    }
}

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`SelectionConfig`] from the TOML selection configuration.
pub fn build_selection_config(selection: &SelectionToml) -> Result<SelectionConfig> {
    let scaling = parse_scaling(&selection.scaling)?;
    let metric = parse_metric(&selection.metric)?;
    let mut cfg = SelectionConfig::new(selection.n_select)
        .with_scaling(scaling)
        .with_max_scale_factor(selection.max_scale_factor)
        .with_tolerance_pct(selection.tolerance_pct)
        .with_metric(metric)
        .with_penalty_weight(selection.penalty_weight)
        .with_error_weights(selection.error_weights)
        .with_max_passes(selection.max_passes);
    if let Some(period) = selection.conditioning_period {
        cfg = cfg.with_conditioning_period(period);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`TargetSpectrum`] from the TOML target configuration.
pub fn build_target(target: &TargetToml) -> Result<TargetSpectrum> {
    let spectrum = TargetSpectrum::new(target.mean_log.clone(), target.stdev_log.clone())?;
    match &target.covariance {
        Some(cov) => Ok(spectrum.with_covariance(cov.clone())?),
        None => Ok(spectrum),
    }
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size))
}
