use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Poseidon configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseidonConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Target spectrum statistics.
    pub target: TargetToml,

    /// Selection settings.
    pub selection: SelectionToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Candidate-pool Parquet path.
    pub pool: Option<PathBuf>,
    /// Selection output Parquet path.
    pub output: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            pool: None,
            output: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

/// Target distribution, in log space, one entry per period.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetToml {
    pub mean_log: Vec<f64>,
    pub stdev_log: Vec<f64>,
    /// Optional flat row-major covariance matrix, `n_periods` squared entries.
    #[serde(default)]
    pub covariance: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    pub n_select: usize,
    #[serde(default = "default_scaling")]
    pub scaling: String,
    #[serde(default)]
    pub conditioning_period: Option<usize>,
    #[serde(default = "default_max_scale_factor")]
    pub max_scale_factor: f64,
    #[serde(default = "default_tolerance_pct")]
    pub tolerance_pct: f64,
    #[serde(default = "default_metric")]
    pub metric: String,
    #[serde(default)]
    pub penalty_weight: f64,
    #[serde(default = "default_error_weights")]
    pub error_weights: [f64; 3],
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

fn default_scaling() -> String {
    "off".to_string()
}
fn default_max_scale_factor() -> f64 {
    4.0
}
fn default_tolerance_pct() -> f64 {
    10.0
}
fn default_metric() -> String {
    "sse".to_string()
}
fn default_error_weights() -> [f64; 3] {
    [1.0, 2.0, 0.3]
}
fn default_max_passes() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let toml_str = r#"
            [target]
            mean_log = [0.1, 0.2]
            stdev_log = [0.5, 0.6]

            [selection]
            n_select = 11
        "#;
        let config: PoseidonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.selection.n_select, 11);
        assert_eq!(config.selection.scaling, "off");
        assert_eq!(config.selection.max_passes, 2);
        assert_eq!(config.selection.tolerance_pct, 10.0);
        assert_eq!(config.selection.error_weights, [1.0, 2.0, 0.3]);
        assert_eq!(config.io.compression, "snappy");
        assert!(config.target.covariance.is_none());
    }

    #[test]
    fn full_config_parses() {
        let toml_str = r#"
            [io]
            pool = "pool.parquet"
            output = "selection.parquet"
            compression = "zstd"
            row_group_size = 4096

            [target]
            mean_log = [0.1]
            stdev_log = [0.5]
            covariance = [0.25]

            [selection]
            n_select = 7
            scaling = "conditional"
            conditioning_period = 0
            max_scale_factor = 6.0
            tolerance_pct = 5.0
            metric = "ks"
            penalty_weight = 2.0
            error_weights = [1.0, 1.0, 0.0]
            max_passes = 4
        "#;
        let config: PoseidonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.selection.conditioning_period, Some(0));
        assert_eq!(config.selection.metric, "ks");
        assert_eq!(config.target.covariance.as_deref(), Some(&[0.25][..]));
        assert_eq!(config.io.row_group_size, 4096);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml_str = r#"
            [target]
            mean_log = [0.1]
            stdev_log = [0.5]

            [selection]
            n_select = 3
            bogus = true
        "#;
        assert!(toml::from_str::<PoseidonConfig>(toml_str).is_err());
    }

    #[test]
    fn missing_n_select_is_rejected() {
        let toml_str = r#"
            [target]
            mean_log = [0.1]
            stdev_log = [0.5]

            [selection]
        "#;
        assert!(toml::from_str::<PoseidonConfig>(toml_str).is_err());
    }
}
