//! Deviation metrics: how far a subset's statistics sit from the target.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::{MetricKind, SelectionConfig};
use crate::selected::SelectedSet;
use crate::target::TargetSpectrum;

/// Scores `selected` against the target with the configured metric.
///
/// Lower is strictly better. Total over any correctly shaped input: a
/// degenerate KS reference distribution scores as infinity rather than
/// panicking.
pub fn set_deviation(
    config: &SelectionConfig,
    target: &TargetSpectrum,
    selected: &SelectedSet,
) -> f64 {
    deviation_with(config, target, selected.n_select(), |rec, p| {
        selected.row(rec)[p]
    })
}

/// Scores the trial set obtained by overwriting `slot` with the candidate
/// spectrum shifted by `ln_factor`.
///
/// Avoids materialising the trial matrix; the substitution happens in the
/// value lookup.
pub(crate) fn trial_deviation(
    config: &SelectionConfig,
    target: &TargetSpectrum,
    selected: &SelectedSet,
    slot: usize,
    candidate: &[f64],
    ln_factor: f64,
) -> f64 {
    deviation_with(config, target, selected.n_select(), |rec, p| {
        if rec == slot {
            candidate[p] + ln_factor
        } else {
            selected.row(rec)[p]
        }
    })
}

/// Shared metric core over an abstract `n_records x n_periods` value lookup.
fn deviation_with(
    config: &SelectionConfig,
    target: &TargetSpectrum,
    n_records: usize,
    value: impl Fn(usize, usize) -> f64,
) -> f64 {
    let n_periods = target.n_periods();
    let mut column = Vec::with_capacity(n_records);

    let mut base = 0.0;
    match config.metric() {
        MetricKind::Sse => {
            let [w_mean, w_sd, w_skew] = config.error_weights();
            let mut mean_term = 0.0;
            let mut sd_term = 0.0;
            let mut skew_term = 0.0;
            for p in 0..n_periods {
                column.clear();
                column.extend((0..n_records).map(|rec| value(rec, p)));

                let d_mean = poseidon_stats::mean(&column) - target.mean_log()[p];
                mean_term += d_mean * d_mean;
                let d_sd = poseidon_stats::sd(&column) - target.stdev_log()[p];
                sd_term += d_sd * d_sd;
                if w_skew > 0.0 {
                    // Target log-space skewness is 0 under the lognormal model.
                    let skew = poseidon_stats::skewness(&column);
                    skew_term += skew * skew;
                }
            }
            base = w_mean * mean_term + w_sd * sd_term + w_skew * skew_term;
        }
        MetricKind::Ks => {
            for p in 0..n_periods {
                column.clear();
                column.extend((0..n_records).map(|rec| value(rec, p)));
                column
                    .sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

                let Ok(normal) = Normal::new(target.mean_log()[p], target.stdev_log()[p]) else {
                    return f64::INFINITY;
                };

                let n = n_records as f64;
                let mut d_stat: f64 = 0.0;
                for (i, &x) in column.iter().enumerate() {
                    let cdf = normal.cdf(x);
                    let above = (i + 1) as f64 / n - cdf;
                    let below = cdf - i as f64 / n;
                    d_stat = d_stat.max(above).max(below);
                }
                base += d_stat;
            }
        }
    }

    if config.penalty_weight() > 0.0 {
        base += config.penalty_weight() * three_sigma_exceedance(target, n_records, &value);
    }
    base
}

/// Total magnitude by which values stray outside the three-sigma band.
fn three_sigma_exceedance(
    target: &TargetSpectrum,
    n_records: usize,
    value: &impl Fn(usize, usize) -> f64,
) -> f64 {
    let mut pen = 0.0;
    for p in 0..target.n_periods() {
        let hi = target.mean_log()[p] + 3.0 * target.stdev_log()[p];
        let lo = target.mean_log()[p] - 3.0 * target.stdev_log()[p];
        for rec in 0..n_records {
            let v = value(rec, p);
            if v > hi {
                pen += v - hi;
            } else if v < lo {
                pen += lo - v;
            }
        }
    }
    pen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::CandidatePool;
    use approx::assert_abs_diff_eq;

    fn config_sse(weights: [f64; 3]) -> SelectionConfig {
        SelectionConfig::new(2).with_error_weights(weights)
    }

    fn set(pool: &CandidatePool, indices: Vec<usize>) -> SelectedSet {
        SelectedSet::from_pool(pool, indices).unwrap()
    }

    #[test]
    fn sse_zero_on_exact_match() {
        // Selected values {1, 2} at the single period: mean 1.5, sd 0.7071.
        let pool = CandidatePool::new(vec![1.0, 2.0], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        let target = TargetSpectrum::new(vec![1.5], vec![0.5f64.sqrt()]).unwrap();

        let dev = set_deviation(&config_sse([1.0, 1.0, 0.0]), &target, &selected);
        assert_abs_diff_eq!(dev, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn sse_mean_term_only() {
        let pool = CandidatePool::new(vec![1.0, 2.0], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        // Mean off by 0.5, sd exact.
        let target = TargetSpectrum::new(vec![2.0], vec![0.5f64.sqrt()]).unwrap();

        let dev = set_deviation(&config_sse([2.0, 1.0, 0.0]), &target, &selected);
        assert_abs_diff_eq!(dev, 2.0 * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn sse_weights_scale_terms() {
        let pool = CandidatePool::new(vec![1.0, 2.0], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        let target = TargetSpectrum::new(vec![2.0], vec![0.1]).unwrap();

        let d1 = set_deviation(&config_sse([1.0, 0.0, 0.0]), &target, &selected);
        let d2 = set_deviation(&config_sse([3.0, 0.0, 0.0]), &target, &selected);
        assert_abs_diff_eq!(d2, 3.0 * d1, epsilon = 1e-12);
    }

    #[test]
    fn trial_matches_materialised_set() {
        let pool = CandidatePool::new(vec![0.0, 1.0, 2.0, 3.0], 1).unwrap();
        let target = TargetSpectrum::new(vec![1.5], vec![0.7]).unwrap();
        let config = config_sse([1.0, 2.0, 0.3]);

        let selected = set(&pool, vec![0, 2]);
        // Trial: replace slot 0 with candidate 3 at unit scale.
        let trial = trial_deviation(&config, &target, &selected, 0, pool.record(3), 0.0);
        let materialised = set(&pool, vec![3, 2]);
        let direct = set_deviation(&config, &target, &materialised);
        assert_abs_diff_eq!(trial, direct, epsilon = 1e-12);
    }

    #[test]
    fn trial_applies_scale_shift() {
        let pool = CandidatePool::new(vec![0.0, 1.0, 2.0, 3.0], 1).unwrap();
        let target = TargetSpectrum::new(vec![1.5], vec![0.7]).unwrap();
        let config = config_sse([1.0, 2.0, 0.0]);

        let selected = set(&pool, vec![0, 2]);
        let ln_f = 2.0f64.ln();
        let trial = trial_deviation(&config, &target, &selected, 0, pool.record(1), ln_f);

        let scaled = SelectedSet::from_pool_scaled(&pool, vec![1, 2], vec![2.0, 1.0]).unwrap();
        let direct = set_deviation(&config, &target, &scaled);
        assert_abs_diff_eq!(trial, direct, epsilon = 1e-12);
    }

    #[test]
    fn ks_zero_ish_for_balanced_sample() {
        // Symmetric sample around the target mean keeps D well below 1.
        let pool = CandidatePool::new(vec![-0.5, 0.5], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        let target = TargetSpectrum::new(vec![0.0], vec![1.0]).unwrap();
        let config = SelectionConfig::new(2).with_metric(MetricKind::Ks);

        let dev = set_deviation(&config, &target, &selected);
        assert!(dev > 0.0 && dev < 0.5, "dev={dev}");
    }

    #[test]
    fn ks_detects_shifted_sample() {
        let near_pool = CandidatePool::new(vec![-0.5, 0.5], 1).unwrap();
        let far_pool = CandidatePool::new(vec![4.5, 5.5], 1).unwrap();
        let target = TargetSpectrum::new(vec![0.0], vec![1.0]).unwrap();
        let config = SelectionConfig::new(2).with_metric(MetricKind::Ks);

        let near = set_deviation(&config, &target, &set(&near_pool, vec![0, 1]));
        let far = set_deviation(&config, &target, &set(&far_pool, vec![0, 1]));
        assert!(far > near);
        // A fully displaced sample approaches the maximum D of 1 per period.
        assert!(far > 0.99, "far={far}");
    }

    #[test]
    fn ks_degenerate_target_is_infinite() {
        let pool = CandidatePool::new(vec![0.0, 1.0], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        let target = TargetSpectrum::new(vec![0.0], vec![0.0]).unwrap();
        let config = SelectionConfig::new(2).with_metric(MetricKind::Ks);

        assert_eq!(set_deviation(&config, &target, &selected), f64::INFINITY);
    }

    #[test]
    fn penalty_counts_exceedance_magnitude() {
        let pool = CandidatePool::new(vec![0.0, 4.0], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        // Band is 0 +/- 3*1 = [-3, 3]; value 4 exceeds by 1.
        let target = TargetSpectrum::new(vec![0.0], vec![1.0]).unwrap();

        let without = set_deviation(&config_sse([1.0, 1.0, 0.0]), &target, &selected);
        let with = set_deviation(
            &config_sse([1.0, 1.0, 0.0]).with_penalty_weight(10.0),
            &target,
            &selected,
        );
        assert_abs_diff_eq!(with - without, 10.0 * 1.0, epsilon = 1e-12);
    }

    #[test]
    fn penalty_zero_inside_band() {
        let pool = CandidatePool::new(vec![0.0, 1.0], 1).unwrap();
        let selected = set(&pool, vec![0, 1]);
        let target = TargetSpectrum::new(vec![0.5], vec![1.0]).unwrap();

        let without = set_deviation(&config_sse([1.0, 1.0, 0.0]), &target, &selected);
        let with = set_deviation(
            &config_sse([1.0, 1.0, 0.0]).with_penalty_weight(10.0),
            &target,
            &selected,
        );
        assert_abs_diff_eq!(with, without, epsilon = 1e-12);
    }
}
