//! Construction of the starting subset for the optimizer.

use crate::config::{Scaling, SelectionConfig};
use crate::error::SelectError;
use crate::pool::CandidatePool;
use crate::scaling;
use crate::selected::SelectedSet;
use crate::target::TargetSpectrum;

/// Builds a starting subset by ranking every candidate against the target
/// mean spectrum.
///
/// Each record is scored by the sum of squared errors between its (scaled)
/// log spectrum and the target mean; the `n_select` best-ranked distinct
/// records form the initial set, best first. Conditional scaling applies its
/// constant factors before ranking; joint scaling has no subset context yet
/// and ranks unscaled. Records whose conditional factor exceeds the cap rank
/// last but stay eligible.
///
/// The greedy optimizer accepts any valid [`SelectedSet`]; this ranking is
/// just a sensible default a caller can replace.
///
/// # Errors
///
/// Returns a configuration error for an invalid config, a pool smaller than
/// the subset, or a target that does not match the pool's period axis.
pub fn rank_initial(
    config: &SelectionConfig,
    target: &TargetSpectrum,
    pool: &CandidatePool,
) -> Result<SelectedSet, SelectError> {
    config.validate()?;
    if target.n_periods() != pool.n_periods() {
        return Err(SelectError::PeriodCountMismatch {
            name: "target mean",
            expected: pool.n_periods(),
            got: target.n_periods(),
        });
    }
    if config.n_select() > pool.n_records() {
        return Err(SelectError::SelectionExceedsPool {
            n_select: config.n_select(),
            pool_size: pool.n_records(),
        });
    }

    let factors = match config.scaling() {
        Scaling::Conditional => {
            // validate() guarantees the period is set.
            let period = config
                .conditioning_period()
                .ok_or(SelectError::MissingConditioningPeriod)?;
            scaling::conditional_factors(pool, target, period)?
        }
        Scaling::Off | Scaling::Joint => scaling::unit_factors(pool.n_records()),
    };

    let mut ranked: Vec<(f64, usize)> = (0..pool.n_records())
        .map(|j| {
            let factor = factors[j];
            if config.scaling() != Scaling::Off
                && (!factor.is_finite() || factor <= 0.0 || factor > config.max_scale_factor())
            {
                return (f64::INFINITY, j);
            }
            let ln_f = factor.ln();
            let sse: f64 = pool
                .record(j)
                .iter()
                .zip(target.mean_log())
                .map(|(&v, &m)| {
                    let d = v + ln_f - m;
                    d * d
                })
                .sum();
            (sse, j)
        })
        .collect();
    ranked.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        std::cmp::Ordering::Equal => a.1.cmp(&b.1),
        order => order,
    });

    let chosen: Vec<usize> = ranked[..config.n_select()].iter().map(|&(_, j)| j).collect();
    let chosen_factors: Vec<f64> = chosen.iter().map(|&j| factors[j]).collect();
    SelectedSet::from_pool_scaled(pool, chosen, chosen_factors)
}
