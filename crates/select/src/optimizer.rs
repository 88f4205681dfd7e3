//! Greedy local-search optimizer over the selected subset.
//!
//! Each pass sweeps the subset slots left to right. At every slot the
//! occupant is removed, every non-selected candidate is scored as its
//! replacement, and the best scorer is inserted back. Slot order is
//! load-bearing: each slot's optimum depends on the current state of all
//! other slots, so passes are strictly sequential. Only the per-candidate
//! scoring fan-out is parallel.

use std::borrow::Cow;
use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{debug, debug_span, info};

use crate::config::{MetricKind, Scaling, SelectionConfig};
use crate::convergence;
use crate::deviation::trial_deviation;
use crate::error::SelectError;
use crate::pool::CandidatePool;
use crate::progress::Progress;
use crate::result::SelectionResult;
use crate::scaling;
use crate::selected::SelectedSet;
use crate::target::TargetSpectrum;

/// Scale factors resolved for a whole run.
enum RunScaling {
    /// All factors 1.
    Off(Vec<f64>),
    /// Constant conditional factors, computed before the first pass.
    Conditional(Vec<f64>),
    /// Joint factors, recomputed per slot from the current selected set.
    Joint,
}

/// Validates all inputs against each other.
fn validate_inputs(
    config: &SelectionConfig,
    target: &TargetSpectrum,
    pool: &CandidatePool,
    initial: &SelectedSet,
) -> Result<(), SelectError> {
    config.validate()?;

    if target.n_periods() != pool.n_periods() {
        return Err(SelectError::PeriodCountMismatch {
            name: "target mean",
            expected: pool.n_periods(),
            got: target.n_periods(),
        });
    }
    if initial.n_periods() != pool.n_periods() {
        return Err(SelectError::PeriodCountMismatch {
            name: "initial selection",
            expected: pool.n_periods(),
            got: initial.n_periods(),
        });
    }
    if initial.n_select() != config.n_select() {
        return Err(SelectError::SelectionSizeMismatch {
            expected: config.n_select(),
            got: initial.n_select(),
        });
    }
    // The boundary n_select == n_records leaves no replacement candidate at
    // any slot, so it is rejected along with the impossible cases.
    if config.n_select() >= pool.n_records() {
        return Err(SelectError::SelectionExceedsPool {
            n_select: config.n_select(),
            pool_size: pool.n_records(),
        });
    }
    if let Some(index) = config.conditioning_period() {
        if index >= pool.n_periods() {
            return Err(SelectError::ConditioningPeriodOutOfRange {
                index,
                n_periods: pool.n_periods(),
            });
        }
    }
    // A zero target stdev divides by zero in the percentage check and
    // degenerates the KS reference CDF.
    if let Some(period) = target.first_zero_stdev() {
        return Err(SelectError::ZeroTargetStdev { period });
    }
    Ok(())
}

/// Optimizes `initial` in place against the target and returns the result.
///
/// Runs up to `max_passes` full sweeps over the subset slots. With the SSE
/// metric the run stops early once both percentage errors drop below the
/// configured tolerance; the KS metric always uses the full pass budget.
///
/// Candidates whose scale factor exceeds the cap score as infinity but stay
/// eligible, so an over-constrained slot keeps the best available record
/// instead of failing. Candidates occupying other slots are never chosen.
///
/// # Errors
///
/// Returns a [`SelectError`] for invalid configuration, mismatched shapes,
/// a subset not strictly smaller than the pool, a zero target stdev, or a
/// slot with no eligible candidate.
pub fn optimize(
    config: &SelectionConfig,
    target: &TargetSpectrum,
    pool: &CandidatePool,
    initial: SelectedSet,
    progress: &mut dyn Progress,
) -> Result<SelectionResult, SelectError> {
    validate_inputs(config, target, pool, &initial)?;

    let run_scaling = match config.scaling() {
        Scaling::Off => RunScaling::Off(scaling::unit_factors(pool.n_records())),
        Scaling::Conditional => {
            let period = config
                .conditioning_period()
                .ok_or(SelectError::MissingConditioningPeriod)?;
            RunScaling::Conditional(scaling::conditional_factors(pool, target, period)?)
        }
        Scaling::Joint => RunScaling::Joint,
    };
    let scaling_on = config.scaling() != Scaling::Off;

    let mut selected = initial;
    selected.debug_validate(pool);

    let mut passes_run = 0;
    let mut converged = false;
    let mut errors_pct = None;

    for pass in 1..=config.max_passes() {
        let _pass_span = debug_span!("pass", pass).entered();

        for slot in 0..config.n_select() {
            let factors: Cow<'_, [f64]> = match &run_scaling {
                RunScaling::Off(unit) => Cow::Borrowed(unit),
                RunScaling::Conditional(constant) => Cow::Borrowed(constant),
                RunScaling::Joint => {
                    Cow::Owned(scaling::joint_factors(pool, &selected, slot, target))
                }
            };

            let best = (0..pool.n_records())
                .into_par_iter()
                .filter(|&j| {
                    // A factor that cannot form a scaled row makes the
                    // candidate ineligible outright.
                    factors[j].is_finite()
                        && factors[j] > 0.0
                        && !selected.occupied_elsewhere(slot, j)
                })
                .map(|j| {
                    let factor = factors[j];
                    let score = if scaling_on && factor > config.max_scale_factor() {
                        f64::INFINITY
                    } else {
                        trial_deviation(config, target, &selected, slot, pool.record(j), factor.ln())
                    };
                    (score, j, factor)
                })
                // Indices are unique, so no two entries compare equal and the
                // parallel reduction is deterministic: lowest index wins ties.
                // total_cmp orders NaN after infinity, so a NaN score can
                // never displace a finite one.
                .min_by(|a, b| match a.0.total_cmp(&b.0) {
                    Ordering::Equal => a.1.cmp(&b.1),
                    order => order,
                });

            let Some((score, best_index, best_factor)) = best else {
                return Err(SelectError::NoReplacementCandidate { slot });
            };
            debug!(slot, record = best_index, score, "slot filled");

            selected.replace_slot(slot, pool, best_index, best_factor);
            progress.slot_replaced(pass, slot, best_index);
        }

        passes_run = pass;
        match config.metric() {
            MetricKind::Sse => {
                let (mean_err, sd_err) = convergence::max_percentage_errors(
                    &selected,
                    target,
                    config.conditioning_period(),
                )?;
                info!(pass, "max error in median: {:.2}%", mean_err);
                info!(pass, "max error in standard deviation: {:.2}%", sd_err);
                errors_pct = Some((mean_err, sd_err));
                progress.pass_complete(pass, errors_pct);

                if mean_err < config.tolerance_pct() && sd_err < config.tolerance_pct() {
                    converged = true;
                    break;
                }
            }
            MetricKind::Ks => {
                progress.pass_complete(pass, None);
            }
        }
    }

    selected.debug_validate(pool);
    Ok(SelectionResult::new(
        selected, passes_run, converged, errors_pct,
    ))
}
