//! Per-candidate amplitude scale factors.
//!
//! Three strategies share one shape of output: a factor per pool record.
//! Unit and conditional factors are constant for a whole run; joint factors
//! depend on the current selected set and are recomputed at every slot.
//! Admissibility against the configured cap is enforced by the optimizer,
//! not here, so factors are reported raw.

use crate::error::SelectError;
use crate::pool::CandidatePool;
use crate::selected::SelectedSet;
use crate::target::TargetSpectrum;

/// Unit factors: no scaling.
pub(crate) fn unit_factors(n_records: usize) -> Vec<f64> {
    vec![1.0; n_records]
}

/// Factors that pin each candidate's amplitude at the conditioning period to
/// the target amplitude there.
///
/// `factor[j] = exp(target_mean[k] - pool[j][k])` at conditioning period `k`.
/// Constant for the whole run; computed once before any pass begins.
///
/// # Errors
///
/// Returns [`SelectError::ConditioningPeriodOutOfRange`] if `period_index`
/// is not on the period axis.
pub(crate) fn conditional_factors(
    pool: &CandidatePool,
    target: &TargetSpectrum,
    period_index: usize,
) -> Result<Vec<f64>, SelectError> {
    let n_periods = pool.n_periods();
    if period_index >= n_periods {
        return Err(SelectError::ConditioningPeriodOutOfRange {
            index: period_index,
            n_periods,
        });
    }
    let target_log = target.mean_log()[period_index];
    Ok((0..pool.n_records())
        .map(|j| (target_log - pool.record(j)[period_index]).exp())
        .collect())
}

/// Factors that best match the target mean spectrum jointly over all periods,
/// in the context of the post-removal selected set.
///
/// For candidate `j` inserted at `slot`, the trial-set mean at period `p` is
/// `a_p + ln(f)/n` where `a_p` is the mean with `ln(f) = 0`. Minimising
/// `sum_p (a_p + ln(f)/n - m_p)^2` over `ln(f)` gives the closed form
/// `ln(f) = n * mean_p(m_p - a_p)`.
///
/// Deterministic given the same selected-set state.
pub(crate) fn joint_factors(
    pool: &CandidatePool,
    selected: &SelectedSet,
    slot: usize,
    target: &TargetSpectrum,
) -> Vec<f64> {
    let n_periods = pool.n_periods();
    let n = selected.n_select() as f64;

    // Column sums over the retained slots (everything but `slot`).
    let mut retained_sum = vec![0.0; n_periods];
    for s in 0..selected.n_select() {
        if s == slot {
            continue;
        }
        for (acc, &v) in retained_sum.iter_mut().zip(selected.row(s)) {
            *acc += v;
        }
    }

    (0..pool.n_records())
        .map(|j| {
            let record = pool.record(j);
            let mut residual = 0.0;
            for p in 0..n_periods {
                let a_p = (retained_sum[p] + record[p]) / n;
                residual += target.mean_log()[p] - a_p;
            }
            (n * residual / n_periods as f64).exp()
        })
        .collect()
}
