//! Per-pass convergence check against the target.

use crate::error::SelectError;
use crate::selected::SelectedSet;
use crate::target::TargetSpectrum;

/// Maximum relative percentage errors of the selected set's median and
/// standard deviation against the target.
///
/// - Mean error: `max_p |exp(mean_p) - exp(m_p)| / exp(m_p) * 100` over all
///   periods (median in linear space, since the spectra are log values).
/// - Sd error: `max_p |sd_p - sigma_p| / sigma_p * 100` over all periods
///   except the conditioning period.
///
/// The conditioning period is excluded from the sd error only: conditional
/// scaling pins its median by construction but leaves its dispersion free.
///
/// # Errors
///
/// Returns [`SelectError::ZeroTargetStdev`] if a period entering the sd
/// error has zero target stdev, instead of propagating a non-finite
/// percentage.
pub fn max_percentage_errors(
    selected: &SelectedSet,
    target: &TargetSpectrum,
    conditioning_period: Option<usize>,
) -> Result<(f64, f64), SelectError> {
    let n_periods = target.n_periods();
    let n_records = selected.n_select();
    let mut column = Vec::with_capacity(n_records);

    let mut mean_err: f64 = 0.0;
    let mut sd_err: f64 = 0.0;
    for p in 0..n_periods {
        column.clear();
        column.extend((0..n_records).map(|rec| selected.row(rec)[p]));

        let target_median = target.mean_log()[p].exp();
        let median = poseidon_stats::mean(&column).exp();
        mean_err = mean_err.max((median - target_median).abs() / target_median * 100.0);

        if conditioning_period == Some(p) {
            continue;
        }
        let target_sd = target.stdev_log()[p];
        if target_sd == 0.0 {
            return Err(SelectError::ZeroTargetStdev { period: p });
        }
        let sd = poseidon_stats::sd(&column);
        sd_err = sd_err.max((sd - target_sd).abs() / target_sd * 100.0);
    }

    Ok((mean_err, sd_err))
}
