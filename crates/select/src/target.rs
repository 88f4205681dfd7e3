//! Target distribution of log-spectral ordinates.

use crate::error::SelectError;

/// Target statistics the selected subset should reproduce.
///
/// All quantities live in natural-log spectral-acceleration space, one entry
/// per period on the period axis. The optional covariance matrix is carried
/// for diagnostics; the greedy loop itself consumes only the mean and stdev
/// vectors.
#[derive(Debug, Clone)]
pub struct TargetSpectrum {
    /// Target mean log spectrum, one entry per period.
    mean_log: Vec<f64>,
    /// Target log-space standard deviation, one entry per period.
    stdev_log: Vec<f64>,
    /// Optional row-major `n_periods x n_periods` covariance matrix.
    covariance: Option<Vec<f64>>,
}

impl TargetSpectrum {
    /// Creates a target from mean and stdev vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::PeriodCountMismatch`] if the vectors disagree
    /// in length, [`SelectError::NonFiniteInput`] if either contains NaN or
    /// infinity, or [`SelectError::NegativeTargetStdev`] for a negative
    /// stdev entry.
    pub fn new(mean_log: Vec<f64>, stdev_log: Vec<f64>) -> Result<Self, SelectError> {
        if stdev_log.len() != mean_log.len() {
            return Err(SelectError::PeriodCountMismatch {
                name: "target stdev",
                expected: mean_log.len(),
                got: stdev_log.len(),
            });
        }
        if mean_log.iter().any(|v| !v.is_finite()) {
            return Err(SelectError::NonFiniteInput {
                input: "target mean",
            });
        }
        if stdev_log.iter().any(|v| !v.is_finite()) {
            return Err(SelectError::NonFiniteInput {
                input: "target stdev",
            });
        }
        if let Some(period) = stdev_log.iter().position(|&v| v < 0.0) {
            return Err(SelectError::NegativeTargetStdev {
                period,
                value: stdev_log[period],
            });
        }
        Ok(Self {
            mean_log,
            stdev_log,
            covariance: None,
        })
    }

    /// Attaches a row-major `n_periods x n_periods` covariance matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::CovarianceShapeMismatch`] if the matrix is not
    /// square over the period axis, or [`SelectError::NonFiniteInput`] if it
    /// contains NaN or infinity.
    pub fn with_covariance(mut self, covariance: Vec<f64>) -> Result<Self, SelectError> {
        let n = self.mean_log.len();
        if covariance.len() != n * n {
            return Err(SelectError::CovarianceShapeMismatch {
                len: covariance.len(),
                expected: n * n,
                n_periods: n,
            });
        }
        if covariance.iter().any(|v| !v.is_finite()) {
            return Err(SelectError::NonFiniteInput {
                input: "target covariance",
            });
        }
        self.covariance = Some(covariance);
        Ok(self)
    }

    /// Returns the number of periods on the axis.
    pub fn n_periods(&self) -> usize {
        self.mean_log.len()
    }

    /// Returns the target mean log spectrum.
    pub fn mean_log(&self) -> &[f64] {
        &self.mean_log
    }

    /// Returns the target log-space standard deviations.
    pub fn stdev_log(&self) -> &[f64] {
        &self.stdev_log
    }

    /// Returns the covariance matrix, if one was attached.
    pub fn covariance(&self) -> Option<&[f64]> {
        self.covariance.as_deref()
    }

    /// Returns the index of the first period with zero stdev, if any.
    pub(crate) fn first_zero_stdev(&self) -> Option<usize> {
        self.stdev_log.iter().position(|&s| s == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_vectors() {
        let t = TargetSpectrum::new(vec![-1.0, 0.0, 1.0], vec![0.5, 0.6, 0.7]).unwrap();
        assert_eq!(t.n_periods(), 3);
        assert_eq!(t.mean_log(), &[-1.0, 0.0, 1.0]);
        assert_eq!(t.stdev_log(), &[0.5, 0.6, 0.7]);
        assert!(t.covariance().is_none());
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let result = TargetSpectrum::new(vec![0.0, 1.0], vec![0.5]);
        assert!(matches!(
            result.unwrap_err(),
            SelectError::PeriodCountMismatch {
                name: "target stdev",
                expected: 2,
                got: 1,
            }
        ));
    }

    #[test]
    fn new_rejects_non_finite_mean() {
        let result = TargetSpectrum::new(vec![f64::NAN], vec![0.5]);
        assert!(matches!(
            result.unwrap_err(),
            SelectError::NonFiniteInput {
                input: "target mean"
            }
        ));
    }

    #[test]
    fn new_rejects_negative_stdev() {
        let result = TargetSpectrum::new(vec![0.0, 0.0], vec![0.5, -0.1]);
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            SelectError::NegativeTargetStdev { period: 1, value } if value == -0.1
        ));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn new_rejects_non_finite_stdev() {
        let result = TargetSpectrum::new(vec![0.0], vec![f64::NAN]);
        assert!(matches!(
            result.unwrap_err(),
            SelectError::NonFiniteInput {
                input: "target stdev"
            }
        ));
    }

    #[test]
    fn with_covariance_checks_shape() {
        let t = TargetSpectrum::new(vec![0.0, 1.0], vec![0.5, 0.5]).unwrap();
        let result = t.clone().with_covariance(vec![0.25; 3]);
        assert!(matches!(
            result.unwrap_err(),
            SelectError::CovarianceShapeMismatch {
                len: 3,
                expected: 4,
                n_periods: 2,
            }
        ));

        let ok = t.with_covariance(vec![0.25, 0.1, 0.1, 0.25]).unwrap();
        assert_eq!(ok.covariance().unwrap().len(), 4);
    }

    #[test]
    fn first_zero_stdev_found() {
        let t = TargetSpectrum::new(vec![0.0, 1.0, 2.0], vec![0.5, 0.0, 0.7]).unwrap();
        assert_eq!(t.first_zero_stdev(), Some(1));

        let t = TargetSpectrum::new(vec![0.0], vec![0.5]).unwrap();
        assert_eq!(t.first_zero_stdev(), None);
    }
}
