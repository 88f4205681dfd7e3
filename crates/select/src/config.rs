//! Configuration for a selection run.

use crate::error::SelectError;

/// Amplitude-scaling mode for candidate records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scaling {
    /// No scaling: every factor is exactly 1.
    #[default]
    Off,
    /// Scale each candidate so its amplitude at the conditioning period
    /// matches the target amplitude there. Factors are constant for the
    /// whole run.
    Conditional,
    /// Scale each candidate to best match the target mean spectrum jointly
    /// over all periods, given the current selected set. Factors are
    /// recomputed at every slot.
    Joint,
}

/// Deviation metric used to score a trial subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricKind {
    /// Weighted sum of squared errors in per-period mean, standard deviation
    /// and skewness. Supports the early-exit convergence check.
    #[default]
    Sse,
    /// Sum over periods of the Kolmogorov-Smirnov D statistic against the
    /// target normal distribution. Always runs the full pass budget.
    Ks,
}

/// Configuration for a greedy selection run.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use poseidon_select::{MetricKind, Scaling, SelectionConfig};
///
/// let config = SelectionConfig::new(30)
///     .with_scaling(Scaling::Conditional)
///     .with_conditioning_period(8)
///     .with_max_scale_factor(4.0)
///     .with_tolerance_pct(10.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.metric(), MetricKind::Sse);
/// ```
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Number of records in the selected subset.
    n_select: usize,
    /// Amplitude-scaling mode.
    scaling: Scaling,
    /// Maximum admissible scale factor.
    max_scale_factor: f64,
    /// Convergence tolerance in percent (SSE metric only).
    tolerance_pct: f64,
    /// Deviation metric.
    metric: MetricKind,
    /// Weight of the three-sigma exceedance penalty. 0 disables it.
    penalty_weight: f64,
    /// Weights on the (mean, sd, skew) error terms.
    error_weights: [f64; 3],
    /// Number of full sweeps over the subset slots.
    max_passes: usize,
    /// Index of the conditioning period on the period axis, if any.
    conditioning_period: Option<usize>,
}

impl SelectionConfig {
    /// Creates a new configuration selecting `n_select` records.
    ///
    /// Defaults: no scaling, `max_scale_factor = 4.0`, `tolerance_pct = 10.0`,
    /// SSE metric with weights `[1.0, 2.0, 0.3]`, no penalty, `max_passes = 2`,
    /// no conditioning period.
    pub fn new(n_select: usize) -> Self {
        Self {
            n_select,
            scaling: Scaling::Off,
            max_scale_factor: 4.0,
            tolerance_pct: 10.0,
            metric: MetricKind::Sse,
            penalty_weight: 0.0,
            error_weights: [1.0, 2.0, 0.3],
            max_passes: 2,
            conditioning_period: None,
        }
    }

    /// Sets the scaling mode.
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Sets the maximum admissible scale factor.
    pub fn with_max_scale_factor(mut self, max_scale_factor: f64) -> Self {
        self.max_scale_factor = max_scale_factor;
        self
    }

    /// Sets the convergence tolerance in percent.
    pub fn with_tolerance_pct(mut self, tolerance_pct: f64) -> Self {
        self.tolerance_pct = tolerance_pct;
        self
    }

    /// Sets the deviation metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the three-sigma exceedance penalty weight.
    pub fn with_penalty_weight(mut self, penalty_weight: f64) -> Self {
        self.penalty_weight = penalty_weight;
        self
    }

    /// Sets the weights on the (mean, sd, skew) error terms.
    pub fn with_error_weights(mut self, error_weights: [f64; 3]) -> Self {
        self.error_weights = error_weights;
        self
    }

    /// Sets the pass budget.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Sets the conditioning period index.
    pub fn with_conditioning_period(mut self, index: usize) -> Self {
        self.conditioning_period = Some(index);
        self
    }

    /// Returns the subset size.
    pub fn n_select(&self) -> usize {
        self.n_select
    }

    /// Returns the scaling mode.
    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    /// Returns the maximum admissible scale factor.
    pub fn max_scale_factor(&self) -> f64 {
        self.max_scale_factor
    }

    /// Returns the convergence tolerance in percent.
    pub fn tolerance_pct(&self) -> f64 {
        self.tolerance_pct
    }

    /// Returns the deviation metric.
    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Returns the three-sigma exceedance penalty weight.
    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    /// Returns the weights on the (mean, sd, skew) error terms.
    pub fn error_weights(&self) -> [f64; 3] {
        self.error_weights
    }

    /// Returns the pass budget.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Returns the conditioning period index, if any.
    pub fn conditioning_period(&self) -> Option<usize> {
        self.conditioning_period
    }

    /// Validates this configuration.
    ///
    /// Checks the subset size, pass budget, scale cap, tolerance, weight
    /// signs, and that conditional scaling names a conditioning period.
    /// Bounds against the pool and period axis are checked by the optimizer,
    /// which knows the data shapes.
    pub fn validate(&self) -> Result<(), SelectError> {
        if self.n_select < 1 {
            return Err(SelectError::InvalidNSelect {
                n_select: self.n_select,
            });
        }
        if self.max_passes < 1 {
            return Err(SelectError::InvalidMaxPasses {
                max_passes: self.max_passes,
            });
        }
        if !self.max_scale_factor.is_finite() || self.max_scale_factor <= 0.0 {
            return Err(SelectError::InvalidMaxScale {
                value: self.max_scale_factor,
            });
        }
        if !self.tolerance_pct.is_finite() || self.tolerance_pct < 0.0 {
            return Err(SelectError::InvalidTolerance {
                value: self.tolerance_pct,
            });
        }
        for (index, &value) in self.error_weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectError::InvalidErrorWeight { index, value });
            }
        }
        if !self.penalty_weight.is_finite() || self.penalty_weight < 0.0 {
            return Err(SelectError::InvalidPenaltyWeight {
                value: self.penalty_weight,
            });
        }
        if self.scaling == Scaling::Conditional && self.conditioning_period.is_none() {
            return Err(SelectError::MissingConditioningPeriod);
        }
        Ok(())
    }
}
