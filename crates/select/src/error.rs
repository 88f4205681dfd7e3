//! Error types for the poseidon-select crate.

/// Error type for all fallible operations in the poseidon-select crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SelectError {
    /// Returned when the candidate pool contains no records.
    #[error("candidate pool is empty")]
    EmptyPool,

    /// Returned when the pool matrix length is not divisible by the period count.
    #[error("pool length {len} is not divisible by n_periods {n_periods}")]
    PoolShapeMismatch {
        /// Length of the flat pool slice.
        len: usize,
        /// Expected number of periods per record.
        n_periods: usize,
    },

    /// Returned when the requested subset size is zero.
    #[error("n_select must be >= 1, got {n_select}")]
    InvalidNSelect {
        /// The invalid subset size.
        n_select: usize,
    },

    /// Returned when the subset would leave no replacement candidates.
    ///
    /// The greedy step needs at least one non-selected candidate per slot, so
    /// the subset must be strictly smaller than the pool.
    #[error("n_select {n_select} must be smaller than pool size {pool_size}")]
    SelectionExceedsPool {
        /// Requested subset size.
        n_select: usize,
        /// Number of records in the pool.
        pool_size: usize,
    },

    /// Returned when max_passes is zero.
    #[error("max_passes must be >= 1, got {max_passes}")]
    InvalidMaxPasses {
        /// The invalid pass budget.
        max_passes: usize,
    },

    /// Returned when the maximum scale factor is non-finite or non-positive.
    #[error("max_scale_factor must be finite and positive, got {value}")]
    InvalidMaxScale {
        /// The invalid maximum scale factor.
        value: f64,
    },

    /// Returned when the convergence tolerance is negative or non-finite.
    #[error("tolerance_pct must be finite and >= 0, got {value}")]
    InvalidTolerance {
        /// The invalid tolerance.
        value: f64,
    },

    /// Returned when an error weight is negative or non-finite.
    #[error("error weight {index} must be finite and >= 0, got {value}")]
    InvalidErrorWeight {
        /// Position in the (mean, sd, skew) weight vector.
        index: usize,
        /// The invalid weight.
        value: f64,
    },

    /// Returned when the exceedance penalty weight is negative or non-finite.
    #[error("penalty_weight must be finite and >= 0, got {value}")]
    InvalidPenaltyWeight {
        /// The invalid penalty weight.
        value: f64,
    },

    /// Returned when conditional scaling is configured without a conditioning period.
    #[error("conditional scaling requires a conditioning period")]
    MissingConditioningPeriod,

    /// Returned when the conditioning period index is outside the period axis.
    #[error("conditioning period {index} out of range for {n_periods} periods")]
    ConditioningPeriodOutOfRange {
        /// The out-of-range index.
        index: usize,
        /// Number of periods on the axis.
        n_periods: usize,
    },

    /// Returned when two inputs disagree on the number of periods.
    #[error("{name} has {got} periods, expected {expected}")]
    PeriodCountMismatch {
        /// Name of the mismatched input.
        name: &'static str,
        /// Expected period count.
        expected: usize,
        /// Actual period count.
        got: usize,
    },

    /// Returned when the initial selection does not match the configured subset size.
    #[error("initial selection has {got} slots, expected {expected}")]
    SelectionSizeMismatch {
        /// Expected number of slots.
        expected: usize,
        /// Actual number of slots.
        got: usize,
    },

    /// Returned when a selected index is outside the pool.
    #[error("selected index {index} out of range for pool size {pool_size}")]
    IndexOutOfRange {
        /// The out-of-range pool index.
        index: usize,
        /// Number of records in the pool.
        pool_size: usize,
    },

    /// Returned when the same pool record occupies two slots.
    #[error("pool record {index} selected more than once")]
    DuplicateIndex {
        /// The duplicated pool index.
        index: usize,
    },

    /// Returned when a scale factor is non-finite or non-positive.
    #[error("scale factor for slot {slot} must be finite and positive, got {value}")]
    InvalidScaleFactor {
        /// Slot holding the invalid factor.
        slot: usize,
        /// The invalid factor.
        value: f64,
    },

    /// Returned when a target standard deviation is zero.
    ///
    /// A zero stdev would divide by zero in the percentage-error check and
    /// degenerate the KS reference distribution, so it is rejected up front
    /// instead of letting a non-finite value propagate.
    #[error("target standard deviation is zero at period {period}")]
    ZeroTargetStdev {
        /// Period index with zero stdev.
        period: usize,
    },

    /// Returned when a target standard deviation is negative.
    #[error("target standard deviation at period {period} is negative, got {value}")]
    NegativeTargetStdev {
        /// Period index with negative stdev.
        period: usize,
        /// The negative stdev.
        value: f64,
    },

    /// Returned when a required input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when a slot has no candidate left to occupy it.
    ///
    /// Cannot occur when the pool is strictly larger than the subset, but the
    /// greedy loop guards it rather than looping forever.
    #[error("no replacement candidate available for slot {slot}")]
    NoReplacementCandidate {
        /// Slot that could not be filled.
        slot: usize,
    },

    /// Returned when the covariance matrix is not `n_periods x n_periods`.
    #[error("covariance has {len} entries, expected {expected} ({n_periods}^2)")]
    CovarianceShapeMismatch {
        /// Length of the flat covariance slice.
        len: usize,
        /// Expected entry count.
        expected: usize,
        /// Number of periods on the axis.
        n_periods: usize,
    },
}
