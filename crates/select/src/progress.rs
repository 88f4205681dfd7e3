//! Injected progress feedback.
//!
//! Cosmetic only: implementations observe the optimizer, they cannot steer
//! it. Hooks default to no-ops so callers implement only what they need.

/// Observer for optimizer progress.
pub trait Progress {
    /// Called after a slot has been (re)filled.
    fn slot_replaced(&mut self, pass: usize, slot: usize, record: usize) {
        let _ = (pass, slot, record);
    }

    /// Called after a full pass. `errors` carries the
    /// `(mean_error_pct, sd_error_pct)` pair for SSE runs and is `None` in
    /// KS mode.
    fn pass_complete(&mut self, pass: usize, errors: Option<(f64, f64)>) {
        let _ = (pass, errors);
    }
}

/// Progress observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}
