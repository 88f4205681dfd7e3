//! Output type of a selection run.

use crate::selected::SelectedSet;

/// Result of a greedy selection run.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// The optimized subset.
    selected: SelectedSet,
    /// Number of passes actually executed.
    passes_run: usize,
    /// Whether the run stopped early on the tolerance check (SSE only).
    converged: bool,
    /// Final `(mean_error_pct, sd_error_pct)` pair. `None` in KS mode.
    errors_pct: Option<(f64, f64)>,
}

impl SelectionResult {
    pub(crate) fn new(
        selected: SelectedSet,
        passes_run: usize,
        converged: bool,
        errors_pct: Option<(f64, f64)>,
    ) -> Self {
        Self {
            selected,
            passes_run,
            converged,
            errors_pct,
        }
    }

    /// Returns the optimized subset.
    pub fn selected(&self) -> &SelectedSet {
        &self.selected
    }

    /// Consumes the result, returning the optimized subset.
    pub fn into_selected(self) -> SelectedSet {
        self.selected
    }

    /// Returns the number of passes actually executed.
    pub fn passes_run(&self) -> usize {
        self.passes_run
    }

    /// True if the run stopped early on the tolerance check.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns the final `(mean_error_pct, sd_error_pct)` pair, if computed.
    pub fn errors_pct(&self) -> Option<(f64, f64)> {
        self.errors_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::CandidatePool;

    #[test]
    fn accessors() {
        let pool = CandidatePool::new(vec![0.0, 1.0], 1).unwrap();
        let set = SelectedSet::from_pool(&pool, vec![1]).unwrap();
        let result = SelectionResult::new(set.clone(), 2, true, Some((1.5, 3.0)));

        assert_eq!(result.selected().indices(), &[1]);
        assert_eq!(result.passes_run(), 2);
        assert!(result.converged());
        assert_eq!(result.errors_pct(), Some((1.5, 3.0)));
        assert_eq!(result.into_selected().indices(), set.indices());
    }
}
