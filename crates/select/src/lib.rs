//! Greedy ground-motion record selection.
//!
//! This crate picks a fixed-size subset of candidate response spectra whose
//! log-space distribution (median, standard deviation, and optionally
//! skewness) matches a target spectrum. The search is a greedy
//! remove-and-reinsert local search: each pass visits every subset slot,
//! removes its occupant, scores every pool record as the replacement, and
//! keeps the best scorer.
//!
//! Three amplitude-scaling modes are supported:
//!
//! | Mode | Factor | Use case |
//! |------|--------|----------|
//! | Off | `1` for every record | Unscaled selection |
//! | Conditional | `exp(m_k - v_k)` at conditioning period `k` | Conditional spectra |
//! | Joint | per-slot closed form over all periods | Unconditional targets |
//!
//! # Quick start
//!
//! ```
//! use poseidon_select::{
//!     CandidatePool, NoProgress, SelectionConfig, TargetSpectrum, optimize, rank_initial,
//! };
//!
//! let pool = CandidatePool::new(vec![0.0, 1.0, 2.0, 3.0], 1).unwrap();
//! let target = TargetSpectrum::new(vec![1.5], vec![0.7]).unwrap();
//! let config = SelectionConfig::new(2);
//!
//! let initial = rank_initial(&config, &target, &pool).unwrap();
//! let result = optimize(&config, &target, &pool, initial, &mut NoProgress).unwrap();
//! assert_eq!(result.selected().n_select(), 2);
//! ```
//!
//! # Architecture
//!
//! ```text
//! optimize()
//!   ├─ validate inputs
//!   ├─ conditional_factors()      (scaling.rs, once per run)
//!   └─ per pass, per slot:
//!        ├─ joint_factors()       (scaling.rs, Joint mode only)
//!        ├─ trial_deviation()     (deviation.rs, parallel fan-out)
//!        ├─ replace_slot()        (selected.rs)
//!        └─ max_percentage_errors() (convergence.rs, per pass, SSE only)
//! ```
//!
//! Trial scoring never materializes the substituted matrix: the candidate
//! row is spliced in through a lookup closure.

pub mod config;
pub mod convergence;
pub mod deviation;
pub mod error;
pub mod initial;
pub mod optimizer;
pub mod pool;
pub mod progress;
pub mod result;
pub mod selected;
pub mod target;

pub(crate) mod scaling;

pub use config::{MetricKind, Scaling, SelectionConfig};
pub use convergence::max_percentage_errors;
pub use deviation::set_deviation;
pub use error::SelectError;
pub use initial::rank_initial;
pub use optimizer::optimize;
pub use pool::CandidatePool;
pub use progress::{NoProgress, Progress};
pub use result::SelectionResult;
pub use selected::SelectedSet;
pub use target::TargetSpectrum;
