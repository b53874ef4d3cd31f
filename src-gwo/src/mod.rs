//! Grey Wolf Optimizer (GWO) global optimizer in pure Rust using ndarray
//!
//! A population of wolves explores a box constrained search space. After
//! every evaluation pass the K best wolves become leaders and every wolf
//! moves towards a randomized blend of their positions ("encircling the
//! prey"). The exploration radius is driven by a control parameter that
//! decays linearly from 2 to 0 over a fixed iteration budget.
//!
//! Supported features:
//! - Box constraints (lower/upper bounds), positions clipped after each move
//! - Scalar or batched objectives through the [`Objective`] trait
//! - Configurable number of leaders (default 3)
//! - Seeded, reproducible runs with `StdRng` or the bundled [`XorShift64`]
//! - Optional rayon parallelism for evaluation and position updates
//! - Per-iteration callback and CSV recording of the trajectory
//!
//! # Example
//!
//! ```rust
//! use gwo::{GWOConfigBuilder, GreyWolf, GwoSetup, FnObjective};
//! use ndarray::Array1;
//!
//! let setup = GwoSetup::uniform(5, 50, -10.0, 10.0);
//! let sphere = FnObjective::new(|x: &Array1<f64>| x.iter().map(|v| v * v).sum());
//! let config = GWOConfigBuilder::new().seed(1).build();
//! let mut gwo = GreyWolf::with_config(&setup, sphere, config)?;
//! let alpha = gwo.run(200)?;
//! assert!(alpha.fitness < 1e-2);
//! # Ok::<(), gwo::GwoError>(())
//! ```

#![allow(missing_docs)]

pub mod grey_wolf;
pub mod grey_wolf_optimizer;
pub mod leader_set;
pub mod objective;
pub mod parallel_eval;
pub mod population;
pub mod random_source;
pub mod recorder;
pub mod run_recorded;
pub mod search_space;
pub mod update_positions;
pub mod wolf;

pub use grey_wolf::{GWOConfig, GWOConfigBuilder, GWOIntermediate, GWOReport, GreyWolf};
pub use grey_wolf_optimizer::grey_wolf_optimizer;
pub use leader_set::LeaderSet;
pub use objective::{BatchFnObjective, FnObjective, Objective};
pub use parallel_eval::{ParallelConfig, ParallelObjective};
pub use population::{GwoSetup, Population};
pub use random_source::{RandomSource, XorShift64};
pub use recorder::{OptimizationRecord, OptimizationRecorder};
pub use run_recorded::run_recorded_grey_wolf;
pub use search_space::SearchSpace;
pub use update_positions::control_parameter;
pub use wolf::Wolf;

/// Default number of leaders (alpha, beta and delta)
pub const DEFAULT_LEADERS: usize = 3;

/// Errors raised by the optimizer
#[derive(Debug, thiserror::Error)]
pub enum GwoError {
	/// Rejected setup; no optimizer is created
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// The objective does not provide the requested entry point
	#[error("{0}")]
	Unimplemented(&'static str),

	/// A batch evaluation returned the wrong number of values
	#[error("objective returned {got} fitness values for {expected} positions")]
	BatchSize { expected: usize, got: usize },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
}

pub type GwoResult<T> = Result<T, GwoError>;
