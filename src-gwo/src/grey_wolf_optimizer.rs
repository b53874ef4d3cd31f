use ndarray::Array1;

use crate::objective::FnObjective;
use crate::parallel_eval::ParallelObjective;
use crate::{GWOConfig, GWOReport, GreyWolf, GwoResult, GwoSetup};

/// Convenience function in the shape of SciPy's optimizers:
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs
/// - `pop_size`: number of wolves
/// - `max_iterations`: number of update passes
/// - `config`: GWO configuration; with `parallel.enabled` the population is
///   also evaluated on the rayon pool
pub fn grey_wolf_optimizer<F>(
	func: &F,
	bounds: &[(f64, f64)],
	pop_size: usize,
	max_iterations: usize,
	config: GWOConfig,
) -> GwoResult<GWOReport>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let setup = GwoSetup::from_bounds(bounds, pop_size);
	let objective = FnObjective::new(func);
	if config.parallel.enabled {
		GreyWolf::with_config(&setup, ParallelObjective::new(objective), config)?.solve(max_iterations)
	} else {
		GreyWolf::with_config(&setup, objective, config)?.solve(max_iterations)
	}
}
