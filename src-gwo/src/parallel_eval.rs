//! Rayon backed population evaluation

use ndarray::{Array1, ArrayView1, ArrayView2, s};
use rayon::prelude::*;

use crate::objective::Objective;
use crate::{GwoError, GwoResult};

/// Parallel execution settings
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
	/// Update wolf positions on the rayon pool. Batch evaluation is
	/// parallel only through [`ParallelObjective`], which
	/// `grey_wolf_optimizer` applies when this flag is set.
	pub enabled: bool,
	/// Size of the global rayon pool; `None` keeps rayon's default
	pub num_threads: Option<usize>,
}

impl ParallelConfig {
	/// Install the global pool once. Later calls are no-ops.
	pub(crate) fn install(&self) {
		if let Some(n) = self.num_threads {
			// Ignore error if global pool already set
			let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
		}
	}
}

/// Splits every batch into row blocks evaluated concurrently.
///
/// Each block goes through the wrapped objective's own `evaluate_batch`, so
/// both scalar and batch-only objectives work. Results keep row order.
pub struct ParallelObjective<O> {
	inner: O,
}

impl<O: Objective + Sync> ParallelObjective<O> {
	pub fn new(inner: O) -> Self {
		Self { inner }
	}

	pub fn into_inner(self) -> O {
		self.inner
	}
}

impl<O: Objective + Sync> Objective for ParallelObjective<O> {
	fn evaluate(&self, x: ArrayView1<'_, f64>) -> GwoResult<f64> {
		self.inner.evaluate(x)
	}

	fn evaluate_batch(&self, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>> {
		evaluate_population_parallel(&self.inner, xs)
	}
}

/// Evaluate `xs` block-wise on the current rayon pool
pub fn evaluate_population_parallel<O>(objective: &O, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>>
where
	O: Objective + Sync + ?Sized,
{
	let n = xs.nrows();
	if n == 0 {
		return Ok(Array1::zeros(0));
	}
	let chunk = n.div_ceil(rayon::current_num_threads()).max(1);
	let blocks: Vec<Array1<f64>> = (0..n.div_ceil(chunk))
		.into_par_iter()
		.map(|b| {
			let lo = b * chunk;
			let hi = (lo + chunk).min(n);
			let out = objective.evaluate_batch(xs.slice(s![lo..hi, ..]))?;
			if out.len() != hi - lo {
				return Err(GwoError::BatchSize { expected: hi - lo, got: out.len() });
			}
			Ok(out)
		})
		.collect::<GwoResult<_>>()?;
	Ok(blocks.iter().flat_map(|b| b.iter().copied()).collect())
}
