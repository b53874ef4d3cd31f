//! Objective functions seen by the optimizer
//!
//! An objective supplies fitness either one position at a time
//! ([`Objective::evaluate`]) or for a whole population at once
//! ([`Objective::evaluate_batch`]). Implement whichever is natural: the
//! default batch walks the rows and calls `evaluate`, while a batch-only
//! objective leaves `evaluate` unimplemented. The optimizer itself only ever
//! calls the batched form. Lower fitness is better.

use std::sync::Arc;

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{GwoError, GwoResult};

pub trait Objective {
	/// Fitness of a single position.
	///
	/// # Errors
	///
	/// The default returns [`GwoError::Unimplemented`]; objectives that only
	/// provide `evaluate_batch` keep it.
	fn evaluate(&self, _x: ArrayView1<'_, f64>) -> GwoResult<f64> {
		Err(GwoError::Unimplemented(
			"evaluate() not implemented. Did you mean to implement evaluate_batch()?",
		))
	}

	/// Fitness of every row of `xs`, in row order
	fn evaluate_batch(&self, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>> {
		let mut out = Array1::zeros(xs.nrows());
		for (i, row) in xs.rows().into_iter().enumerate() {
			out[i] = self.evaluate(row)?;
		}
		Ok(out)
	}
}

impl<T: Objective + ?Sized> Objective for &T {
	fn evaluate(&self, x: ArrayView1<'_, f64>) -> GwoResult<f64> {
		(**self).evaluate(x)
	}

	fn evaluate_batch(&self, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>> {
		(**self).evaluate_batch(xs)
	}
}

impl<T: Objective + ?Sized> Objective for Box<T> {
	fn evaluate(&self, x: ArrayView1<'_, f64>) -> GwoResult<f64> {
		(**self).evaluate(x)
	}

	fn evaluate_batch(&self, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>> {
		(**self).evaluate_batch(xs)
	}
}

impl<T: Objective + ?Sized> Objective for Arc<T> {
	fn evaluate(&self, x: ArrayView1<'_, f64>) -> GwoResult<f64> {
		(**self).evaluate(x)
	}

	fn evaluate_batch(&self, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>> {
		(**self).evaluate_batch(xs)
	}
}

/// Scalar objective backed by a closure over one position
pub struct FnObjective<F>(F);

impl<F> FnObjective<F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	pub fn new(f: F) -> Self {
		Self(f)
	}
}

impl<F> Objective for FnObjective<F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	fn evaluate(&self, x: ArrayView1<'_, f64>) -> GwoResult<f64> {
		Ok((self.0)(&x.to_owned()))
	}
}

/// Batch-only objective backed by a closure over the whole population matrix
pub struct BatchFnObjective<F>(F);

impl<F> BatchFnObjective<F>
where
	F: Fn(ArrayView2<'_, f64>) -> Array1<f64>,
{
	pub fn new(f: F) -> Self {
		Self(f)
	}
}

impl<F> Objective for BatchFnObjective<F>
where
	F: Fn(ArrayView2<'_, f64>) -> Array1<f64>,
{
	fn evaluate_batch(&self, xs: ArrayView2<'_, f64>) -> GwoResult<Array1<f64>> {
		let out = (self.0)(xs);
		if out.len() != xs.nrows() {
			return Err(GwoError::BatchSize { expected: xs.nrows(), got: out.len() });
		}
		Ok(out)
	}
}
