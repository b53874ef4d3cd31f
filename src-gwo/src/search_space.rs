use ndarray::Array1;

use crate::random_source::RandomSource;
use crate::{GwoError, GwoResult};

/// Box constraints `lower[i] <= x[i] <= upper[i]`, fixed once built
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
	lower: Array1<f64>,
	upper: Array1<f64>,
}

impl SearchSpace {
	/// Validate and build the box.
	///
	/// # Errors
	///
	/// `InvalidConfiguration` if the box has no dimension, the two vectors
	/// differ in length, a bound is NaN or infinite, or some
	/// `upper[i] < lower[i]`.
	pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> GwoResult<Self> {
		if lower.is_empty() {
			return Err(GwoError::InvalidConfiguration("N must be > 0".into()));
		}
		if lower.len() != upper.len() {
			return Err(GwoError::InvalidConfiguration(format!(
				"lower has {} entries but upper has {}",
				lower.len(),
				upper.len()
			)));
		}
		for (i, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
			if lo.is_nan() || hi.is_nan() {
				return Err(GwoError::InvalidConfiguration(format!("bound[{}] is NaN", i)));
			}
			if lo.is_infinite() || hi.is_infinite() {
				return Err(GwoError::InvalidConfiguration(format!("bound[{}] is not finite", i)));
			}
			if hi < lo {
				return Err(GwoError::InvalidConfiguration(format!(
					"bound[{}] has upper {} < lower {}",
					i, hi, lo
				)));
			}
		}
		Ok(Self { lower, upper })
	}

	/// Build from `(lower, upper)` pairs
	pub fn from_bounds(bounds: &[(f64, f64)]) -> GwoResult<Self> {
		let lower = bounds.iter().map(|&(lo, _)| lo).collect();
		let upper = bounds.iter().map(|&(_, hi)| hi).collect();
		Self::new(lower, upper)
	}

	pub fn dim(&self) -> usize {
		self.lower.len()
	}

	pub fn lower(&self) -> &Array1<f64> {
		&self.lower
	}

	pub fn upper(&self) -> &Array1<f64> {
		&self.upper
	}

	/// True when every coordinate of `x` lies inside the box
	pub fn contains(&self, x: &Array1<f64>) -> bool {
		x.len() == self.dim()
			&& x.iter()
				.zip(self.lower.iter().zip(self.upper.iter()))
				.all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
	}

	/// Clip `x` in place into the box
	pub fn clip(&self, x: &mut Array1<f64>) {
		for i in 0..x.len() {
			x[i] = x[i].max(self.lower[i]).min(self.upper[i]);
		}
	}

	/// Draw one point, coordinate i uniform in `[lower[i], upper[i])`
	pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
		Array1::from_shape_fn(self.dim(), |i| rng.next_uniform(self.lower[i], self.upper[i]))
	}
}
