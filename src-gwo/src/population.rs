use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::random_source::RandomSource;
use crate::search_space::SearchSpace;
use crate::wolf::Wolf;
use crate::{GwoError, GwoResult};

/// Problem dimensions and bounds, validated when a population is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GwoSetup {
	/// Number of decision variables
	pub n: usize,
	/// Number of wolves
	pub pop_size: usize,
	pub lower: Vec<f64>,
	pub upper: Vec<f64>,
}

impl GwoSetup {
	/// Same `[lo, hi]` interval on every dimension
	pub fn uniform(n: usize, pop_size: usize, lo: f64, hi: f64) -> Self {
		Self { n, pop_size, lower: vec![lo; n], upper: vec![hi; n] }
	}

	/// From `(lower, upper)` pairs, one per dimension
	pub fn from_bounds(bounds: &[(f64, f64)], pop_size: usize) -> Self {
		Self {
			n: bounds.len(),
			pop_size,
			lower: bounds.iter().map(|&(lo, _)| lo).collect(),
			upper: bounds.iter().map(|&(_, hi)| hi).collect(),
		}
	}

	/// Check sizes and build the search space
	pub fn search_space(&self) -> GwoResult<SearchSpace> {
		if self.n == 0 || self.pop_size == 0 {
			return Err(GwoError::InvalidConfiguration("N and POP_SIZE must be > 0".into()));
		}
		if self.lower.len() != self.n || self.upper.len() != self.n {
			return Err(GwoError::InvalidConfiguration(format!(
				"lower and upper must have size N={} (got {} and {})",
				self.n,
				self.lower.len(),
				self.upper.len()
			)));
		}
		SearchSpace::new(Array1::from(self.lower.clone()), Array1::from(self.upper.clone()))
	}
}

/// Fixed size, ordered set of wolves sharing one search space
#[derive(Debug, Clone)]
pub struct Population {
	wolves: Vec<Wolf>,
}

impl Population {
	/// Validate `setup` and scatter `pop_size` wolves uniformly in the box
	pub fn build<R: RandomSource + ?Sized>(
		setup: &GwoSetup,
		rng: &mut R,
	) -> GwoResult<(Self, SearchSpace)> {
		let space = setup.search_space()?;
		let wolves = (0..setup.pop_size).map(|_| Wolf::new(space.sample(rng))).collect();
		Ok((Self { wolves }, space))
	}

	pub fn len(&self) -> usize {
		self.wolves.len()
	}

	pub fn is_empty(&self) -> bool {
		self.wolves.is_empty()
	}

	pub fn dim(&self) -> usize {
		self.wolves.first().map(Wolf::dim).unwrap_or(0)
	}

	pub fn wolves(&self) -> &[Wolf] {
		&self.wolves
	}

	pub(crate) fn wolves_mut(&mut self) -> &mut [Wolf] {
		&mut self.wolves
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Wolf> {
		self.wolves.iter()
	}

	/// Positions as a `len x dim` matrix, one wolf per row
	pub fn positions(&self) -> Array2<f64> {
		let mut m = Array2::zeros((self.len(), self.dim()));
		for (mut row, wolf) in m.rows_mut().into_iter().zip(self.wolves.iter()) {
			row.assign(&wolf.position);
		}
		m
	}

	/// Fitness values in population order
	pub fn fitness(&self) -> Array1<f64> {
		self.wolves.iter().map(|w| w.fitness).collect()
	}

	/// Store one fitness per wolf, in order
	pub(crate) fn set_fitness(&mut self, values: &Array1<f64>) -> GwoResult<()> {
		if values.len() != self.len() {
			return Err(GwoError::BatchSize { expected: self.len(), got: values.len() });
		}
		for (wolf, &f) in self.wolves.iter_mut().zip(values.iter()) {
			wolf.fitness = f;
		}
		Ok(())
	}
}

impl<'a> IntoIterator for &'a Population {
	type Item = &'a Wolf;
	type IntoIter = std::slice::Iter<'a, Wolf>;

	fn into_iter(self) -> Self::IntoIter {
		self.wolves.iter()
	}
}
