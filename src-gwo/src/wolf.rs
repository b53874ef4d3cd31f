use std::fmt;

use ndarray::Array1;

/// One search agent: a point in the search space and its last fitness
#[derive(Debug, Clone, PartialEq)]
pub struct Wolf {
	/// Current position, one entry per dimension
	pub position: Array1<f64>,
	/// Fitness from the latest evaluation pass; stale after a position update
	pub fitness: f64,
}

impl Wolf {
	/// A wolf that has not been evaluated yet
	pub fn new(position: Array1<f64>) -> Self {
		Self { position, fitness: f64::INFINITY }
	}

	pub fn dim(&self) -> usize {
		self.position.len()
	}
}

impl fmt::Display for Wolf {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[")?;
		for (i, x) in self.position.iter().enumerate() {
			if i > 0 {
				write!(f, ",")?;
			}
			write!(f, "{}", x)?;
		}
		write!(f, "]")
	}
}
