//! Best-K retention with a bounded max-heap
//!
//! Each wolf is pushed in turn and the worst retained one is evicted as soon
//! as the heap grows past K, leaving the K lowest fitness values without a
//! full sort. The set is a snapshot: it is rebuilt after every evaluation
//! pass and never patched incrementally.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::population::Population;
use crate::wolf::Wolf;

/// Heap entry ordered by fitness, largest (worst) first. NaN compares as
/// the worst value so it is evicted before any real fitness.
#[derive(Debug, Clone)]
struct ByFitness(Wolf);

impl ByFitness {
	fn key(&self) -> f64 {
		if self.0.fitness.is_nan() { f64::INFINITY } else { self.0.fitness }
	}
}

impl PartialEq for ByFitness {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for ByFitness {}

impl PartialOrd for ByFitness {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for ByFitness {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key()
			.total_cmp(&other.key())
			.then_with(|| self.0.fitness.is_nan().cmp(&other.0.fitness.is_nan()))
	}
}

/// The K best wolves of the latest evaluation pass
#[derive(Debug, Clone)]
pub struct LeaderSet {
	capacity: usize,
	heap: BinaryHeap<ByFitness>,
}

impl LeaderSet {
	/// Empty set retaining at most `capacity` wolves
	pub fn new(capacity: usize) -> Self {
		Self { capacity, heap: BinaryHeap::with_capacity(capacity + 1) }
	}

	/// Select the `capacity` best wolves of `population`
	pub fn from_population(population: &Population, capacity: usize) -> Self {
		let mut leaders = Self::new(capacity);
		for wolf in population {
			leaders.offer(wolf);
		}
		leaders
	}

	/// Insert a copy of `wolf`, evicting the worst entry when over capacity
	pub fn offer(&mut self, wolf: &Wolf) {
		self.heap.push(ByFitness(wolf.clone()));
		if self.heap.len() > self.capacity {
			self.heap.pop();
		}
	}

	pub fn len(&self) -> usize {
		self.heap.len()
	}

	pub fn is_empty(&self) -> bool {
		self.heap.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Leaders in extraction order: the worst of the K first, the best last
	pub fn best_k(&self) -> Vec<Wolf> {
		let mut copy = self.heap.clone();
		let mut out = Vec::with_capacity(copy.len());
		while let Some(ByFitness(wolf)) = copy.pop() {
			out.push(wolf);
		}
		out
	}

	/// Lowest fitness leader
	pub fn best(&self) -> Option<&Wolf> {
		self.heap.iter().min().map(|entry| &entry.0)
	}

	/// Highest fitness leader, i.e. the next to be evicted
	pub fn worst(&self) -> Option<&Wolf> {
		self.heap.peek().map(|entry| &entry.0)
	}
}
