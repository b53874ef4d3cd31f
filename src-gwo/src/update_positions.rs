use ndarray::{Array1, Zip};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::population::Population;
use crate::random_source::RandomSource;
use crate::search_space::SearchSpace;
use crate::wolf::Wolf;

/// Control parameter `a`, decaying linearly from 2 at the first iteration
/// towards 0 at the last one.
pub fn control_parameter(iter: usize, max_iterations: usize) -> f64 {
	if max_iterations == 0 {
		return 0.0;
	}
	2.0 * (1.0 - iter as f64 / max_iterations as f64)
}

/// Encircling move of one wolf towards the leaders.
///
/// For each leader and dimension: `A = 2a r1 - a`, `C = 2 r2`,
/// `D = |C leader - x|`, and the leader contributes `leader - A D`. The
/// contributions are averaged and clipped into the box.
pub(crate) fn encircle<R: RandomSource + ?Sized>(
	wolf: &mut Wolf,
	leaders: &[Wolf],
	a: f64,
	space: &SearchSpace,
	rng: &mut R,
) {
	if leaders.is_empty() {
		return;
	}
	let n = wolf.dim();
	let mut target = Array1::<f64>::zeros(n);
	let mut coef_a = Array1::<f64>::zeros(n);
	let mut coef_c = Array1::<f64>::zeros(n);
	for leader in leaders {
		for k in 0..n {
			coef_a[k] = 2.0 * a * rng.next_uniform(0.0, 1.0) - a;
			coef_c[k] = 2.0 * rng.next_uniform(0.0, 1.0);
		}
		Zip::from(&mut target)
			.and(&leader.position)
			.and(&wolf.position)
			.and(&coef_a)
			.and(&coef_c)
			.for_each(|t, &l, &x, &ca, &cc| {
				let d = (l * cc - x).abs();
				*t += l - d * ca;
			});
	}
	target /= leaders.len() as f64;
	space.clip(&mut target);
	wolf.position = target;
}

/// Move every wolf against the same leader snapshot, drawing from one
/// shared stream in population order.
pub fn update_positions<R: RandomSource + ?Sized>(
	population: &mut Population,
	leaders: &[Wolf],
	a: f64,
	space: &SearchSpace,
	rng: &mut R,
) {
	for wolf in population.wolves_mut() {
		encircle(wolf, leaders, a, space, rng);
	}
}

/// Same move on the rayon pool. One seed is taken from `rng` per call and
/// wolf `i` draws from its own `StdRng` seeded with `seed + i`, so results do
/// not depend on scheduling.
pub fn update_positions_parallel<R: RngCore + ?Sized>(
	population: &mut Population,
	leaders: &[Wolf],
	a: f64,
	space: &SearchSpace,
	rng: &mut R,
) {
	let base_seed = rng.next_u64();
	population.wolves_mut().par_iter_mut().enumerate().for_each(|(i, wolf)| {
		let mut local_rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
		encircle(wolf, leaders, a, space, &mut local_rng);
	});
}
