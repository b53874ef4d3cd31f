use std::fmt;

use log::{debug, trace};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::leader_set::LeaderSet;
use crate::objective::Objective;
use crate::parallel_eval::ParallelConfig;
use crate::population::{GwoSetup, Population};
use crate::search_space::SearchSpace;
use crate::update_positions::{control_parameter, update_positions, update_positions_parallel};
use crate::wolf::Wolf;
use crate::{DEFAULT_LEADERS, GwoError, GwoResult};

/// Information passed to the callback after each iteration
pub struct GWOIntermediate {
	/// Zero based index of the iteration that just finished
	pub iter: usize,
	/// Control parameter used for this iteration
	pub a: f64,
	/// Best position after re-evaluation
	pub x: Array1<f64>,
	pub fun: f64,
	/// Objective evaluations so far
	pub nfev: usize,
}

/// Engine options
pub struct GWOConfig {
	/// Number of leaders (K) steering each update
	pub leaders: usize,
	/// Seed for the default generator; `None` draws one from the OS
	pub seed: Option<u64>,
	/// Run the position update on the rayon pool. Evaluation stays on the
	/// calling thread unless the objective is wrapped in `ParallelObjective`.
	pub parallel: ParallelConfig,
	/// Optional per-iteration observer
	pub callback: Option<Box<dyn FnMut(&GWOIntermediate)>>,
}

impl Default for GWOConfig {
	fn default() -> Self {
		Self {
			leaders: DEFAULT_LEADERS,
			seed: None,
			parallel: ParallelConfig::default(),
			callback: None,
		}
	}
}

impl fmt::Debug for GWOConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GWOConfig")
			.field("leaders", &self.leaders)
			.field("seed", &self.seed)
			.field("parallel", &self.parallel)
			.field("callback", &self.callback.is_some())
			.finish()
	}
}

/// Fluent builder for `GWOConfig`
#[derive(Default)]
pub struct GWOConfigBuilder {
	cfg: GWOConfig,
}

impl GWOConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: GWOConfig::default() }
	}
	pub fn leaders(mut self, k: usize) -> Self {
		self.cfg.leaders = k;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		self.cfg.parallel = parallel;
		self
	}
	pub fn enable_parallel(mut self, enable: bool) -> Self {
		self.cfg.parallel.enabled = enable;
		self
	}
	pub fn parallel_threads(mut self, num_threads: usize) -> Self {
		self.cfg.parallel.num_threads = Some(num_threads);
		self
	}
	pub fn callback(mut self, cb: Box<dyn FnMut(&GWOIntermediate)>) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn build(self) -> GWOConfig {
		self.cfg
	}
}

/// Result of a complete run
#[derive(Clone)]
pub struct GWOReport {
	pub x: Array1<f64>,
	pub fun: f64,
	pub nit: usize,
	pub nfev: usize,
	pub population: Array2<f64>,
	pub population_fitness: Array1<f64>,
}

impl fmt::Debug for GWOReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GWOReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("population_fitness", &format!("len={}", self.population_fitness.len()))
			.finish()
	}
}

/// Grey Wolf Optimizer over one objective and one search space
pub struct GreyWolf<O, R = StdRng> {
	objective: O,
	space: SearchSpace,
	population: Population,
	leaders: LeaderSet,
	/// Lowest fitness leader of the latest evaluation pass
	alpha: Wolf,
	rng: R,
	config: GWOConfig,
	nfev: usize,
}

impl<O: Objective> GreyWolf<O, StdRng> {
	/// Build with default options and an OS-seeded generator
	pub fn new(setup: &GwoSetup, objective: O) -> GwoResult<Self> {
		Self::with_config(setup, objective, GWOConfig::default())
	}

	/// Build with `config`; the generator is seeded from `config.seed` when set
	pub fn with_config(setup: &GwoSetup, objective: O, config: GWOConfig) -> GwoResult<Self> {
		let rng = match config.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};
		Self::with_rng(setup, objective, config, rng)
	}
}

impl<O: Objective, R: RngCore> GreyWolf<O, R> {
	/// Build around a caller supplied generator. `config.seed` is ignored.
	///
	/// # Errors
	///
	/// `InvalidConfiguration` when the setup is malformed or `config.leaders`
	/// is zero. Nothing is allocated in that case.
	pub fn with_rng(
		setup: &GwoSetup,
		objective: O,
		config: GWOConfig,
		mut rng: R,
	) -> GwoResult<Self> {
		if config.leaders == 0 {
			return Err(GwoError::InvalidConfiguration("number of leaders must be > 0".into()));
		}
		let (population, space) = Population::build(setup, &mut rng)?;
		config.parallel.install();
		let alpha = Wolf::new(space.lower().clone());
		debug!(
			"GWO init: {} dimensions, population={}, leaders={}, parallel={}",
			space.dim(),
			population.len(),
			config.leaders,
			config.parallel.enabled
		);
		Ok(Self {
			objective,
			space,
			population,
			leaders: LeaderSet::new(config.leaders),
			alpha,
			rng,
			config,
			nfev: 0,
		})
	}

	/// Evaluate the whole population in one batch and rebuild the leaders
	pub fn evaluate(&mut self) -> GwoResult<()> {
		let fitness = self.objective.evaluate_batch(self.population.positions().view())?;
		self.population.set_fitness(&fitness)?;
		self.nfev += self.population.len();
		self.leaders = LeaderSet::from_population(&self.population, self.config.leaders);
		// never empty: construction guarantees POP_SIZE >= 1 and K >= 1
		if let Some(best) = self.leaders.best() {
			self.alpha = best.clone();
		}
		Ok(())
	}

	/// One iteration: move every wolf against the current leaders, then
	/// re-evaluate
	pub fn step(&mut self, a: f64) -> GwoResult<()> {
		let leaders = self.leaders.best_k();
		if self.config.parallel.enabled {
			update_positions_parallel(&mut self.population, &leaders, a, &self.space, &mut self.rng);
		} else {
			update_positions(&mut self.population, &leaders, a, &self.space, &mut self.rng);
		}
		self.evaluate()
	}

	/// Evaluate, then perform exactly `max_iterations` update passes and
	/// return the lowest fitness wolf of the final leader set.
	pub fn run(&mut self, max_iterations: usize) -> GwoResult<Wolf> {
		self.evaluate()?;
		for iter in 0..max_iterations {
			let a = control_parameter(iter, max_iterations);
			self.step(a)?;
			let info = GWOIntermediate {
				iter,
				a,
				x: self.alpha.position.clone(),
				fun: self.alpha.fitness,
				nfev: self.nfev,
			};
			trace!("GWO iter {:5}  a={:.4}  best_f={:.6e}", iter, a, info.fun);
			if let Some(cb) = self.config.callback.as_mut() {
				cb(&info);
			}
		}
		debug!(
			"GWO done: {} iterations, nfev={}, best_f={:.6e}",
			max_iterations, self.nfev, self.alpha.fitness
		);
		Ok(self.alpha.clone())
	}

	/// `run` packaged as a report with the final population
	pub fn solve(&mut self, max_iterations: usize) -> GwoResult<GWOReport> {
		let best = self.run(max_iterations)?;
		Ok(GWOReport {
			x: best.position,
			fun: best.fitness,
			nit: max_iterations,
			nfev: self.nfev,
			population: self.population.positions(),
			population_fitness: self.population.fitness(),
		})
	}

	/// Leaders of the latest pass, worst of the K first and best last
	pub fn best_k(&self) -> Vec<Wolf> {
		self.leaders.best_k()
	}

	/// Lowest fitness leader of the latest pass
	pub fn best(&self) -> Option<&Wolf> {
		self.leaders.best()
	}

	pub fn leaders(&self) -> &LeaderSet {
		&self.leaders
	}

	pub fn population(&self) -> &Population {
		&self.population
	}

	pub fn space(&self) -> &SearchSpace {
		&self.space
	}

	pub fn objective(&self) -> &O {
		&self.objective
	}

	/// Number of objective evaluations so far
	pub fn nfev(&self) -> usize {
		self.nfev
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut GWOConfig {
		&mut self.config
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::objective::{BatchFnObjective, FnObjective};
	use crate::random_source::XorShift64;
	use ndarray::Axis;
	use std::cell::RefCell;
	use std::rc::Rc;

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	fn seeded(seed: u64) -> GWOConfig {
		GWOConfigBuilder::new().seed(seed).build()
	}

	#[test]
	fn test_rejects_zero_leaders() {
		let cfg = GWOConfigBuilder::new().leaders(0).seed(1).build();
		let setup = GwoSetup::uniform(2, 5, -1.0, 1.0);
		let r = GreyWolf::with_config(&setup, FnObjective::new(sphere), cfg);
		assert!(matches!(r, Err(GwoError::InvalidConfiguration(_))));
	}

	#[test]
	fn test_rejects_bad_setup() {
		let setup = GwoSetup::uniform(2, 0, -1.0, 1.0);
		let r = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(1));
		assert!(matches!(r, Err(GwoError::InvalidConfiguration(_))));
	}

	#[test]
	fn test_run_zero_returns_initial_best() {
		let setup = GwoSetup::uniform(3, 20, -4.0, 4.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(8)).unwrap();
		let initial = gwo.population().positions();
		let best = gwo.run(0).unwrap();
		assert_eq!(gwo.population().positions(), initial);
		let min = gwo.population().fitness().iter().cloned().fold(f64::INFINITY, f64::min);
		assert_eq!(best.fitness, min);
		assert_eq!(best.fitness, sphere(&best.position));
		assert_eq!(gwo.nfev(), 20);
	}

	#[test]
	fn test_best_k_order_and_best() {
		let setup = GwoSetup::uniform(2, 10, -4.0, 4.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(2)).unwrap();
		let best = gwo.run(5).unwrap();
		let k = gwo.best_k();
		assert_eq!(k.len(), 3);
		assert!(k[0].fitness >= k[1].fitness && k[1].fitness >= k[2].fitness);
		assert_eq!(k[2].fitness, best.fitness);
		assert_eq!(gwo.best().unwrap().fitness, best.fitness);
	}

	#[test]
	fn test_leader_count_tracks_population() {
		let cfg = GWOConfigBuilder::new().leaders(5).seed(4).build();
		let setup = GwoSetup::uniform(2, 3, -1.0, 1.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), cfg).unwrap();
		gwo.run(3).unwrap();
		assert_eq!(gwo.leaders().len(), 3);
	}

	#[test]
	fn test_nfev_counts_every_pass() {
		let setup = GwoSetup::uniform(2, 7, -1.0, 1.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(3)).unwrap();
		gwo.run(4).unwrap();
		assert_eq!(gwo.nfev(), 7 * 5);
	}

	#[test]
	fn test_returned_wolf_is_current_leader() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let cfg = GWOConfigBuilder::new()
			.seed(5)
			.callback(Box::new(move |info: &GWOIntermediate| {
				sink.borrow_mut().push(info.fun);
			}))
			.build();
		let setup = GwoSetup::uniform(3, 9, -2.0, 2.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), cfg).unwrap();
		let best = gwo.run(6).unwrap();
		assert_eq!(&best, gwo.best().unwrap());
		let min = gwo.population().fitness().iter().cloned().fold(f64::INFINITY, f64::min);
		assert_eq!(best.fitness, min);
		assert_eq!(seen.borrow().last().copied(), Some(best.fitness));
	}

	#[test]
	fn test_parallel_update_keeps_evaluation_on_caller_thread() {
		use std::sync::Mutex;
		use std::thread::{self, ThreadId};

		let threads: Mutex<Vec<ThreadId>> = Mutex::new(Vec::new());
		let objective = FnObjective::new(|x: &Array1<f64>| {
			threads.lock().unwrap().push(thread::current().id());
			sphere(x)
		});
		let cfg = GWOConfigBuilder::new().seed(7).enable_parallel(true).build();
		let setup = GwoSetup::uniform(2, 32, -1.0, 1.0);
		let mut gwo = GreyWolf::with_config(&setup, objective, cfg).unwrap();
		gwo.run(3).unwrap();
		let caller = thread::current().id();
		let threads = threads.lock().unwrap();
		assert_eq!(threads.len(), 32 * 4);
		assert!(threads.iter().all(|&id| id == caller));
	}

	#[test]
	fn test_seeded_runs_are_identical_each_iteration() {
		let setup = GwoSetup::uniform(4, 15, -3.0, 3.0);
		let mut g1 = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(77)).unwrap();
		let mut g2 = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(77)).unwrap();
		g1.evaluate().unwrap();
		g2.evaluate().unwrap();
		for i in 0..20 {
			let a = control_parameter(i, 20);
			g1.step(a).unwrap();
			g2.step(a).unwrap();
			let (p1, p2) = (g1.population().positions(), g2.population().positions());
			assert!(p1.iter().zip(p2.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
		}
	}

	#[test]
	fn test_custom_generator() {
		let setup = GwoSetup::uniform(2, 10, -2.0, 2.0);
		let run = |seed| {
			let rng = XorShift64::new(seed);
			let mut gwo =
				GreyWolf::with_rng(&setup, FnObjective::new(sphere), GWOConfig::default(), rng).unwrap();
			gwo.run(10).unwrap()
		};
		assert_eq!(run(5), run(5));
	}

	#[test]
	fn test_batch_only_objective_drives_engine() {
		let objective = BatchFnObjective::new(|xs| xs.map_axis(Axis(1), |row| row.dot(&row)));
		let setup = GwoSetup::uniform(3, 12, -5.0, 5.0);
		let mut gwo = GreyWolf::with_config(&setup, objective, seeded(10)).unwrap();
		let best = gwo.run(50).unwrap();
		assert!((best.fitness - sphere(&best.position)).abs() < 1e-12);
	}

	#[test]
	fn test_unimplemented_objective_fails_run() {
		struct Nothing;
		impl Objective for Nothing {}
		let setup = GwoSetup::uniform(1, 2, 0.0, 1.0);
		let mut gwo = GreyWolf::with_config(&setup, Nothing, seeded(1)).unwrap();
		assert!(matches!(gwo.run(3), Err(GwoError::Unimplemented(_))));
	}

	#[test]
	fn test_callback_sees_every_iteration() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let cfg = GWOConfigBuilder::new()
			.seed(12)
			.callback(Box::new(move |info: &GWOIntermediate| {
				sink.borrow_mut().push((info.iter, info.a));
			}))
			.build();
		let setup = GwoSetup::uniform(2, 6, -1.0, 1.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), cfg).unwrap();
		gwo.run(4).unwrap();
		let seen = seen.borrow();
		assert_eq!(seen.len(), 4);
		assert_eq!(seen[0], (0, 2.0));
		assert_eq!(seen[2], (2, 1.0));
	}

	#[test]
	fn test_parallel_update_seeded_runs_agree() {
		let setup = GwoSetup::uniform(3, 40, -5.0, 5.0);
		let run = || {
			let cfg = GWOConfigBuilder::new().seed(21).enable_parallel(true).build();
			let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), cfg).unwrap();
			gwo.solve(30).unwrap()
		};
		let (r1, r2) = (run(), run());
		assert_eq!(r1.x, r2.x);
		assert_eq!(r1.population, r2.population);
	}

	#[test]
	fn test_solve_report() {
		let setup = GwoSetup::uniform(2, 10, -5.0, 5.0);
		let mut gwo = GreyWolf::with_config(&setup, FnObjective::new(sphere), seeded(6)).unwrap();
		let report = gwo.solve(25).unwrap();
		assert_eq!(report.nit, 25);
		assert_eq!(report.nfev, 10 * 26);
		assert_eq!(report.population.dim(), (10, 2));
		assert_eq!(report.population_fitness.len(), 10);
		let min = report.population_fitness.iter().cloned().fold(f64::INFINITY, f64::min);
		assert_eq!(report.fun, min);
	}
}
