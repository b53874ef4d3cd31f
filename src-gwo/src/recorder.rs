use std::fs::create_dir_all;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{GWOIntermediate, GwoResult};

/// Records optimization progress via GWO callbacks
#[derive(Debug)]
pub struct OptimizationRecorder {
	/// Function name (used for CSV filename)
	function_name: String,
	/// Shared records storage
	records: Arc<Mutex<Vec<OptimizationRecord>>>,
	/// Best function value seen so far
	best_value: Arc<Mutex<Option<f64>>>,
}

/// A single optimization iteration record
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRecord {
	/// Iteration number
	pub iteration: usize,
	/// Control parameter `a` used in this iteration
	pub a: f64,
	/// Best x of this iteration
	pub x: Vec<f64>,
	/// Best function result of this iteration
	pub best_result: f64,
	/// Whether this iteration improved the best known result
	pub is_improvement: bool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
	m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OptimizationRecorder {
	/// Create a new optimization recorder for the given function
	pub fn new(function_name: String) -> Self {
		Self {
			function_name,
			records: Arc::new(Mutex::new(Vec::new())),
			best_value: Arc::new(Mutex::new(None)),
		}
	}

	/// Create a callback function that records optimization progress
	pub fn create_callback(&self) -> Box<dyn FnMut(&GWOIntermediate) + Send> {
		let records = self.records.clone();
		let best_value = self.best_value.clone();

		Box::new(move |intermediate: &GWOIntermediate| {
			let is_improvement = {
				let mut best = lock(&best_value);
				let improved = best.is_none_or(|b| intermediate.fun < b);
				if improved {
					*best = Some(intermediate.fun);
				}
				improved
			};

			lock(&records).push(OptimizationRecord {
				iteration: intermediate.iter,
				a: intermediate.a,
				x: intermediate.x.to_vec(),
				best_result: intermediate.fun,
				is_improvement,
			});
		})
	}

	/// Save all recorded iterations to `output_dir/<function_name>.csv`
	pub fn save_to_csv(&self, output_dir: &str) -> GwoResult<String> {
		create_dir_all(output_dir)?;
		let filename = Path::new(output_dir)
			.join(format!("{}.csv", self.function_name))
			.to_string_lossy()
			.into_owned();

		let records = lock(&self.records);
		let mut writer = csv::Writer::from_path(&filename)?;
		if let Some(first) = records.first() {
			let mut header = vec!["iteration".to_string(), "a".to_string()];
			header.extend((0..first.x.len()).map(|i| format!("x{}", i)));
			header.push("best_result".into());
			header.push("is_improvement".into());
			writer.write_record(&header)?;
		}
		for record in records.iter() {
			let mut row = vec![record.iteration.to_string(), format!("{:.16}", record.a)];
			row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
			row.push(format!("{:.16}", record.best_result));
			row.push(record.is_improvement.to_string());
			writer.write_record(&row)?;
		}
		writer.flush()?;

		Ok(filename)
	}

	/// Get a copy of all recorded iterations
	pub fn get_records(&self) -> Vec<OptimizationRecord> {
		lock(&self.records).clone()
	}

	/// Get the number of iterations recorded
	pub fn num_iterations(&self) -> usize {
		lock(&self.records).len()
	}

	/// Clear all recorded iterations
	pub fn clear(&self) {
		lock(&self.records).clear();
		*lock(&self.best_value) = None;
	}

	/// Best solution over all recorded iterations
	pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
		lock(&self.records)
			.iter()
			.filter(|r| r.is_improvement)
			.last()
			.map(|r| (r.x.clone(), r.best_result))
	}
}
