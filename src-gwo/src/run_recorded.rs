//! Recording wrapper around the grey wolf optimizer

use ndarray::Array1;

use crate::grey_wolf_optimizer::grey_wolf_optimizer;
use crate::recorder::OptimizationRecorder;
use crate::{GWOConfig, GWOIntermediate, GWOReport, GwoResult};

/// Run the optimizer and save one CSV row per iteration.
///
/// Returns the report together with the path of the CSV file written to
/// `output_dir/<function_name>.csv`.
pub fn run_recorded_grey_wolf<F>(
	function_name: &str,
	func: F,
	bounds: &[(f64, f64)],
	pop_size: usize,
	max_iterations: usize,
	mut config: GWOConfig,
	output_dir: &str,
) -> GwoResult<(GWOReport, String)>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let recorder = OptimizationRecorder::new(function_name.to_string());
	let callback: Box<dyn FnMut(&GWOIntermediate)> = recorder.create_callback();
	config.callback = Some(callback);
	let report = grey_wolf_optimizer(&func, bounds, pop_size, max_iterations, config)?;
	let csv_path = recorder.save_to_csv(output_dir)?;
	Ok((report, csv_path))
}
