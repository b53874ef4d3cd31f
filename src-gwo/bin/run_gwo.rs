use clap::Parser;
use ndarray::Array1;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use gwo::{
	FnObjective, GWOConfigBuilder, GWOIntermediate, GreyWolf, GwoSetup, OptimizationRecorder,
	ParallelObjective,
};
use gwo_testfunctions::{PolyFit, find_function, function_names};

/// CLI arguments for running the grey wolf optimizer on a benchmark
#[derive(Parser, Debug)]
#[command(name = "run_gwo")]
#[command(about = "Minimise a benchmark function with the Grey Wolf Optimizer")]
struct Args {
	/// Benchmark to minimise (see --list), or "polyfit" for the noisy sine fit
	#[arg(short, long, default_value = "sphere")]
	function: String,

	/// Number of dimensions (polynomial coefficients for polyfit)
	#[arg(short = 'n', long, default_value_t = 5)]
	dim: usize,

	/// Number of wolves
	#[arg(short, long, default_value_t = 50)]
	popsize: usize,

	/// Number of iterations
	#[arg(short, long, default_value_t = 1000)]
	maxiter: usize,

	/// Number of leaders steering each update
	#[arg(short = 'k', long, default_value_t = gwo::DEFAULT_LEADERS)]
	leaders: usize,

	/// Seed for reproducible runs
	#[arg(short, long)]
	seed: Option<u64>,

	/// JSON setup file {"n", "pop_size", "lower", "upper"}; overrides --dim,
	/// --popsize and the function's default bounds
	#[arg(long)]
	setup: Option<PathBuf>,

	/// Evaluate and update the population on all cores
	#[arg(long)]
	parallel: bool,

	/// Directory receiving a CSV trace of the run
	#[arg(long)]
	record_dir: Option<String>,

	/// List the available functions and exit
	#[arg(long)]
	list: bool,
}

type BoxedFn = Box<dyn Fn(&Array1<f64>) -> f64 + Sync>;

fn load_setup(
	args: &Args,
	default_bounds: (f64, f64),
) -> Result<GwoSetup, Box<dyn std::error::Error>> {
	match &args.setup {
		Some(path) => {
			let text = fs::read_to_string(path)?;
			Ok(serde_json::from_str(&text)?)
		}
		None => Ok(GwoSetup::uniform(args.dim, args.popsize, default_bounds.0, default_bounds.1)),
	}
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
	let (func, default_bounds): (BoxedFn, (f64, f64)) = if args.function == "polyfit" {
		let data = PolyFit::noisy_sine(9, 0.07, args.seed.unwrap_or(0));
		let func: BoxedFn = Box::new(move |c: &Array1<f64>| data.mse(c));
		(func, (-15.0, 15.0))
	} else {
		let meta = find_function(&args.function)
			.ok_or_else(|| format!("unknown function: {}", args.function))?;
		let func: BoxedFn = Box::new(meta.function);
		(func, meta.bounds)
	};
	let setup = load_setup(args, default_bounds)?;

	let recorder = OptimizationRecorder::new(args.function.clone());
	let mut builder = GWOConfigBuilder::new().leaders(args.leaders).enable_parallel(args.parallel);
	if let Some(seed) = args.seed {
		builder = builder.seed(seed);
	}
	if args.record_dir.is_some() {
		let callback: Box<dyn FnMut(&GWOIntermediate)> = recorder.create_callback();
		builder = builder.callback(callback);
	}
	let config = builder.build();

	let start = std::time::Instant::now();
	let objective = FnObjective::new(func);
	let report = if args.parallel {
		GreyWolf::with_config(&setup, ParallelObjective::new(objective), config)?.solve(args.maxiter)?
	} else {
		GreyWolf::with_config(&setup, objective, config)?.solve(args.maxiter)?
	};
	let elapsed = start.elapsed();

	println!("Best fitness {:.6}", report.fun);
	println!("Best solution:");
	println!("{}", report.x);
	println!("Evaluations: {}", report.nfev);
	println!("Execution time: {:.4} secs", elapsed.as_secs_f64());

	if let Some(dir) = &args.record_dir {
		let path = recorder.save_to_csv(dir)?;
		println!("Trace saved to: {}", path);
	}
	Ok(())
}

fn main() -> ExitCode {
	env_logger::init();
	let args = Args::parse();

	if args.list {
		for name in function_names() {
			println!("{}", name);
		}
		println!("polyfit");
		return ExitCode::SUCCESS;
	}

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Error: {}", e);
			ExitCode::FAILURE
		}
	}
}
