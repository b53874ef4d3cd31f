//! Optimization test functions library
//!
//! Benchmark objectives used to validate the grey wolf optimizer:
//!
//! - **Unimodal**: sphere, rosenbrock, sum of squares, zakharov
//! - **Multimodal**: rastrigin, ackley, griewank, schwefel
//! - **Curve fitting**: [`PolyFit`], polynomial least squares on a noisy sine
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use gwo_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//!
//! let bounds = get_function_bounds("rastrigin", 3).unwrap();
//! assert_eq!(bounds, vec![(-5.12, 5.12); 3]);
//! ```

use ndarray::Array1;

pub mod functions;
pub mod polyfit;

pub use functions::*;
pub use polyfit::PolyFit;

/// Signature shared by every benchmark objective
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for an N-dimensional test function
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: &'static str,
    pub function: TestFunction,
    /// Interval applied to every dimension
    pub bounds: (f64, f64),
    /// Value of the global minimum
    pub global_minimum: f64,
    /// Coordinate of the global minimum, repeated on every dimension
    pub argmin: f64,
    pub multimodal: bool,
    pub description: &'static str,
}

/// Metadata of all registered functions
pub fn get_function_metadata() -> Vec<FunctionMetadata> {
    vec![
        FunctionMetadata {
            name: "sphere",
            function: sphere,
            bounds: (-5.12, 5.12),
            global_minimum: 0.0,
            argmin: 0.0,
            multimodal: false,
            description: "N-dimensional quadratic bowl",
        },
        FunctionMetadata {
            name: "rosenbrock",
            function: rosenbrock,
            bounds: (-2.048, 2.048),
            global_minimum: 0.0,
            argmin: 1.0,
            multimodal: false,
            description: "N-dimensional banana valley",
        },
        FunctionMetadata {
            name: "sum_squares",
            function: sum_squares,
            bounds: (-10.0, 10.0),
            global_minimum: 0.0,
            argmin: 0.0,
            multimodal: false,
            description: "Index weighted quadratic bowl",
        },
        FunctionMetadata {
            name: "zakharov",
            function: zakharov,
            bounds: (-5.0, 10.0),
            global_minimum: 0.0,
            argmin: 0.0,
            multimodal: false,
            description: "Plate shaped function",
        },
        FunctionMetadata {
            name: "rastrigin",
            function: rastrigin,
            bounds: (-5.12, 5.12),
            global_minimum: 0.0,
            argmin: 0.0,
            multimodal: true,
            description: "N-dimensional highly multimodal function",
        },
        FunctionMetadata {
            name: "ackley",
            function: ackley,
            bounds: (-32.768, 32.768),
            global_minimum: 0.0,
            argmin: 0.0,
            multimodal: true,
            description: "N-dimensional multimodal function with a central funnel",
        },
        FunctionMetadata {
            name: "griewank",
            function: griewank,
            bounds: (-600.0, 600.0),
            global_minimum: 0.0,
            argmin: 0.0,
            multimodal: true,
            description: "N-dimensional multimodal function",
        },
        FunctionMetadata {
            name: "schwefel",
            function: schwefel,
            bounds: (-500.0, 500.0),
            global_minimum: 0.0,
            argmin: 420.9687,
            multimodal: true,
            description: "Deceptive multimodal function",
        },
    ]
}

/// Look up a function by name
pub fn find_function(function_name: &str) -> Option<FunctionMetadata> {
    get_function_metadata().into_iter().find(|m| m.name == function_name)
}

/// Bounds of `function_name` repeated over `n` dimensions
pub fn get_function_bounds(function_name: &str, n: usize) -> Option<Vec<(f64, f64)>> {
    find_function(function_name).map(|meta| vec![meta.bounds; n])
}

/// Names of all registered functions
pub fn function_names() -> Vec<&'static str> {
    get_function_metadata().iter().map(|m| m.name).collect()
}
