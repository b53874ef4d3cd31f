//! Least-squares polynomial fitting of a noisy sine wave
//!
//! The decision vector holds polynomial coefficients `c[0] + c[1] x + ...`
//! and the objective is the mean squared error against samples of
//! `sin(2 pi x)` on `[0, 1]` perturbed with uniform noise.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Noisy samples to fit
#[derive(Debug, Clone)]
pub struct PolyFit {
    /// Sample abscissas
    pub xs: Vec<f64>,
    /// Noisy sample values
    pub ys: Vec<f64>,
}

impl PolyFit {
    /// `segments + 1` equally spaced samples of `sin(2 pi x)` with noise in
    /// `[-noise, noise)`, reproducible through `seed`
    pub fn noisy_sine(segments: usize, noise: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let dx = 1.0 / segments.max(1) as f64;
        let mut xs = Vec::with_capacity(segments + 1);
        let mut ys = Vec::with_capacity(segments + 1);
        for i in 0..=segments {
            let x = i as f64 * dx;
            let jitter = if noise > 0.0 { rng.random_range(-noise..noise) } else { 0.0 };
            xs.push(x);
            ys.push((2.0 * PI * x).sin() + jitter);
        }
        Self { xs, ys }
    }

    /// Evaluate the polynomial with coefficients `coeffs` at `x` (Horner)
    pub fn poly_eval(coeffs: &Array1<f64>, x: f64) -> f64 {
        coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Mean squared error of the polynomial against the samples
    pub fn mse(&self, coeffs: &Array1<f64>) -> f64 {
        if self.xs.is_empty() {
            return 0.0;
        }
        let err: f64 = self
            .xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| (Self::poly_eval(coeffs, x) - y).powi(2))
            .sum();
        err / self.xs.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_poly_eval() {
        // 1 + 2x + 3x^2 at x = 2
        assert_eq!(PolyFit::poly_eval(&array![1.0, 2.0, 3.0], 2.0), 17.0);
        assert_eq!(PolyFit::poly_eval(&array![4.0], 10.0), 4.0);
    }

    #[test]
    fn test_noiseless_samples() {
        let fit = PolyFit::noisy_sine(4, 0.0, 0);
        assert_eq!(fit.xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!((fit.ys[1] - 1.0).abs() < 1e-12);
        assert!((fit.ys[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_noise_is_bounded_and_seeded() {
        let a = PolyFit::noisy_sine(9, 0.07, 3);
        let b = PolyFit::noisy_sine(9, 0.07, 3);
        assert_eq!(a.ys, b.ys);
        for (&x, &y) in a.xs.iter().zip(a.ys.iter()) {
            assert!((y - (2.0 * PI * x).sin()).abs() <= 0.07 + 1e-12);
        }
    }

    #[test]
    fn test_mse_of_zero_polynomial() {
        let fit = PolyFit { xs: vec![0.0, 1.0], ys: vec![1.0, 3.0] };
        assert_eq!(fit.mse(&array![0.0]), 5.0);
        assert_eq!(fit.mse(&array![1.0, 2.0]), 0.0);
    }
}
