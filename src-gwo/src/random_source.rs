use rand::rand_core::impls;
use rand::{Rng, RngCore, SeedableRng};

/// Source of independent uniform draws in a half-open range
pub trait RandomSource {
	/// Uniform value between `min` and `max`, never outside `[min, max]`.
	/// An empty or inverted range yields `min`.
	fn next_uniform(&mut self, min: f64, max: f64) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
	fn next_uniform(&mut self, min: f64, max: f64) -> f64 {
		if !(max > min) {
			return min;
		}
		// interpolate without forming `max - min`, which overflows on wide boxes
		let r = self.random::<f64>();
		(min * (1.0 - r) + max * r).clamp(min, max)
	}
}

/// Marsaglia xorshift generator with the (13, 7, 17) triple
///
/// Small, fast and fully reproducible; handy when bit-for-bit agreement
/// with other xorshift64 based tools is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift64 {
	state: u64,
}

impl XorShift64 {
	/// Replaces a zero seed, which would be a fixed point of the recurrence
	const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

	pub fn new(seed: u64) -> Self {
		let state = if seed == 0 { Self::ZERO_SEED_REPLACEMENT } else { seed };
		Self { state }
	}
}

impl RngCore for XorShift64 {
	fn next_u32(&mut self) -> u32 {
		(self.next_u64() >> 32) as u32
	}

	fn next_u64(&mut self) -> u64 {
		let mut x = self.state;
		x ^= x << 13;
		x ^= x >> 7;
		x ^= x << 17;
		self.state = x;
		x
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		impls::fill_bytes_via_next(self, dst)
	}
}

impl SeedableRng for XorShift64 {
	type Seed = [u8; 8];

	fn from_seed(seed: Self::Seed) -> Self {
		Self::new(u64::from_le_bytes(seed))
	}

	fn seed_from_u64(state: u64) -> Self {
		Self::new(state)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;

	#[test]
	fn test_next_uniform_stays_in_range() {
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..10_000 {
			let v = rng.next_uniform(-2.5, 7.0);
			assert!((-2.5..7.0).contains(&v), "value {} escaped range", v);
		}
	}

	#[test]
	fn test_next_uniform_wide_range_is_finite() {
		let mut rng = StdRng::seed_from_u64(4);
		for (lo, hi) in [(-1e308, 1e308), (f64::MIN, f64::MAX), (0.0, f64::MAX)] {
			for _ in 0..1000 {
				let v = rng.next_uniform(lo, hi);
				assert!(v.is_finite() && v >= lo && v <= hi, "{} escaped [{}, {}]", v, lo, hi);
			}
		}
	}

	#[test]
	fn test_next_uniform_empty_and_inverted_ranges() {
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(rng.next_uniform(1.0, 1.0), 1.0);
		assert_eq!(rng.next_uniform(4.0, -4.0), 4.0);
		assert_eq!(rng.next_uniform(0.0, f64::NAN), 0.0);
	}

	#[test]
	fn test_xorshift_known_sequence() {
		// First outputs of xorshift64 (13, 7, 17) seeded with 1
		let mut rng = XorShift64::new(1);
		assert_eq!(rng.next_u64(), 1082269761);
		assert_eq!(rng.next_u64(), 1152992998833853505);
	}

	#[test]
	fn test_xorshift_zero_seed_does_not_stick() {
		let mut rng = XorShift64::seed_from_u64(0);
		let a = rng.next_u64();
		let b = rng.next_u64();
		assert_ne!(a, 0);
		assert_ne!(a, b);
	}

	#[test]
	fn test_xorshift_unit_interval() {
		let mut rng = XorShift64::new(42);
		for _ in 0..10_000 {
			let v = rng.random::<f64>();
			assert!((0.0..1.0).contains(&v));
		}
	}

	#[test]
	fn test_xorshift_drives_random_source() {
		let mut a = XorShift64::new(99);
		let mut b = XorShift64::new(99);
		for _ in 0..100 {
			assert_eq!(a.next_uniform(-1.0, 1.0).to_bits(), b.next_uniform(-1.0, 1.0).to_bits());
		}
	}
}
