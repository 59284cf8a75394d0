//! Noise generation for ribbons and the liquid surface.
//!
//! OpenSimplex noise for smooth, artifact-free procedural motion.

use noise::{NoiseFn, OpenSimplex};

/// Seeded 3D noise source
pub struct NoiseGenerator {
    simplex: OpenSimplex,
}

impl NoiseGenerator {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
        }
    }

    /// Sample 3D simplex noise at position
    ///
    /// Returns value in range [-1, 1]
    pub fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        (self.simplex.get([x as f64, y as f64, z as f64]) as f32).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic_and_bounded() {
        let a = NoiseGenerator::new(7);
        let b = NoiseGenerator::new(7);
        for n in 0..200 {
            let x = n as f32 * 0.37;
            let v = a.sample_3d(x, x * 0.5, 1.3);
            assert_eq!(v, b.sample_3d(x, x * 0.5, 1.3));
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
