//! Integration tests for the TrueShade crates.
//!
//! These tests drive the engine end to end: request JSON in, response JSON
//! out, against file-backed catalogs in temporary directories.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trueshade_core::{PixelSample, Region};

/// Synthetic face: a skin tone with jitter, plus shadow and highlight pixels.
pub fn synthetic_face(base: [u8; 3], n: usize, seed: u64) -> Vec<PixelSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(n + n / 5);
    for i in 0..n {
        let region = Region::ALL[i % Region::ALL.len()];
        let rgb = base.map(|c| (c as i16 + rng.random_range(-6..=6)).clamp(0, 255) as u8);
        samples.push(PixelSample::new(rgb, region));
    }
    // Outliers the aggregator must drop
    for i in 0..n / 10 {
        samples.push(PixelSample::new([2, 1, 1], Region::ALL[i % 5]));
        samples.push(PixelSample::new([254, 254, 253], Region::NoseBridge));
    }
    samples
}
