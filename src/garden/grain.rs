//! Sand grain speckle
//!
//! Uses a fixed-seed PCG so the texture is identical on every run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::GrainConfig;
use crate::sim::Bounds;

/// A single speck of sand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SandGrain {
    pub position: Vec2,
    pub rgb: [u8; 3],
    pub alpha: u8,
}

/// Scatter `config.count` grains over `bounds`
pub fn generate_grain(bounds: &Bounds, config: &GrainConfig) -> Vec<SandGrain> {
    let mut rng = Pcg32::seed_from_u64(config.seed);
    (0..config.count)
        .map(|_| {
            let x = bounds.left + rng.random::<f32>() * bounds.width();
            let y = bounds.top + rng.random::<f32>() * bounds.height();
            // Warm off-white: 205..255, with green and blue slightly lower
            let brightness: u8 = rng.random_range(205..255);
            SandGrain {
                position: Vec2::new(x, y),
                rgb: [brightness, brightness - 10, brightness - 20],
                alpha: config.alpha,
            }
        })
        .collect()
}
