//! Cosmetic snowfall
//!
//! Animates on every screen, never touches gameplay. Seeded so headless runs
//! are reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub const FLAKE_COUNT: usize = 100;

/// One snowflake, in screen space
#[derive(Debug, Clone, Copy)]
pub struct Flake {
    pub pos: Vec2,
    pub size: f32,
    pub fall_speed: f32,
    pub drift: f32,
}

#[derive(Debug, Clone)]
pub struct Snowfall {
    pub flakes: Vec<Flake>,
    rng: Pcg32,
}

impl Snowfall {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let flakes = (0..FLAKE_COUNT)
            .map(|_| {
                let size = match rng.random_range(0..3) {
                    0 => 6.0,
                    1 => 8.0,
                    _ => 12.0,
                };
                Flake {
                    pos: Vec2::new(
                        rng.random_range(0.0..CANVAS_WIDTH),
                        rng.random_range(0.0..CANVAS_HEIGHT),
                    ),
                    size,
                    fall_speed: rng.random_range(0.3..0.8),
                    drift: rng.random_range(-0.25..0.25),
                }
            })
            .collect();
        Self { flakes, rng }
    }

    /// Advance one frame; flakes past the bottom restart above the top
    pub fn update(&mut self) {
        for flake in &mut self.flakes {
            flake.pos.y += flake.fall_speed;
            flake.pos.x += flake.drift;
            if flake.pos.y > CANVAS_HEIGHT {
                flake.pos.y = -10.0;
                flake.pos.x = self.rng.random_range(0.0..CANVAS_WIDTH);
            }
        }
    }
}
