//! Frost Hop - a wintery side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Simulation core (player physics, enemies, collisions, scene flow)
//! - `driver`: Per-frame driver that owns the simulation context
//! - `renderer`: Draw-list builder consumed by the host painter
//! - `platform`: Browser/native platform glue
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod snow;
pub mod tuning;

pub use assets::{AssetTracker, LoadStatus, SpriteId};
pub use driver::FrameDriver;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical canvas resolution
    pub const CANVAS_WIDTH: f32 = 760.0;
    pub const CANVAS_HEIGHT: f32 = 560.0;

    /// Ground strip height; the walkable ground line sits on top of it
    pub const GROUND_HEIGHT: f32 = 60.0;
    pub const GROUND_LEVEL: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_GRAVITY: f32 = 0.6;
    pub const MAX_JUMPS: usize = 3;
    /// Vertical impulse per jump level (first, double, triple)
    pub const JUMP_HEIGHTS: [f32; MAX_JUMPS] = [-7.0, -11.0, -15.0];
    /// How far past the goal's right edge the player may walk
    pub const PLAYER_END_MARGIN: f32 = 40.0;

    /// Camera starts following once the player is this fraction of the viewport ahead
    pub const CAMERA_FOLLOW_FRACTION: f32 = 1.0 / 3.0;
    /// Camera upper bound = goal.x - margin
    pub const CAMERA_GOAL_MARGIN: f32 = 400.0;
    /// Tighter bound once the level has ended so the goal stays fully on screen
    pub const CAMERA_GOAL_MARGIN_ENDED: f32 = 520.0;

    /// Collision tolerances (px)
    pub const LANDING_TOLERANCE: f32 = 5.0;
    pub const STOMP_WINDOW: f32 = 20.0;
    pub const STOMP_BOUNCE: f32 = -8.0;

    /// Drag dead-zones (px)
    pub const DRAG_DEAD_ZONE_X: f32 = 20.0;
    pub const DRAG_JUMP_DEAD_ZONE_Y: f32 = -30.0;

    /// Projectiles
    pub const PROJECTILE_SIZE: f32 = 24.0;
    pub const PROJECTILE_SPEED: f32 = -8.0;
    pub const PROJECTILE_CULL_MARGIN: f32 = 100.0;
    /// Vertical gap between the two shots of a challenge volley
    pub const VOLLEY_SPACING: f32 = 30.0;

    /// Scoring
    pub const OBSTACLE_BONUS: u64 = 50;
    pub const ENEMY_KILL_BONUS: u64 = 500;
    pub const STAR_BONUS: u64 = 2000;
    pub const BADGE_BONUS: u64 = 1000;

    /// Floating bob: amplitude (px), time divisor (ms), phase per px of x
    pub const FLOAT_AMPLITUDE: f32 = 8.0;
    pub const FLOAT_PERIOD_MS: f64 = 400.0;
    pub const FLOAT_PHASE_PER_X: f64 = 0.001;

    /// Typewriter reveal speed
    pub const MS_PER_CHAR: f64 = 50.0;
}

/// Vertical bob for floating entities at wall-clock time `now_ms`.
///
/// The x coordinate shifts the phase so neighbours don't move in lockstep.
#[inline]
pub fn float_offset(now_ms: f64, x: f32, amplitude: f32, period_ms: f64) -> f32 {
    let phase = now_ms / period_ms + x as f64 * consts::FLOAT_PHASE_PER_X;
    phase.sin() as f32 * amplitude
}
