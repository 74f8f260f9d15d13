//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`] so a
//! host can override it from JSON without recompiling. Missing fields fall
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub gravity: f32,
    /// Impulse table indexed by current jump count
    pub jump_heights: Vec<f32>,
    pub max_jumps: usize,
    pub player_start_x: f32,
    pub player_end_margin: f32,

    // === Camera ===
    pub camera_follow_fraction: f32,
    pub camera_goal_margin: f32,
    pub camera_goal_margin_ended: f32,

    // === Collision ===
    pub landing_tolerance: f32,
    pub stomp_window: f32,
    pub stomp_bounce: f32,

    // === Touch ===
    pub drag_dead_zone_x: f32,
    pub drag_jump_dead_zone_y: f32,

    // === Projectiles ===
    pub projectile_size: f32,
    pub projectile_speed: f32,
    pub projectile_cull_margin: f32,
    pub volley_spacing: f32,

    // === Scoring ===
    pub obstacle_bonus: u64,
    pub enemy_kill_bonus: u64,
    pub star_bonus: u64,
    pub badge_bonus: u64,

    // === Presentation timing ===
    pub float_amplitude: f32,
    pub float_period_ms: f64,
    pub ms_per_char: f64,
    /// How long asset loading may take before it is reported as stalled
    pub asset_stall_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            gravity: PLAYER_GRAVITY,
            jump_heights: JUMP_HEIGHTS.to_vec(),
            max_jumps: MAX_JUMPS,
            player_start_x: PLAYER_START_X,
            player_end_margin: PLAYER_END_MARGIN,

            camera_follow_fraction: CAMERA_FOLLOW_FRACTION,
            camera_goal_margin: CAMERA_GOAL_MARGIN,
            camera_goal_margin_ended: CAMERA_GOAL_MARGIN_ENDED,

            landing_tolerance: LANDING_TOLERANCE,
            stomp_window: STOMP_WINDOW,
            stomp_bounce: STOMP_BOUNCE,

            drag_dead_zone_x: DRAG_DEAD_ZONE_X,
            drag_jump_dead_zone_y: DRAG_JUMP_DEAD_ZONE_Y,

            projectile_size: PROJECTILE_SIZE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_cull_margin: PROJECTILE_CULL_MARGIN,
            volley_spacing: VOLLEY_SPACING,

            obstacle_bonus: OBSTACLE_BONUS,
            enemy_kill_bonus: ENEMY_KILL_BONUS,
            star_bonus: STAR_BONUS,
            badge_bonus: BADGE_BONUS,

            float_amplitude: FLOAT_AMPLITUDE,
            float_period_ms: FLOAT_PERIOD_MS,
            ms_per_char: MS_PER_CHAR,
            asset_stall_ms: 10_000.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_jumps == 0 {
            return Err(TuningError::Invalid("max_jumps must be at least 1".into()));
        }
        if self.jump_heights.len() < self.max_jumps {
            return Err(TuningError::Invalid(format!(
                "jump_heights has {} entries but max_jumps is {}",
                self.jump_heights.len(),
                self.max_jumps
            )));
        }

        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("projectile_size", self.projectile_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let finite = self
            .jump_heights
            .iter()
            .copied()
            .chain([
                self.gravity,
                self.player_start_x,
                self.player_end_margin,
                self.camera_follow_fraction,
                self.camera_goal_margin,
                self.camera_goal_margin_ended,
                self.landing_tolerance,
                self.stomp_window,
                self.stomp_bounce,
                self.drag_dead_zone_x,
                self.drag_jump_dead_zone_y,
                self.projectile_speed,
                self.projectile_cull_margin,
                self.volley_spacing,
                self.float_amplitude,
            ])
            .all(f32::is_finite);
        let finite_ms = [self.float_period_ms, self.ms_per_char, self.asset_stall_ms]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !finite || !finite_ms {
            return Err(TuningError::Invalid("non-finite value".into()));
        }

        Ok(())
    }

    /// Camera follow threshold in px for the logical viewport
    pub fn follow_threshold(&self) -> f32 {
        CANVAS_WIDTH * self.camera_follow_fraction
    }
}
