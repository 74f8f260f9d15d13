//! Game state and core simulation types
//!
//! [`GameState`] is the single simulation context: every entity store, the
//! active scene and the per-session statistics live here and are mutated only
//! by the simulation step and the scene transitions.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::Level;
use super::scene::{Scene, SceneTimers};
use crate::consts::GROUND_LEVEL;
use crate::tuning::Tuning;

/// Sine bob parameters for floating entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Float {
    pub amplitude: f32,
    pub period_ms: f64,
}

impl Float {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            amplitude: tuning.float_amplitude,
            period_ms: tuning.float_period_ms,
        }
    }

    pub fn offset_at(&self, now_ms: f64, x: f32) -> f32 {
        crate::float_offset(now_ms, x, self.amplitude, self.period_ms)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub gravity: f32,
    pub jump_heights: Vec<f32>,
    pub max_jumps: usize,
    /// Jumps used since the last landing
    pub jump_count: usize,
    pub airborne: bool,
    pub on_ground: bool,
    /// Rendering only: swaps the run sprite once the star is picked up
    pub has_star: bool,
    pub is_moving: bool,
    pub facing_right: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(tuning.player_start_x, GROUND_LEVEL - size.y),
            size,
            vel: Vec2::ZERO,
            speed: tuning.player_speed,
            gravity: tuning.gravity,
            jump_heights: tuning.jump_heights.clone(),
            max_jumps: tuning.max_jumps,
            jump_count: 0,
            airborne: false,
            on_ground: true,
            has_star: false,
            is_moving: false,
            facing_right: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Start the next jump level if any remain
    pub fn try_jump(&mut self) -> bool {
        if self.jump_count >= self.max_jumps {
            return false;
        }
        let Some(&impulse) = self.jump_heights.get(self.jump_count) else {
            return false;
        };
        self.vel.y = impulse;
        self.jump_count += 1;
        self.airborne = true;
        true
    }

    /// Rest the player's bottom edge on `surface_y` and refill jumps
    pub fn land_on(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size.y;
        self.vel.y = 0.0;
        self.airborne = false;
        self.jump_count = 0;
        self.on_ground = true;
    }
}

/// Horizontal scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub follow_threshold: f32,
}

impl Camera {
    pub fn new(follow_threshold: f32) -> Self {
        Self { x: 0.0, follow_threshold }
    }
}

/// A static or floating ice block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Which of the three block sprites to draw
    pub variant: u8,
    pub float: Option<Float>,
    /// This frame's vertical bob, shared by collision and rendering
    #[serde(default)]
    pub offset_y: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos + Vec2::new(0.0, self.offset_y), self.size)
    }

    pub fn refresh_offset(&mut self, now_ms: f64) {
        self.offset_y = match self.float {
            Some(float) => float.offset_at(now_ms, self.pos.x),
            None => 0.0,
        };
    }
}

/// Periodic hop while grounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HopCycle {
    pub gravity: f32,
    /// Negative launch velocity
    pub jump_power: f32,
    pub interval_ms: f64,
    pub last_jump_ms: f64,
}

/// Horizontal back-and-forth between two x limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub min_x: f32,
    pub max_x: f32,
    /// Initial horizontal velocity (sign picks the starting direction)
    pub speed: f32,
}

/// What kind of volley an enemy fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyVariant {
    /// One shot per interval, regardless of distance
    Standard,
    /// Two stacked shots, only while the player is within `shoot_range`
    Challenge { shoot_range: f32 },
}

/// Shooting cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub interval_ms: f64,
    pub last_shot_ms: f64,
}

/// A monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Where the enemy stands at level start
    pub spawn: Vec2,
    pub variant: EnemyVariant,
    pub hop: Option<HopCycle>,
    pub patrol: Option<Patrol>,
    pub turret: Option<Turret>,
    pub alive: bool,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Back to spawn, alive, with every timer restarted at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.alive = true;
        self.pos = self.spawn;
        self.vel = Vec2::new(self.patrol.map_or(0.0, |p| p.speed), 0.0);
        if let Some(hop) = self.hop.as_mut() {
            hop.last_jump_ms = now_ms;
        }
        if let Some(turret) = self.turret.as_mut() {
            turret.last_shot_ms = now_ms;
        }
    }
}

/// An enemy shot travelling at constant horizontal speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub vx: f32,
}

impl Projectile {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Unlocks the goal
    Star,
    /// Bonus points only
    Badge,
}

/// A pick-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub float: Option<Float>,
    #[serde(default)]
    pub offset_y: f32,
    pub collected: bool,
}

impl Collectible {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos + Vec2::new(0.0, self.offset_y), self.size)
    }

    pub fn refresh_offset(&mut self, now_ms: f64) {
        self.offset_y = match self.float {
            Some(float) => float.offset_at(now_ms, self.pos.x),
            None => 0.0,
        };
    }
}

/// The tree at the end of the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub size: Vec2,
    pub has_won: bool,
}

impl Goal {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Per-session progress, reset each time Playing is entered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u64,
    pub kills: u32,
    /// Obstacle indices already rewarded this life
    pub visited: BTreeSet<usize>,
    pub star_collected: bool,
    pub badge_collected: bool,
    pub level_ended: bool,
    pub started_at_ms: Option<f64>,
    pub ended_at_ms: Option<f64>,
}

impl SessionStats {
    /// Latch the end timestamp; later calls keep the first value
    pub fn latch_end(&mut self, now_ms: f64) {
        if self.ended_at_ms.is_none() {
            self.ended_at_ms = Some(now_ms);
        }
    }

    /// Play time so far, or total play time once the run ended
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        match self.started_at_ms {
            Some(start) => self.ended_at_ms.unwrap_or(now_ms) - start,
            None => 0.0,
        }
    }
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub scene: Scene,
    pub timers: SceneTimers,
    pub stats: SessionStats,
    pub player: Player,
    pub camera: Camera,
    pub obstacles: Vec<Obstacle>,
    /// Index-stable: dead enemies stay in place with `alive == false`
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub star: Collectible,
    pub badge: Collectible,
    pub goal: Goal,
    /// Jump key state last frame, for edge detection
    pub(crate) jump_was_down: bool,
    /// Drag y the next swipe-up jump is measured from
    pub(crate) drag_anchor_y: Option<f32>,
}

impl GameState {
    /// Create a new game on the built-in level, sitting on the Start screen
    pub fn new(tuning: Tuning, now_ms: f64) -> Self {
        let level = Level::builtin(&tuning);
        Self::with_level(tuning, level, now_ms)
    }

    pub fn with_level(tuning: Tuning, level: Level, now_ms: f64) -> Self {
        let Level { obstacles, enemies, star, badge, goal } = level;
        let mut state = Self {
            scene: Scene::Start,
            timers: SceneTimers::default(),
            stats: SessionStats::default(),
            player: Player::new(&tuning),
            camera: Camera::new(tuning.follow_threshold()),
            obstacles,
            enemies,
            projectiles: Vec::new(),
            star,
            badge,
            goal,
            jump_was_down: false,
            drag_anchor_y: None,
            tuning,
        };
        state.reset_level(now_ms);
        state.scene = Scene::Start;
        state
    }

    /// Full reset performed on every entry into Playing
    pub fn reset_level(&mut self, now_ms: f64) {
        self.player = Player::new(&self.tuning);
        self.camera = Camera::new(self.tuning.follow_threshold());

        for enemy in &mut self.enemies {
            enemy.reset(now_ms);
        }
        self.projectiles.clear();

        for obstacle in &mut self.obstacles {
            obstacle.refresh_offset(now_ms);
        }
        for item in [&mut self.star, &mut self.badge] {
            item.collected = false;
            item.refresh_offset(now_ms);
        }
        self.goal.has_won = false;

        self.stats = SessionStats {
            started_at_ms: Some(now_ms),
            ..SessionStats::default()
        };
        self.timers.celebration_started_ms = None;
        self.timers.celebration_message.clear();
        self.timers.reward_started_ms = None;

        self.drag_anchor_y = None;
        log::info!("Level reset ({} obstacles, {} enemies)", self.obstacles.len(), self.enemies.len());
    }

    /// Largest camera offset that still keeps the goal in view
    pub fn max_camera_x(&self) -> f32 {
        super::physics::max_camera_x(&self.goal, self.stats.level_ended, &self.tuning)
    }

    /// Rightmost x the player's left edge may reach
    pub fn max_player_x(&self) -> f32 {
        self.goal.right() + self.tuning.player_end_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_player_jump_table() {
        let mut player = Player::new(&Tuning::default());
        assert!(player.try_jump());
        assert_eq!(player.vel.y, JUMP_HEIGHTS[0]);
        assert_eq!(player.jump_count, 1);
        assert!(player.airborne);

        assert!(player.try_jump());
        assert_eq!(player.vel.y, JUMP_HEIGHTS[1]);
        assert!(player.try_jump());
        assert_eq!(player.vel.y, JUMP_HEIGHTS[2]);

        // Out of jumps
        assert!(!player.try_jump());
        assert_eq!(player.jump_count, MAX_JUMPS);

        player.land_on(GROUND_LEVEL);
        assert_eq!(player.jump_count, 0);
        assert!(!player.airborne);
        assert_eq!(player.bottom(), GROUND_LEVEL);
    }

    #[test]
    fn test_end_time_latches_once() {
        let mut stats = SessionStats {
            started_at_ms: Some(100.0),
            ..Default::default()
        };
        assert_eq!(stats.elapsed_ms(350.0), 250.0);
        stats.latch_end(500.0);
        stats.latch_end(900.0);
        assert_eq!(stats.ended_at_ms, Some(500.0));
        assert_eq!(stats.elapsed_ms(10_000.0), 400.0);
    }

    #[test]
    fn test_full_reset_restores_initial_values() {
        let mut state = GameState::new(Tuning::default(), 0.0);
        let initial_enemies: Vec<_> = state.enemies.iter().map(|e| (e.pos, e.alive)).collect();

        state.stats.score = 12_345;
        state.stats.kills = 3;
        state.stats.visited.insert(4);
        state.stats.star_collected = true;
        state.stats.badge_collected = true;
        state.stats.level_ended = true;
        state.star.collected = true;
        state.badge.collected = true;
        state.goal.has_won = true;
        state.player.pos = Vec2::new(2000.0, 10.0);
        state.player.jump_count = 2;
        state.camera.x = 900.0;
        for enemy in &mut state.enemies {
            enemy.alive = false;
            enemy.pos.x += 123.0;
        }
        state.projectiles.push(Projectile {
            pos: Vec2::ZERO,
            size: Vec2::splat(PROJECTILE_SIZE),
            vx: PROJECTILE_SPEED,
        });

        state.reset_level(5000.0);

        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.kills, 0);
        assert!(state.stats.visited.is_empty());
        assert!(!state.stats.star_collected && !state.stats.badge_collected);
        assert!(!state.stats.level_ended);
        assert_eq!(state.stats.started_at_ms, Some(5000.0));
        assert_eq!(state.stats.ended_at_ms, None);
        assert!(!state.star.collected && !state.badge.collected);
        assert!(!state.goal.has_won);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, GROUND_LEVEL - PLAYER_HEIGHT));
        assert_eq!(state.player.jump_count, 0);
        assert!(!state.player.has_star);
        assert_eq!(state.camera.x, 0.0);

        let after: Vec<_> = state.enemies.iter().map(|e| (e.pos, e.alive)).collect();
        assert_eq!(after, initial_enemies);
        for enemy in &state.enemies {
            if let Some(turret) = enemy.turret {
                assert_eq!(turret.last_shot_ms, 5000.0);
            }
            if let Some(hop) = enemy.hop {
                assert_eq!(hop.last_jump_ms, 5000.0);
            }
        }
    }
}
