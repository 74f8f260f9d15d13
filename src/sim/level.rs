//! Level layout
//!
//! The single built-in level: clusters of ice blocks that grow into stairs,
//! three monsters (the last one a challenge turret guarding the tree), a
//! patrolling monster near the badge, the star perched above the last climb,
//! and the tree at the far end.

use glam::Vec2;

use super::state::{
    Collectible, CollectibleKind, Enemy, EnemyVariant, Float, Goal, HopCycle, Obstacle, Patrol,
    Turret,
};
use crate::consts::GROUND_LEVEL;
use crate::tuning::Tuning;

const BLOCK: f32 = 50.0;
const ENEMY_SIZE: f32 = 80.0;
const ITEM_SIZE: f32 = 50.0;
const GOAL_SIZE: f32 = 180.0;

/// Block placements: (x, height of top edge above ground, floating)
const BLOCKS: &[(f32, f32, bool)] = &[
    (400.0, 42.0, false),
    (800.0, 42.0, false),
    (836.0, 42.0, false),
    (1200.0, 42.0, false),
    (1200.0, 78.0, false),
    // Pyramid
    (1600.0, 42.0, false),
    (1656.0, 42.0, false),
    (1628.0, 78.0, false),
    // Wide pyramid
    (1800.0, 42.0, false),
    (1856.0, 42.0, false),
    (1912.0, 42.0, false),
    (1828.0, 78.0, false),
    (1882.0, 78.0, false),
    (1854.0, 112.0, false),
    // Second wide pyramid
    (2300.0, 42.0, false),
    (2356.0, 42.0, false),
    (2412.0, 42.0, false),
    (2328.0, 78.0, false),
    (2382.0, 78.0, false),
    (2354.0, 112.0, false),
    // Floating stairs up to the star
    (2900.0, 140.0, true),
    (3060.0, 180.0, true),
    (3200.0, 240.0, true),
];

/// Entities a level starts with
#[derive(Debug, Clone)]
pub struct Level {
    pub obstacles: Vec<Obstacle>,
    pub enemies: Vec<Enemy>,
    pub star: Collectible,
    pub badge: Collectible,
    pub goal: Goal,
}

impl Level {
    pub fn builtin(tuning: &Tuning) -> Self {
        let float = Float::from_tuning(tuning);

        let obstacles = BLOCKS
            .iter()
            .enumerate()
            .map(|(i, &(x, height, floating))| Obstacle {
                pos: Vec2::new(x, GROUND_LEVEL - height),
                size: Vec2::splat(BLOCK),
                variant: (i % 3) as u8,
                float: floating.then_some(float),
                offset_y: 0.0,
            })
            .collect();

        let hop = |jump_power: f32, interval_ms: f64| HopCycle {
            gravity: tuning.gravity,
            jump_power,
            interval_ms,
            last_jump_ms: 0.0,
        };
        let turret = |interval_ms: f64| Turret {
            interval_ms,
            last_shot_ms: 0.0,
        };

        let enemies = vec![
            monster(1000.0, EnemyVariant::Standard, Some(hop(-15.0, 2000.0)), None, turret(1500.0)),
            monster(1950.0, EnemyVariant::Standard, Some(hop(-15.0, 2000.0)), None, turret(1500.0)),
            monster(
                2650.0,
                EnemyVariant::Standard,
                None,
                Some(Patrol {
                    min_x: 2520.0,
                    max_x: 2780.0,
                    speed: -2.0,
                }),
                turret(2500.0),
            ),
            monster(
                3280.0,
                EnemyVariant::Challenge { shoot_range: 600.0 },
                Some(hop(-20.0, 1500.0)),
                None,
                turret(1000.0),
            ),
        ];

        let star = Collectible {
            kind: CollectibleKind::Star,
            pos: Vec2::new(3200.0, GROUND_LEVEL - 290.0),
            size: Vec2::splat(ITEM_SIZE),
            float: None,
            offset_y: 0.0,
            collected: false,
        };
        let badge = Collectible {
            kind: CollectibleKind::Badge,
            pos: Vec2::new(2600.0, GROUND_LEVEL - 290.0),
            size: Vec2::splat(ITEM_SIZE),
            float: Some(float),
            offset_y: 0.0,
            collected: false,
        };
        let goal = Goal {
            pos: Vec2::new(3400.0, GROUND_LEVEL - GOAL_SIZE),
            size: Vec2::splat(GOAL_SIZE),
            has_won: false,
        };

        Self {
            obstacles,
            enemies,
            star,
            badge,
            goal,
        }
    }
}

fn monster(
    x: f32,
    variant: EnemyVariant,
    hop: Option<HopCycle>,
    patrol: Option<Patrol>,
    turret: Turret,
) -> Enemy {
    let spawn = Vec2::new(x, GROUND_LEVEL - ENEMY_SIZE);
    Enemy {
        pos: spawn,
        size: Vec2::splat(ENEMY_SIZE),
        vel: Vec2::ZERO,
        spawn,
        variant,
        hop,
        patrol,
        turret: Some(turret),
        alive: true,
    }
}
