//! Enemy behaviour and projectile management
//!
//! Hop and shot cadences are wall-clock paced: an action fires once strictly
//! more than its interval has elapsed since the last one.

use glam::Vec2;

use super::state::{Enemy, EnemyVariant, Projectile};
use crate::consts::GROUND_LEVEL;
use crate::tuning::Tuning;

/// Advance one enemy: patrol, hop, then maybe shoot into `projectiles`.
///
/// Dead enemies are skipped entirely.
pub fn update_enemy(enemy: &mut Enemy, player_x: f32, now_ms: f64, tuning: &Tuning, projectiles: &mut Vec<Projectile>) {
    if !enemy.alive {
        return;
    }

    // Patrol: reflect off either bound
    if let Some(patrol) = enemy.patrol {
        enemy.pos.x += enemy.vel.x;
        if enemy.pos.x <= patrol.min_x {
            enemy.pos.x = patrol.min_x;
            enemy.vel.x = enemy.vel.x.abs();
        } else if enemy.pos.x >= patrol.max_x {
            enemy.pos.x = patrol.max_x;
            enemy.vel.x = -enemy.vel.x.abs();
        }
    }

    // Hop cycle
    if let Some(hop) = enemy.hop.as_mut() {
        enemy.vel.y += hop.gravity;
        enemy.pos.y += enemy.vel.y;

        let grounded = enemy.pos.y + enemy.size.y >= GROUND_LEVEL;
        if grounded {
            enemy.pos.y = GROUND_LEVEL - enemy.size.y;
            enemy.vel.y = 0.0;
            if now_ms - hop.last_jump_ms > hop.interval_ms {
                enemy.vel.y = hop.jump_power;
                hop.last_jump_ms = now_ms;
            }
        }
    }

    // Shooting
    let Some(turret) = enemy.turret.as_mut() else {
        return;
    };
    if now_ms - turret.last_shot_ms <= turret.interval_ms {
        return;
    }

    let muzzle = Vec2::new(enemy.pos.x, enemy.pos.y + enemy.size.y / 2.0);
    let shot = |offset_y: f32| Projectile {
        pos: muzzle - Vec2::new(0.0, offset_y),
        size: Vec2::splat(tuning.projectile_size),
        vx: tuning.projectile_speed,
    };
    match enemy.variant {
        EnemyVariant::Standard => projectiles.push(shot(0.0)),
        EnemyVariant::Challenge { shoot_range } => {
            if (enemy.pos.x - player_x).abs() < shoot_range {
                projectiles.push(shot(0.0));
                projectiles.push(shot(tuning.volley_spacing));
                log::debug!("Challenge volley at x={:.0}", enemy.pos.x);
            }
        }
    }
    // The timer resets even when out of range
    turret.last_shot_ms = now_ms;
}

/// Move projectiles and drop the ones far enough behind the camera
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, camera_x: f32, cull_margin: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.pos.x += projectile.vx;
    }
    projectiles.retain(|p| p.pos.x >= camera_x - cull_margin);
}
