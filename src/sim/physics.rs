//! Player kinematics and camera follow
//!
//! Simple per-frame Euler integration in px/frame: horizontal speed is set
//! directly from input, gravity accumulates into vertical velocity.

use super::input::InputState;
use super::state::{Camera, GameState, Goal};
use crate::consts::GROUND_LEVEL;
use crate::tuning::Tuning;

/// Read input, integrate the player, clamp to ground and level bounds.
///
/// `on_ground` set here may be overwritten by collision resolution later in
/// the same frame.
pub fn update_player(state: &mut GameState, input: &InputState) {
    let max_x = state.max_player_x();
    let tuning = &state.tuning;
    let player = &mut state.player;

    // Keyboard
    if input.right {
        player.vel.x = player.speed;
        player.is_moving = true;
        player.facing_right = true;
    } else if input.left {
        player.vel.x = -player.speed;
        player.is_moving = true;
        player.facing_right = false;
    } else {
        player.vel.x = 0.0;
        player.is_moving = false;
    }

    // Jump on the key's rising edge only
    if input.jump && !state.jump_was_down {
        player.try_jump();
    }
    state.jump_was_down = input.jump;

    // Touch drag: sideways past the dead-zone walks, a swipe up jumps
    match input.drag {
        Some(drag) => {
            let delta_x = drag.delta().x;
            if delta_x.abs() >= tuning.drag_dead_zone_x {
                player.vel.x = player.speed.copysign(delta_x);
                player.is_moving = true;
                player.facing_right = delta_x > 0.0;
            }

            let anchor_y = *state.drag_anchor_y.get_or_insert(drag.start.y);
            if drag.current.y - anchor_y < tuning.drag_jump_dead_zone_y && player.try_jump() {
                // Re-arm so the next swipe is measured from here
                state.drag_anchor_y = Some(drag.current.y);
            }
        }
        None => state.drag_anchor_y = None,
    }

    player.pos.x += player.vel.x;
    player.vel.y += player.gravity;
    player.pos.y += player.vel.y;

    if player.bottom() >= GROUND_LEVEL {
        player.land_on(GROUND_LEVEL);
    } else {
        player.on_ground = false;
    }

    player.pos.x = player.pos.x.min(max_x).max(0.0);
}

/// Largest camera offset for this goal.
///
/// Once the level has ended the bound tightens so the whole goal stays visible.
pub fn max_camera_x(goal: &Goal, level_ended: bool, tuning: &Tuning) -> f32 {
    let margin = if level_ended {
        tuning.camera_goal_margin_ended
    } else {
        tuning.camera_goal_margin
    };
    (goal.pos.x - margin).max(0.0)
}

/// Follow the player once it runs past the threshold, then clamp
pub fn update_camera(camera: &mut Camera, player_x: f32, max_x: f32) {
    if player_x - camera.x > camera.follow_threshold {
        camera.x = player_x - camera.follow_threshold;
    }
    camera.x = camera.x.min(max_x).max(0.0);
}
