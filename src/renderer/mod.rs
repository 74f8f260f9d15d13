//! Draw-list rendering
//!
//! Turns a game snapshot into an ordered list of screen-space draw commands.
//! The host paints them (Canvas2D on the web); nothing here feeds back into
//! the simulation. Colors are theme tokens resolved by the host.

mod overlay;

use glam::Vec2;

use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::{Aabb, GameState, Scene};
use crate::snow::Snowfall;

/// Named color tokens; the host maps them to its stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Sky,
    Ground,
    Snow,
    Gold,
    White,
    Red,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One paint operation, in logical canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Aabb, color: ThemeColor },
    Sprite { id: SpriteId, rect: Aabb },
    Circle { center: Vec2, radius: f32, color: ThemeColor },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: TextAlign,
        color: ThemeColor,
        /// Wrap width; the host wraps on word boundaries
        max_width: Option<f32>,
    },
}

/// Spacing of the repeating background props
const BACKDROP_SPACING: f32 = 450.0;
const BACKDROP_SIZE: Vec2 = Vec2::new(150.0, 150.0);

/// Build the full draw list for the current scene
pub fn build_frame(state: &GameState, snow: &Snowfall, now_ms: f64) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(64 + snow.flakes.len());
    let screen = Aabb::new(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));

    out.push(DrawCommand::Fill { rect: screen, color: ThemeColor::Sky });

    match state.scene {
        Scene::Playing | Scene::WinCelebration | Scene::GameOver => {
            push_ground(&mut out);
            push_snow(&mut out, snow);
            push_world(&mut out, state);
        }
        _ => push_snow(&mut out, snow),
    }

    match state.scene {
        Scene::Start => overlay::start(&mut out, state, now_ms),
        Scene::Playing => overlay::hud(&mut out, state),
        Scene::WinCelebration => overlay::celebration(&mut out, state, now_ms),
        Scene::RewardScene => overlay::reward(&mut out, state, now_ms),
        Scene::EndScene => overlay::end(&mut out, state),
        Scene::GameOver => overlay::game_over(&mut out, state),
    }

    out
}

fn push_ground(out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Fill {
        rect: Aabb::new(Vec2::new(0.0, GROUND_LEVEL), Vec2::new(CANVAS_WIDTH, GROUND_HEIGHT)),
        color: ThemeColor::Ground,
    });
}

fn push_snow(out: &mut Vec<DrawCommand>, snow: &Snowfall) {
    out.extend(snow.flakes.iter().map(|flake| DrawCommand::Circle {
        center: flake.pos,
        radius: flake.size / 2.0,
        color: ThemeColor::Snow,
    }));
}

/// World-space sprites shifted by the camera, culled to the viewport
fn push_world(out: &mut Vec<DrawCommand>, state: &GameState) {
    let cam = Vec2::new(state.camera.x, 0.0);
    let mut sprite = |id: SpriteId, world: Aabb| {
        let rect = Aabb::new(world.pos - cam, world.size);
        if rect.right() >= 0.0 && rect.left() <= CANVAS_WIDTH {
            out.push(DrawCommand::Sprite { id, rect });
        }
    };

    // Background props sit on the ground line, alternating art
    let first = (state.camera.x / BACKDROP_SPACING).floor() as i32;
    for i in first..=first + (CANVAS_WIDTH / BACKDROP_SPACING).ceil() as i32 + 1 {
        let id = if i % 2 == 0 { SpriteId::Backdrop1 } else { SpriteId::Backdrop2 };
        let pos = Vec2::new(i as f32 * BACKDROP_SPACING, GROUND_LEVEL - BACKDROP_SIZE.y);
        sprite(id, Aabb::new(pos, BACKDROP_SIZE));
    }

    for obstacle in &state.obstacles {
        sprite(SpriteId::block(obstacle.variant), obstacle.bounds());
    }
    if !state.star.collected {
        sprite(SpriteId::Star, state.star.bounds());
    }
    if !state.badge.collected {
        sprite(SpriteId::Badge, state.badge.bounds());
    }
    for enemy in state.enemies.iter().filter(|e| e.alive) {
        sprite(SpriteId::Enemy, enemy.bounds());
    }
    for projectile in &state.projectiles {
        sprite(SpriteId::Projectile, projectile.bounds());
    }

    let player = &state.player;
    let player_sprite = match (player.is_moving, player.has_star) {
        (true, true) => SpriteId::PlayerRunStar,
        (true, false) => SpriteId::PlayerRun,
        (false, _) => SpriteId::PlayerIdle,
    };
    sprite(player_sprite, player.bounds());

    // Tree last so the player walks behind it
    let tree = if state.goal.has_won { SpriteId::TreeLit } else { SpriteId::Tree };
    sprite(tree, state.goal.bounds());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::{Clock, ManualClock};
    use crate::sim::{InputState, tick};
    use crate::tuning::Tuning;

    fn sprites(list: &[DrawCommand]) -> Vec<(SpriteId, Aabb)> {
        list.iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Sprite { id, rect } => Some((*id, *rect)),
                _ => None,
            })
            .collect()
    }

    fn texts(list: &[DrawCommand]) -> Vec<String> {
        list.iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn playing() -> GameState {
        let mut state = GameState::new(Tuning::default(), 0.0);
        state.scene = Scene::Playing;
        state
    }

    #[test]
    fn test_world_is_culled_and_camera_shifted() {
        let mut state = playing();
        state.camera.x = 100.0;
        let list = build_frame(&state, &Snowfall::new(1), 0.0);
        let sprites = sprites(&list);

        let (_, player) = sprites
            .iter()
            .find(|(id, _)| *id == SpriteId::PlayerIdle)
            .copied()
            .unwrap();
        assert_eq!(player.pos.x, PLAYER_START_X - 100.0);
        // Tree is thousands of px away
        assert!(!sprites.iter().any(|(id, _)| *id == SpriteId::Tree));
        assert!(sprites.iter().all(|(_, r)| r.right() >= 0.0 && r.left() <= CANVAS_WIDTH));
    }

    #[test]
    fn test_floating_drawn_where_it_collides() {
        let clock = ManualClock::new(4321.0);
        let mut state = playing();
        tick(&mut state, &InputState::default(), &clock);
        let floating = state.obstacles.iter().find(|o| o.float.is_some()).unwrap().clone();
        state.camera.x = floating.pos.x - 200.0;

        let list = build_frame(&state, &Snowfall::new(1), clock.now_ms());
        let drawn = sprites(&list)
            .into_iter()
            .find(|(_, r)| r.pos.x == 200.0 && r.size == floating.size)
            .unwrap();
        assert_eq!(drawn.1.pos.y, floating.bounds().top());
    }

    #[test]
    fn test_dead_and_collected_hidden() {
        let mut state = playing();
        state.camera.x = 900.0;
        state.enemies[0].alive = false;
        let list = build_frame(&state, &Snowfall::new(1), 0.0);
        assert!(!sprites(&list).iter().any(|(id, _)| *id == SpriteId::Enemy));
    }

    #[test]
    fn test_hud_and_game_over_text() {
        let mut state = playing();
        state.stats.score = 550;
        let hud = texts(&build_frame(&state, &Snowfall::new(1), 0.0));
        assert!(hud.iter().any(|t| t == "Score: 550"));

        state.scene = Scene::GameOver;
        let over = texts(&build_frame(&state, &Snowfall::new(1), 0.0));
        assert!(over.iter().any(|t| t == "GAME OVER"));
        assert!(over.iter().any(|t| t == "Score: 550"));
    }
}
