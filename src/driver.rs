//! Frame driver
//!
//! Owns the simulation context and everything that feeds it. The host calls
//! [`FrameDriver::frame`] once per display refresh, then renders.

use crate::assets::{AssetTracker, LoadStatus};
use crate::renderer::{self, DrawCommand};
use crate::sim::{
    Clock, CollisionOutcome, GameState, InputState, Scene, SceneError, handle_confirm, tick,
};
use crate::snow::Snowfall;
use crate::tuning::Tuning;

pub struct FrameDriver<C: Clock> {
    pub state: GameState,
    /// Written by host event handlers between frames
    pub input: InputState,
    pub snow: Snowfall,
    pub assets: AssetTracker,
    clock: C,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(tuning: Tuning, clock: C, assets: AssetTracker, seed: u64) -> Self {
        let now = clock.now_ms();
        Self {
            state: GameState::new(tuning, now),
            input: InputState::default(),
            snow: Snowfall::new(seed),
            assets,
            clock,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one frame: gameplay while Playing, otherwise cosmetics and menu input.
    ///
    /// One-shot inputs are consumed even when the frame fails.
    pub fn frame(&mut self) -> Result<CollisionOutcome, SceneError> {
        let now = self.clock.now_ms();
        let result = self.step(now);
        self.input.end_frame();
        result
    }

    fn step(&mut self, now: f64) -> Result<CollisionOutcome, SceneError> {
        self.snow.update();

        if self.state.scene == Scene::Playing {
            let outcome = tick(&mut self.state, &self.input, &self.clock);
            if self.state.scene != Scene::Playing {
                // The finger that was steering must not confirm the next screen
                self.input.cancel_touch();
            }
            return Ok(outcome);
        }

        // Track the jump key on menus so a key held through a restart isn't a fresh press
        self.state.jump_was_down = self.input.jump;

        // A stall is logged once; menus keep running and confirm is refused below
        if let LoadStatus::Loading { loaded, total } = self.assets.poll(now) {
            log::trace!("Loading assets {}/{}", loaded, total);
        }
        // On menus a touch tap counts as Enter
        if self.input.confirm || self.input.tap.is_some() {
            handle_confirm(&mut self.state, now, &self.assets.missing_names())?;
        }
        Ok(CollisionOutcome::Continue)
    }

    /// Draw list for the current frame
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        renderer::build_frame(&self.state, &self.snow, self.clock.now_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteId;
    use crate::consts::PROJECTILE_SIZE;
    use crate::sim::Projectile;
    use glam::Vec2;
    use crate::sim::ManualClock;
    use crate::sim::scene::STORY_TEXT;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn driver(assets: AssetTracker) -> FrameDriver<ManualClock> {
        FrameDriver::new(Tuning::default(), ManualClock::new(0.0), assets, 42)
    }

    fn press_enter<C: Clock>(d: &mut FrameDriver<C>) -> Result<CollisionOutcome, SceneError> {
        d.input.set_key("Enter", true);
        let result = d.frame();
        d.input.set_key("Enter", false);
        result
    }

    fn skip_story(d: &mut FrameDriver<ManualClock>) {
        let ms = STORY_TEXT.chars().count() as f64 * d.state.tuning.ms_per_char;
        d.clock().advance(ms + 1.0);
    }

    #[test]
    fn test_start_to_playing() {
        let mut d = driver(AssetTracker::preloaded());
        press_enter(&mut d).unwrap();
        assert!(d.state.timers.dialog_shown);
        skip_story(&mut d);
        press_enter(&mut d).unwrap();
        assert_eq!(d.state.scene, Scene::Playing);
        assert!(!d.input.confirm);

        // Walk right for a second
        d.input.set_key("ArrowRight", true);
        for _ in 0..60 {
            d.clock().advance(FRAME_MS);
            d.frame().unwrap();
        }
        assert!(d.state.player.pos.x > 100.0);
    }

    #[test]
    fn test_loading_blocks_playing() {
        let mut d = driver(AssetTracker::new(0.0, 1000.0));
        press_enter(&mut d).unwrap();
        skip_story(&mut d);
        let err = press_enter(&mut d).unwrap_err();
        assert!(matches!(err, SceneError::AssetsNotReady { ref missing } if missing.len() == SpriteId::ALL.len()));
        assert_eq!(d.state.scene, Scene::Start);

        for id in SpriteId::ALL {
            d.assets.mark_loaded(id);
        }
        press_enter(&mut d).unwrap();
        assert_eq!(d.state.scene, Scene::Playing);
    }

    #[test]
    fn test_tap_confirms_on_menus() {
        let mut d = driver(AssetTracker::preloaded());
        d.input.touch_start(glam::Vec2::new(300.0, 300.0));
        d.input.touch_end();
        d.frame().unwrap();
        assert!(d.state.timers.dialog_shown);
        assert!(d.input.tap.is_none());
    }

    fn start_playing(d: &mut FrameDriver<ManualClock>) {
        press_enter(d).unwrap();
        skip_story(d);
        press_enter(d).unwrap();
        assert_eq!(d.state.scene, Scene::Playing);
    }

    fn shoot_player(d: &mut FrameDriver<ManualClock>) {
        d.state.projectiles.push(Projectile {
            pos: d.state.player.pos,
            size: Vec2::splat(PROJECTILE_SIZE),
            vx: 0.0,
        });
    }

    #[test]
    fn test_steering_touch_release_does_not_restart() {
        let mut d = driver(AssetTracker::preloaded());
        start_playing(&mut d);

        let finger = Vec2::new(300.0, 300.0);
        d.input.touch_start(finger);
        d.input.touch_move(finger);
        shoot_player(&mut d);
        d.clock().advance(FRAME_MS);
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::GameOver);

        d.input.touch_end();
        d.clock().advance(FRAME_MS);
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::GameOver);

        // A fresh tap on the GameOver screen restarts
        d.input.touch_start(finger);
        d.input.touch_end();
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::Playing);
    }

    #[test]
    fn test_held_enter_does_not_skip_scenes() {
        let mut d = driver(AssetTracker::preloaded());
        start_playing(&mut d);
        shoot_player(&mut d);
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::GameOver);

        d.input.set_key("Enter", true);
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::Playing);

        // Die again with Enter still held; repeats must not restart
        shoot_player(&mut d);
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::GameOver);
        for _ in 0..3 {
            d.input.set_key("Enter", true);
            d.frame().unwrap();
        }
        assert_eq!(d.state.scene, Scene::GameOver);
    }

    #[test]
    fn test_jump_held_through_restart_does_not_jump() {
        let mut d = driver(AssetTracker::preloaded());
        start_playing(&mut d);
        shoot_player(&mut d);
        d.frame().unwrap();
        assert_eq!(d.state.scene, Scene::GameOver);

        d.input.set_key("ArrowUp", true);
        d.frame().unwrap();
        press_enter(&mut d).unwrap();
        assert_eq!(d.state.scene, Scene::Playing);

        d.clock().advance(FRAME_MS);
        d.frame().unwrap();
        assert_eq!(d.state.player.jump_count, 0);

        // Release and press again jumps
        d.input.set_key("ArrowUp", false);
        d.frame().unwrap();
        d.input.set_key("ArrowUp", true);
        d.frame().unwrap();
        assert_eq!(d.state.player.jump_count, 1);
    }

    #[test]
    fn test_snow_moves_on_menus() {
        let mut d = driver(AssetTracker::preloaded());
        let before = d.snow.flakes[0].pos;
        d.frame().unwrap();
        assert_ne!(d.snow.flakes[0].pos, before);
    }

    #[test]
    fn test_draw_list_not_empty() {
        let d = driver(AssetTracker::preloaded());
        assert!(!d.draw_list().is_empty());
    }
}
