//! Scene state machine
//!
//! Start -> Playing -> WinCelebration -> RewardScene -> EndScene -> Start,
//! with Playing -> GameOver -> Playing on a lethal hit. Every edge except the
//! two out of Playing is driven by a confirm press.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::{CollisionOutcome, Hazard};
use super::physics::max_camera_x;
use super::state::GameState;

/// Story shown on the start screen
pub const STORY_TEXT: &str = "The town's great tree has lost its star! \
Find a new one, stomp the frost monsters, dodge their ice shots, \
and climb to the top of the tree to light it up again.";

/// Message typed out on the celebration screen
pub const WIN_MESSAGE: &str = "The star is back where it belongs. The whole town is glowing again!";

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    #[default]
    Start,
    Playing,
    WinCelebration,
    RewardScene,
    EndScene,
    GameOver,
}

/// Scene-local timers that outlive a single frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneTimers {
    /// Start screen has moved from the prompt to the story dialog
    pub dialog_shown: bool,
    pub dialog_started_ms: Option<f64>,
    pub celebration_started_ms: Option<f64>,
    pub celebration_message: String,
    pub reward_started_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("cannot start playing: {} asset(s) still loading ({})", missing.len(), missing.join(", "))]
    AssetsNotReady { missing: Vec<String> },
}

/// Number of characters revealed by a typewriter started at `started_ms`
pub fn visible_chars(started_ms: f64, now_ms: f64, ms_per_char: f64) -> usize {
    let elapsed = (now_ms - started_ms).max(0.0);
    (elapsed / ms_per_char).floor() as usize
}

/// Prefix of `text` revealed so far (whole chars, never splits a code point)
pub fn reveal(text: &str, started_ms: f64, now_ms: f64, ms_per_char: f64) -> &str {
    let shown = visible_chars(started_ms, now_ms, ms_per_char);
    match text.char_indices().nth(shown) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Whether the typewriter has finished
pub fn fully_typed(text: &str, started_ms: f64, now_ms: f64, ms_per_char: f64) -> bool {
    visible_chars(started_ms, now_ms, ms_per_char) >= text.chars().count()
}

/// React to a confirm press in the current scene.
///
/// `missing_assets` lists drawables that haven't loaded; entering Playing is
/// refused while it is non-empty.
pub fn handle_confirm(state: &mut GameState, now_ms: f64, missing_assets: &[String]) -> Result<(), SceneError> {
    match state.scene {
        Scene::Start if !state.timers.dialog_shown => {
            state.timers.dialog_shown = true;
            state.timers.dialog_started_ms = Some(now_ms);
            log::info!("Start: story dialog");
        }
        Scene::Start => {
            let started = state.timers.dialog_started_ms.unwrap_or(now_ms);
            if !fully_typed(STORY_TEXT, started, now_ms, state.tuning.ms_per_char) {
                // Still typing; ignore
                return Ok(());
            }
            enter_playing(state, now_ms, missing_assets)?;
            state.timers.dialog_shown = false;
        }
        Scene::Playing => {}
        Scene::WinCelebration => {
            state.scene = Scene::RewardScene;
            state.timers.reward_started_ms = Some(now_ms);
            log::info!("Scene: RewardScene");
        }
        Scene::RewardScene => {
            state.scene = Scene::EndScene;
            log::info!("Scene: EndScene");
        }
        Scene::EndScene => {
            state.scene = Scene::Start;
            state.timers.dialog_shown = false;
            state.timers.dialog_started_ms = None;
            log::info!("Scene: Start");
        }
        Scene::GameOver => enter_playing(state, now_ms, missing_assets)?,
    }
    Ok(())
}

fn enter_playing(state: &mut GameState, now_ms: f64, missing_assets: &[String]) -> Result<(), SceneError> {
    if !missing_assets.is_empty() {
        log::warn!("Refusing to start: {} asset(s) not loaded", missing_assets.len());
        return Err(SceneError::AssetsNotReady {
            missing: missing_assets.to_vec(),
        });
    }
    state.reset_level(now_ms);
    state.scene = Scene::Playing;
    log::info!("Scene: Playing");
    Ok(())
}

/// Apply the scene change a collision outcome asks for
pub fn apply_outcome(state: &mut GameState, outcome: CollisionOutcome, now_ms: f64) {
    match outcome {
        CollisionOutcome::Continue => {}
        CollisionOutcome::Won => enter_win(state, now_ms),
        CollisionOutcome::Died(hazard) => enter_game_over(state, hazard, now_ms),
    }
}

fn enter_win(state: &mut GameState, now_ms: f64) {
    state.goal.has_won = true;
    state.stats.level_ended = true;
    state.stats.latch_end(now_ms);
    state.timers.celebration_started_ms = Some(now_ms);
    state.timers.celebration_message = WIN_MESSAGE.to_string();
    state.scene = Scene::WinCelebration;

    // Pull the camera in so the lit tree is fully on screen
    let max_x = max_camera_x(&state.goal, true, &state.tuning);
    state.camera.x = state.camera.x.min(max_x);

    log::info!(
        "Level complete: score {}, kills {}, {:.1}s",
        state.stats.score,
        state.stats.kills,
        state.stats.elapsed_ms(now_ms) / 1000.0
    );
}

fn enter_game_over(state: &mut GameState, hazard: Hazard, now_ms: f64) {
    state.stats.latch_end(now_ms);
    state.scene = Scene::GameOver;
    log::info!("Game over ({:?}), score {}", hazard, state.stats.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn story_done(state: &GameState) -> f64 {
        state.timers.dialog_started_ms.unwrap() + STORY_TEXT.chars().count() as f64 * state.tuning.ms_per_char
    }

    #[test]
    fn test_typewriter_reveal() {
        assert_eq!(reveal("hello", 0.0, 0.0, 50.0), "");
        assert_eq!(reveal("hello", 0.0, 149.0, 50.0), "he");
        assert_eq!(reveal("hello", 0.0, 10_000.0, 50.0), "hello");
        // Multi-byte characters are never split
        assert_eq!(reveal("héllo", 0.0, 100.0, 50.0), "hé");
        assert!(fully_typed("hi", 0.0, 100.0, 50.0));
        assert!(!fully_typed("hi", 0.0, 99.0, 50.0));
    }

    #[test]
    fn test_full_cycle() {
        let mut state = GameState::new(Tuning::default(), 0.0);
        assert_eq!(state.scene, Scene::Start);

        handle_confirm(&mut state, 100.0, &[]).unwrap();
        assert!(state.timers.dialog_shown);
        assert_eq!(state.scene, Scene::Start);

        // Mid-typing confirm is ignored
        handle_confirm(&mut state, 200.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::Start);

        let done = story_done(&state);
        handle_confirm(&mut state, done, &[]).unwrap();
        assert_eq!(state.scene, Scene::Playing);
        assert!(!state.timers.dialog_shown);
        assert_eq!(state.stats.started_at_ms, Some(done));

        apply_outcome(&mut state, CollisionOutcome::Won, done + 5000.0);
        assert_eq!(state.scene, Scene::WinCelebration);
        assert!(state.goal.has_won);
        assert!(state.stats.level_ended);
        assert_eq!(state.timers.celebration_message, WIN_MESSAGE);

        handle_confirm(&mut state, done + 6000.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::RewardScene);
        assert_eq!(state.timers.reward_started_ms, Some(done + 6000.0));
        handle_confirm(&mut state, done + 7000.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::EndScene);
        handle_confirm(&mut state, done + 8000.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::Start);
        assert!(!state.timers.dialog_shown);
    }

    #[test]
    fn test_game_over_restart() {
        let mut state = GameState::new(Tuning::default(), 0.0);
        state.scene = Scene::Playing;
        state.stats.score = 700;

        apply_outcome(&mut state, CollisionOutcome::Died(Hazard::Projectile(0)), 1234.0);
        assert_eq!(state.scene, Scene::GameOver);
        assert_eq!(state.stats.ended_at_ms, Some(1234.0));

        // A second lethal report keeps the first timestamp
        apply_outcome(&mut state, CollisionOutcome::Died(Hazard::Enemy(1)), 2000.0);
        assert_eq!(state.stats.ended_at_ms, Some(1234.0));

        handle_confirm(&mut state, 3000.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::Playing);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.ended_at_ms, None);
    }

    #[test]
    fn test_refuses_to_play_without_assets() {
        let mut state = GameState::new(Tuning::default(), 0.0);
        handle_confirm(&mut state, 0.0, &[]).unwrap();
        let done = story_done(&state);

        let missing = vec!["player_run".to_string()];
        let err = handle_confirm(&mut state, done, &missing).unwrap_err();
        assert_eq!(err, SceneError::AssetsNotReady { missing });
        assert_eq!(state.scene, Scene::Start);
        assert!(state.timers.dialog_shown);

        handle_confirm(&mut state, done + 10.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::Playing);
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        let mut state = GameState::new(Tuning::default(), 0.0);
        state.scene = Scene::Playing;
        handle_confirm(&mut state, 10.0, &[]).unwrap();
        assert_eq!(state.scene, Scene::Playing);
    }
}
