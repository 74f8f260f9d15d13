//! Input state shared between host event handlers and the simulation
//!
//! Handlers only write flags and coordinates here; the simulation reads the
//! whole struct once per frame. Last write wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Active pointer/touch drag, in logical canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub start: Vec2,
    pub current: Vec2,
}

impl Drag {
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }
}

/// Keyboard, touch and pointer state for one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Jump key held; the simulation reacts to its rising edge
    pub jump: bool,
    /// Confirm (Enter / tap / click). One-shot: the driver clears it after each frame.
    pub confirm: bool,
    /// Drag in progress, if any
    pub drag: Option<Drag>,
    /// Last tap/click position; on menus a tap counts as confirm
    pub tap: Option<Vec2>,
    /// Enter currently held, so auto-repeat keydowns don't re-confirm
    #[serde(default)]
    pub(crate) enter_down: bool,
}

impl InputState {
    /// Map a `KeyboardEvent.key` value. Returns false for keys we don't track.
    pub fn set_key(&mut self, key: &str, down: bool) -> bool {
        match key {
            "ArrowLeft" => self.left = down,
            "ArrowRight" => self.right = down,
            "ArrowUp" => self.jump = down,
            "Enter" => {
                if down && !self.enter_down {
                    self.confirm = true;
                }
                self.enter_down = down;
            }
            _ => return false,
        }
        true
    }

    pub fn touch_start(&mut self, pos: Vec2) {
        self.drag = Some(Drag { start: pos, current: pos });
    }

    pub fn touch_move(&mut self, pos: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.current = pos;
        }
    }

    /// End of a touch: the release point doubles as a tap
    pub fn touch_end(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.tap = Some(drag.current);
        }
    }

    /// Drop any touch in progress so its release is not read as a tap
    pub fn cancel_touch(&mut self) {
        self.drag = None;
        self.tap = None;
    }

    /// Mouse click: a tap plus a synthetic confirm for menu advancement
    pub fn click(&mut self, pos: Vec2) {
        self.tap = Some(pos);
        self.confirm = true;
    }

    /// Clear one-shot inputs after a frame has consumed them
    pub fn end_frame(&mut self) {
        self.confirm = false;
        self.tap = None;
    }
}
