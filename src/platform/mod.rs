//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Mapping pointer positions from CSS pixels to the logical canvas

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Install the logger for the current target.
///
/// Browser builds log to the devtools console and route panics there too.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::warn!("Logger already initialized");
    }
}

/// Install the logger for the current target.
///
/// `RUST_LOG` overrides the given level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::Level) {
    let default = level.to_level_filter().to_string();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}

/// Convert a client-space point into logical canvas coordinates.
///
/// `rect_origin`/`rect_size` are the canvas' bounding rect in CSS pixels; the
/// canvas may be scaled by the page, so the point is stretched back to the
/// fixed logical resolution. A degenerate rect maps everything to the origin.
pub fn to_logical(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Vec2 {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) / rect_size;
    (client - rect_origin) * scale
}
