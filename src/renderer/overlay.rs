//! Screen overlays: HUD, story dialog, celebration and end cards

use glam::Vec2;

use super::{DrawCommand, TextAlign, ThemeColor};
use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::scene::{STORY_TEXT, fully_typed, reveal};
use crate::sim::{Aabb, GameState};

const CENTER_X: f32 = CANVAS_WIDTH / 2.0;
const TEXT_WRAP: f32 = CANVAS_WIDTH - 120.0;

fn text(out: &mut Vec<DrawCommand>, text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign, color: ThemeColor) {
    out.push(DrawCommand::Text {
        text: text.into(),
        pos,
        size,
        align,
        color,
        max_width: None,
    });
}

fn paragraph(out: &mut Vec<DrawCommand>, body: &str, y: f32) {
    out.push(DrawCommand::Text {
        text: body.to_string(),
        pos: Vec2::new(CENTER_X, y),
        size: 18.0,
        align: TextAlign::Center,
        color: ThemeColor::White,
        max_width: Some(TEXT_WRAP),
    });
}

fn dim(out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Fill {
        rect: Aabb::new(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
        color: ThemeColor::Overlay,
    });
}

fn centered_art(out: &mut Vec<DrawCommand>, id: SpriteId, size: f32, y: f32) {
    out.push(DrawCommand::Sprite {
        id,
        rect: Aabb::new(Vec2::new(CENTER_X - size / 2.0, y), Vec2::splat(size)),
    });
}

pub(super) fn start(out: &mut Vec<DrawCommand>, state: &GameState, now_ms: f64) {
    centered_art(out, SpriteId::StartArt, 260.0, 220.0);

    let Some(started) = state.timers.dialog_started_ms.filter(|_| state.timers.dialog_shown) else {
        text(out, "Press ENTER to Begin", Vec2::new(CENTER_X, 100.0), 24.0, TextAlign::Center, ThemeColor::White);
        return;
    };

    let ms_per_char = state.tuning.ms_per_char;
    dim(out);
    paragraph(out, reveal(STORY_TEXT, started, now_ms, ms_per_char), 120.0);
    if fully_typed(STORY_TEXT, started, now_ms, ms_per_char) {
        text(out, "ENTER to set off", Vec2::new(CENTER_X, 260.0), 20.0, TextAlign::Center, ThemeColor::Gold);
    }
}

pub(super) fn hud(out: &mut Vec<DrawCommand>, state: &GameState) {
    text(out, "\u{2190} \u{2192} Move | \u{2191} Jump", Vec2::new(20.0, 40.0), 18.0, TextAlign::Left, ThemeColor::Gold);
    text(
        out,
        format!("Score: {}", state.stats.score),
        Vec2::new(CANVAS_WIDTH - 20.0, 40.0),
        24.0,
        TextAlign::Right,
        ThemeColor::Gold,
    );
}

pub(super) fn celebration(out: &mut Vec<DrawCommand>, state: &GameState, now_ms: f64) {
    let message = state.timers.celebration_message.as_str();
    let started = state.timers.celebration_started_ms.unwrap_or(now_ms);
    let ms_per_char = state.tuning.ms_per_char;

    dim(out);
    paragraph(out, reveal(message, started, now_ms, ms_per_char), 140.0);
    if fully_typed(message, started, now_ms, ms_per_char) {
        text(out, "Press ENTER", Vec2::new(CENTER_X, 240.0), 20.0, TextAlign::Center, ThemeColor::Gold);
    }
}

pub(super) fn reward(out: &mut Vec<DrawCommand>, state: &GameState, now_ms: f64) {
    let stats = &state.stats;
    centered_art(out, SpriteId::Reward, 200.0, 60.0);
    text(out, "Town Saved!", Vec2::new(CENTER_X, 300.0), 32.0, TextAlign::Center, ThemeColor::Gold);

    let seconds = stats.elapsed_ms(now_ms) / 1000.0;
    let lines = [
        format!("Score: {}", stats.score),
        format!("Monsters stomped: {}", stats.kills),
        format!("Time: {:.1}s", seconds),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        let y = 350.0 + i as f32 * 32.0;
        text(out, line, Vec2::new(CENTER_X, y), 20.0, TextAlign::Center, ThemeColor::White);
    }
    if stats.badge_collected {
        centered_art(out, SpriteId::Badge, 40.0, 450.0);
    }
    text(out, "Press ENTER", Vec2::new(CENTER_X, 530.0), 18.0, TextAlign::Center, ThemeColor::Gold);
}

pub(super) fn end(out: &mut Vec<DrawCommand>, state: &GameState) {
    centered_art(out, SpriteId::EndArt, 260.0, 140.0);
    text(out, "Thanks for playing", Vec2::new(CENTER_X, 100.0), 32.0, TextAlign::Center, ThemeColor::Gold);
    text(
        out,
        format!("Final score: {}", state.stats.score),
        Vec2::new(CENTER_X, 450.0),
        22.0,
        TextAlign::Center,
        ThemeColor::White,
    );
    text(out, "Press ENTER to return", Vec2::new(CENTER_X, 500.0), 18.0, TextAlign::Center, ThemeColor::White);
}

pub(super) fn game_over(out: &mut Vec<DrawCommand>, state: &GameState) {
    let mid = CANVAS_HEIGHT / 2.0;
    dim(out);
    text(out, "GAME OVER", Vec2::new(CENTER_X, mid - 80.0), 64.0, TextAlign::Center, ThemeColor::Red);
    text(
        out,
        format!("Score: {}", state.stats.score),
        Vec2::new(CENTER_X, mid + 20.0),
        28.0,
        TextAlign::Center,
        ThemeColor::White,
    );
    text(out, "Press ENTER to Restart", Vec2::new(CENTER_X, mid + 80.0), 22.0, TextAlign::Center, ThemeColor::White);
}
