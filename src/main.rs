//! Frost Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use frost_hop::consts::*;
    use frost_hop::platform::{init_logging, to_logical};
    use frost_hop::renderer::{DrawCommand, TextAlign, ThemeColor};
    use frost_hop::sim::{Clock, CollisionOutcome, SystemClock};
    use frost_hop::{AssetTracker, FrameDriver, SpriteId, Tuning};

    struct Game {
        driver: FrameDriver<SystemClock>,
        images: HashMap<SpriteId, HtmlImageElement>,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn update(&mut self) {
            match self.driver.frame() {
                Ok(CollisionOutcome::Continue) => {}
                Ok(outcome) => log::debug!("Frame outcome: {:?}", outcome),
                Err(err) => log::warn!("{}", err),
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            for cmd in self.driver.draw_list() {
                match cmd {
                    DrawCommand::Fill { rect, color } => {
                        ctx.set_fill_style_str(css(color));
                        ctx.fill_rect(
                            rect.pos.x as f64,
                            rect.pos.y as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        );
                    }
                    DrawCommand::Sprite { id, rect } => {
                        let Some(img) = self.images.get(&id).filter(|img| img.complete()) else {
                            continue;
                        };
                        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            rect.pos.x as f64,
                            rect.pos.y as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        );
                    }
                    DrawCommand::Circle { center, radius, color } => {
                        ctx.set_fill_style_str(css(color));
                        ctx.begin_path();
                        let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                        ctx.fill();
                    }
                    DrawCommand::Text {
                        text,
                        pos,
                        size,
                        align,
                        color,
                        max_width,
                    } => {
                        ctx.set_font(&format!("bold {}px sans-serif", size));
                        ctx.set_text_align(match align {
                            TextAlign::Left => "left",
                            TextAlign::Center => "center",
                            TextAlign::Right => "right",
                        });
                        ctx.set_fill_style_str(css(color));
                        let lines = match max_width {
                            Some(width) => wrap_lines(ctx, &text, width as f64),
                            None => vec![text],
                        };
                        let line_height = size as f64 * 1.3;
                        for (i, line) in lines.iter().enumerate() {
                            let y = pos.y as f64 + i as f64 * line_height;
                            let _ = ctx.fill_text(line, pos.x as f64, y);
                        }
                    }
                }
            }
        }
    }

    fn css(color: ThemeColor) -> &'static str {
        match color {
            ThemeColor::Sky => "#1b2a4a",
            ThemeColor::Ground => "#eef4fb",
            ThemeColor::Snow => "rgba(255, 255, 255, 0.85)",
            ThemeColor::Gold => "#ffd23f",
            ThemeColor::White => "#ffffff",
            ThemeColor::Red => "#e03c3c",
            ThemeColor::Overlay => "rgba(0, 0, 0, 0.6)",
        }
    }

    /// Greedy word wrap using the context's current font
    fn wrap_lines(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", line, word)
                };
                let width = ctx.measure_text(&candidate).map(|m| m.width()).unwrap_or(0.0);
                if width > max_width && !line.is_empty() {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                } else {
                    line = candidate;
                }
            }
            lines.push(line);
        }
        lines
    }

    pub fn run() -> Result<(), JsValue> {
        init_logging(log::Level::Info);

        log::info!("Frost Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed logical resolution; CSS scales it for display
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let clock = SystemClock;
        let tuning = Tuning::default();
        let assets = AssetTracker::new(clock.now_ms(), tuning.asset_stall_ms);
        let seed = js_sys::Date::now() as u64;

        let game = Rc::new(RefCell::new(Game {
            driver: FrameDriver::new(tuning, clock, assets, seed),
            images: HashMap::new(),
            ctx,
        }));

        log::info!("Game initialized with seed: {}", seed);

        load_images(&game)?;
        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Frost Hop running!");
        Ok(())
    }

    fn load_images(game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in SpriteId::ALL {
            let img = HtmlImageElement::new()?;

            let onload = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || game.borrow_mut().driver.assets.mark_loaded(id))
            };
            let onerror = {
                let game = game.clone();
                Closure::<dyn FnMut()>::new(move || game.borrow_mut().driver.assets.mark_failed(id))
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onload.forget();
            onerror.forget();

            img.set_src(&id.path());
            game.borrow_mut().images.insert(id, img);
        }
        Ok(())
    }

    /// Pointer position in logical canvas pixels
    fn logical_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        to_logical(
            Vec2::new(client_x as f32, client_y as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().driver.input.set_key(&event.key(), down) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = logical_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().driver.input.touch_start(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = logical_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().driver.input.touch_move(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for event_name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().driver.input.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = logical_point(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().driver.input.click(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use frost_hop::platform::init_logging;

    init_logging(log::Level::Info);
    log::info!("Frost Hop (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(err) => {
                log::error!("Bad tuning file {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => frost_hop::Tuning::default(),
    };

    headless_demo(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<frost_hop::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(frost_hop::Tuning::from_json(&json)?)
}

/// Hold right and hop every half second until something happens
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(tuning: frost_hop::Tuning) {
    use frost_hop::sim::scene::STORY_TEXT;
    use frost_hop::sim::{CollisionOutcome, ManualClock, Scene};
    use frost_hop::{AssetTracker, FrameDriver};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let story_ms = STORY_TEXT.chars().count() as f64 * tuning.ms_per_char;
    let mut driver = FrameDriver::new(tuning, ManualClock::new(0.0), AssetTracker::preloaded(), 42);

    // Open the story, let it type out, then start
    for advance in [0.0, story_ms + 1.0] {
        driver.clock().advance(advance);
        driver.input.set_key("Enter", true);
        if let Err(err) = driver.frame() {
            log::error!("Could not start: {}", err);
            return;
        }
        driver.input.set_key("Enter", false);
    }

    driver.input.set_key("ArrowRight", true);
    let mut outcome = CollisionOutcome::Continue;
    for frame in 0..MAX_FRAMES {
        driver.clock().advance(FRAME_MS);
        driver.input.set_key("ArrowUp", frame % 30 < 2);
        match driver.frame() {
            Ok(CollisionOutcome::Continue) => {}
            Ok(terminal) => {
                outcome = terminal;
                break;
            }
            Err(err) => {
                log::error!("{}", err);
                return;
            }
        }
    }

    let state = &driver.state;
    let scene = state.scene;
    log::info!(
        "Demo finished in {:?} ({:?}): x = {:.0}, score = {}, kills = {}",
        scene,
        outcome,
        state.player.pos.x,
        state.stats.score,
        state.stats.kills
    );
    if scene == Scene::Playing {
        log::info!("Ran out of frames before the level ended");
    }
}
