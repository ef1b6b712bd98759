//! Block Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use block_runner::consts::MESSAGE_FADE_MS;
    use block_runner::platform::input::{
        InputAction, action_for_key, action_for_mouse_down, action_for_touch_start,
    };
    use block_runner::platform::storage::LocalStorageStore;
    use block_runner::platform::FrameClock;
    use block_runner::sim::{Bonus, EntityId, GameState, Obstacle, SeededRng, Viewport};
    use block_runner::{Scene, Session, StepOutcome, Tuning};

    /// DOM-backed scene: one absolutely positioned div per entity
    struct DomScene {
        document: Document,
        game: Element,
        player: HtmlElement,
        score: Option<Element>,
        message: Option<HtmlElement>,
        nodes: HashMap<EntityId, HtmlElement>,
    }

    impl DomScene {
        fn new(document: Document) -> Option<Self> {
            let game = document.get_element_by_id("game")?;
            let player = document
                .get_element_by_id("player")?
                .dyn_into::<HtmlElement>()
                .ok()?;
            let score = document.get_element_by_id("score");
            let message = document
                .get_element_by_id("message")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            let _ = player.style().set_property("bottom", "0px");
            Some(Self {
                document,
                game,
                player,
                score,
                message,
                nodes: HashMap::new(),
            })
        }

        fn div(&self) -> Option<HtmlElement> {
            self.document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()
        }

        fn px(el: &HtmlElement, prop: &str, value: f32) {
            let _ = el.style().set_property(prop, &format!("{}px", value));
        }

    }

    impl Scene for DomScene {
        fn add_obstacle(&mut self, obstacle: &Obstacle, tuning: &Tuning) {
            let Some(group) = self.div() else { return };
            let style = group.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("right", "0px");
            let _ = style.set_property("bottom", "0px");
            let _ = style.set_property("pointer-events", "none");
            Self::px(&group, "width", obstacle.width);
            Self::px(&group, "height", obstacle.height(tuning.block_height));

            let color = obstacle.color_hex();
            for i in 0..obstacle.stack {
                let Some(block) = self.div() else { continue };
                let _ = block.class_list().add_1("obstacle");
                let style = block.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("left", "0");
                let _ = style.set_property("background-color", color);
                let _ = style.set_property("box-shadow", &format!("0 0 8px {}", color));
                Self::px(&block, "width", obstacle.width);
                Self::px(&block, "height", tuning.block_height);
                Self::px(&block, "bottom", i as f32 * tuning.block_height);
                let _ = group.append_child(&block);
            }

            let _ = self.game.append_child(&group);
            self.nodes.insert(obstacle.id, group);
        }

        fn add_bonus(&mut self, bonus: &Bonus) {
            let Some(star) = self.div() else { return };
            let _ = star.class_list().add_1("star");
            let _ = star.style().set_property("position", "absolute");
            Self::px(&star, "width", bonus.size);
            Self::px(&star, "height", bonus.size);
            Self::px(&star, "right", 0.0);
            Self::px(&star, "bottom", bonus.height_above_ground);
            let _ = self.game.append_child(&star);
            self.nodes.insert(bonus.id, star);
        }

        fn remove(&mut self, id: EntityId) {
            if let Some(node) = self.nodes.remove(&id) {
                node.remove();
            }
        }

        fn spin_player(&mut self, angle_deg: f32) {
            let style = self.player.style();
            let _ = style.set_property("transition", "transform 0.25s linear");
            let _ = style.set_property("transform", &format!("rotate({}deg)", angle_deg - 15.0));

            // Settle after the overshoot; never awaited
            let player = self.player.clone();
            let settle = Closure::once(move || {
                let style = player.style();
                let _ = style.set_property("transition", "transform 0.3s ease-out");
                let _ = style.set_property("transform", &format!("rotate({}deg)", angle_deg));
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    settle.as_ref().unchecked_ref(),
                    250,
                );
            }
            settle.forget();
        }

        fn show_message(&mut self, text: &str) {
            let Some(message) = self.message.clone() else {
                log::info!("{}", text);
                return;
            };
            message.set_text_content(Some(text));
            let _ = message.style().set_property("opacity", "1");

            let fade = Closure::once(move || {
                let _ = message.style().set_property("opacity", "0");
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    fade.as_ref().unchecked_ref(),
                    MESSAGE_FADE_MS as i32,
                );
            }
            fade.forget();
        }

        fn reset(&mut self) {
            for (_, node) in self.nodes.drain() {
                node.remove();
            }
            let style = self.player.style();
            let _ = style.set_property("bottom", "0px");
            let _ = style.remove_property("transition");
            let _ = style.remove_property("transform");
        }

        fn sync(&mut self, state: &GameState) {
            Self::px(&self.player, "bottom", state.player.y);

            for obstacle in &state.world.obstacles {
                if let Some(node) = self.nodes.get(&obstacle.id) {
                    Self::px(node, "right", obstacle.offset);
                }
            }
            for bonus in &state.world.bonuses {
                if let Some(node) = self.nodes.get(&bonus.id) {
                    Self::px(node, "right", bonus.offset);
                }
            }

            if let Some(score) = &self.score {
                score.set_text_content(Some(&state.hud_text()));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore, SeededRng>,
        scene: DomScene,
        clock: FrameClock,
    }

    fn viewport() -> Viewport {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Viewport::default(),
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        match (width, height) {
            (Some(w), Some(h)) => Viewport {
                width: w as f32,
                height: h as f32,
            },
            _ => Viewport::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Block Runner starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(scene) = DomScene::new(document) else {
            log::error!("Missing #game or #player element");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            Tuning::load(),
            LocalStorageStore,
            SeededRng::new(seed),
            viewport(),
        );
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            scene,
            clock: FrameClock::new(),
        }));

        setup_input_handlers(game.clone());
        setup_resize(game.clone());
        setup_restart_button(game.clone());

        start(game);
        log::info!("Block Runner running!");
    }

    fn start(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let Game { session, scene, .. } = &mut *g;
            session.start();
            session.present(scene);
        }
        request_animation_frame(game);
    }

    fn request_jump(game: &Rc<RefCell<Game>>) {
        game.borrow_mut().session.request_jump();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let InputAction::Jump {
                    prevent_default, ..
                } = action_for_key(&event.code())
                {
                    if prevent_default {
                        event.prevent_default();
                    }
                    request_jump(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if let InputAction::Jump {
                    prevent_default, ..
                } = action_for_mouse_down()
                {
                    if prevent_default {
                        event.prevent_default();
                    }
                    request_jump(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (non-passive so the page doesn't scroll)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let InputAction::Jump {
                    prevent_default, ..
                } = action_for_touch_start()
                {
                    if prevent_default {
                        event.prevent_default();
                    }
                    request_jump(&game);
                }
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().session.resize(viewport());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_restart_visible(visible: bool) {
        let btn = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restart"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(btn) = btn {
            let display = if visible { "block" } else { "none" };
            let _ = btn.style().set_property("display", display);
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    g.session.restart();
                    g.clock.reset();
                }
                set_restart_visible(false);
                start(game.clone());
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One frame: step, mirror into the DOM, and reschedule unless the run ended
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();
            let Game {
                session,
                scene,
                clock,
            } = &mut *g;
            let now = clock.sample(time);
            let outcome = session.step(now);
            session.present(scene);
            outcome
        };

        match outcome {
            StepOutcome::Continue => request_animation_frame(game),
            StepOutcome::Stop => set_restart_visible(true),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_runner::Session;
    use block_runner::autopilot::Autopilot;
    use block_runner::platform::{FixedClock, default_store, run_headless};
    use block_runner::scene::LogScene;
    use block_runner::sim::{SeededRng, Viewport};
    use block_runner::tuning::Tuning;

    env_logger::init();
    log::info!("Block Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let seed = std::env::var("BLOCK_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Seed: {}", seed);

    let mut session = Session::new(
        Tuning::load(),
        default_store(),
        SeededRng::new(seed),
        Viewport::default(),
    );
    session.start();

    let mut scene = LogScene::default();
    let report = run_headless(
        &mut session,
        &mut FixedClock::default(),
        &mut scene,
        Some(&Autopilot::default()),
        60 * 60 * 5,
    );

    println!(
        "{} frames, {} obstacles, score {} (best {}){}",
        report.frames,
        scene.spawned,
        report.score,
        report.high_score,
        if report.crashed { ", crashed" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
