//! Chroma Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use chroma_rush::audio::{AudioManager, SoundEffect};
    use chroma_rush::consts::*;
    use chroma_rush::highscore;
    use chroma_rush::platform::ads::AdBroker;
    use chroma_rush::platform::debounce::DebouncedTask;
    use chroma_rush::render::CanvasRenderer;
    use chroma_rush::settings::Settings;
    use chroma_rush::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use chroma_rush::viewport;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: HtmlCanvasElement,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        broker: AdBroker,
        input: TickInput,
    }

    impl Game {
        /// Latch an activate press (click, tap, or Space) for the next tick
        fn activate(&mut self) {
            self.input.activate = true;
            self.audio.resume();
            if self.state.phase == GamePhase::Playing {
                self.audio.play(SoundEffect::ColorCycle);
            }
        }

        /// Flip the sound setting and persist it
        fn toggle_sound(&mut self) {
            let enabled = self.settings.toggle_sound();
            self.settings.save();
            self.audio.set_muted(!enabled);
            log::info!("Sound {}", if enabled { "on" } else { "off" });
        }

        /// Run one simulation tick and act on the events it produced
        fn frame(&mut self) {
            let input = self.input;
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input.activate = false;

            for event in self.state.drain_events() {
                self.handle_event(event);
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::RunStarted => {
                    self.broker.notify_gameplay_start();
                }
                GameEvent::GatePassed { score, combo } => {
                    log::debug!("Gate passed: score {score} combo {combo}");
                    self.audio.play(SoundEffect::GatePass);
                }
                GameEvent::RunEnded {
                    score,
                    high_score,
                    beat_high_score,
                    show_interstitial,
                } => {
                    log::info!("Run ended: score {score} (high score {high_score})");
                    self.broker.notify_gameplay_stop();
                    if beat_high_score {
                        highscore::save(high_score);
                        self.audio.play(SoundEffect::HighScore);
                    } else {
                        self.audio.play(SoundEffect::GameOver);
                    }
                    if show_interstitial {
                        self.broker.request_interstitial_ad();
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            self.renderer.render(&self.state);
        }

        /// Re-fit the canvas to its container and adopt the new mapping
        fn apply_viewport(&mut self) {
            let (width, height) = container_size();
            let config = viewport::resolve(width, height);

            // CSS scales the element; the internal resolution stays fixed
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", config.display_width.floor()));
            let _ = style.set_property("height", &format!("{}px", config.display_height.floor()));
            self.canvas.set_width(LOGICAL_WIDTH as u32);
            self.canvas.set_height(LOGICAL_HEIGHT as u32);

            self.state.player.radius = config.player_radius;
            self.renderer.set_viewport(config);

            log::info!(
                "Viewport: {:.0}x{:.0} ({})",
                config.display_width,
                config.display_height,
                config.device_class.as_str()
            );
        }
    }

    /// Measure the canvas container in CSS pixels
    fn container_size() -> (f32, f32) {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvasContainer"))
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                (rect.width() as f32, rect.height() as f32)
            })
            .unwrap_or((LOGICAL_WIDTH, LOGICAL_HEIGHT))
    }

    /// Owns the requestAnimationFrame chain so visibility changes can stop
    /// and restart it without leaking callbacks
    #[derive(Clone)]
    struct FrameLoop {
        raf_id: Rc<Cell<Option<i32>>>,
        game: Rc<RefCell<Game>>,
    }

    impl FrameLoop {
        fn new(game: Rc<RefCell<Game>>) -> Self {
            Self {
                raf_id: Rc::new(Cell::new(None)),
                game,
            }
        }

        /// Begin the frame chain if it is not already running
        fn start(&self) {
            if self.raf_id.get().is_some() {
                return;
            }
            self.schedule();
        }

        /// Stop the chain; the pending callback is cancelled
        fn cancel(&self) {
            if let Some(id) = self.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }

        fn schedule(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let frame_loop = self.clone();
            let closure = Closure::once(move |_time: f64| {
                frame_loop.raf_id.set(None);
                {
                    let mut game = frame_loop.game.borrow_mut();
                    game.frame();
                    game.render();
                }
                frame_loop.schedule();
            });
            match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                Ok(id) => self.raf_id.set(Some(id)),
                Err(_) => log::error!("requestAnimationFrame failed"),
            }
            closure.forget();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chroma Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Detect the hosting portal before the first frame
        let broker = AdBroker::detect().await;

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.score.high_score = highscore::load();

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_muted(!settings.sound_enabled);

        let renderer = CanvasRenderer::new(ctx, viewport::resolve(LOGICAL_WIDTH, LOGICAL_HEIGHT));

        let game = Rc::new(RefCell::new(Game {
            state,
            canvas: canvas.clone(),
            renderer,
            audio,
            settings,
            broker,
            input: TickInput::default(),
        }));
        game.borrow_mut().apply_viewport();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(game.clone());

        let frame_loop = FrameLoop::new(game);
        setup_visibility_handler(&frame_loop);
        frame_loop.start();

        log::info!("Chroma Rush running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Space activates, M toggles sound
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if event.code() == "Space" || key == " " {
                    event.prevent_default();
                    game.borrow_mut().activate();
                } else if key == "m" || key == "M" {
                    game.borrow_mut().toggle_sound();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Resize and orientation changes share one debounced refit
    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let debounce = Rc::new(RefCell::new(DebouncedTask::new(RESIZE_DEBOUNCE_MS)));

        for event_name in ["resize", "orientationchange"] {
            let game = game.clone();
            let debounce = debounce.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let game = game.clone();
                debounce.borrow_mut().schedule(move || {
                    game.borrow_mut().apply_viewport();
                });
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Halt the frame chain while the tab is hidden
    fn setup_visibility_handler(frame_loop: &FrameLoop) {
        let document = web_sys::window().unwrap().document().unwrap();
        let frame_loop = frame_loop.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                frame_loop.cancel();
                log::info!("Frame loop paused (tab hidden)");
            } else {
                frame_loop.start();
                log::info!("Frame loop resumed");
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chroma_rush::highscore;
    use chroma_rush::platform::ads::AdBroker;
    use chroma_rush::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Chroma Rush (native) starting...");
    log::info!("Headless mode - run with `trunk serve` for the browser version");

    let broker = AdBroker::detect();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    state.score.high_score = highscore::load();
    log::info!("Seed: {seed}");

    // Scripted session: a bot that cycles toward the oldest live gate's color
    tick(&mut state, &TickInput { activate: true });
    let mut ticks = 0u64;
    while state.phase == GamePhase::Playing && ticks < 20_000 {
        let target = state.gates.iter().find(|g| !g.passed).map(|g| g.color);
        let activate = matches!(target, Some(color) if color != state.player.color);
        tick(&mut state, &TickInput { activate });

        for event in state.drain_events() {
            match event {
                GameEvent::RunStarted => broker.notify_gameplay_start(),
                GameEvent::GatePassed { score, combo } => {
                    log::debug!("gate passed: score {score} combo {combo}");
                }
                GameEvent::RunEnded { score, .. } => {
                    broker.notify_gameplay_stop();
                    log::info!("run ended at score {score}");
                }
            }
        }
        ticks += 1;
    }

    println!(
        "Session over: score {} (high score {}) after {} ticks",
        state.score.score, state.score.high_score, state.difficulty.elapsed_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
