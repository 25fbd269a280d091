//! Gendarme Enquête entry point
//!
//! Handles platform-specific initialization. In the browser it mounts the game
//! on `#app`; natively it plays a seeded run headlessly on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;

    use gendarme_enquete::Game;
    use gendarme_enquete::audio::WebAudioBackend;
    use gendarme_enquete::settings::GameSettings;
    use gendarme_enquete::sim::Intent;
    use gendarme_enquete::timer::{BrowserScheduler, TimerId};
    use gendarme_enquete::ui::dom::{DomRenderer, action_from_event};

    /// Game plus the page it draws into
    struct WebApp {
        game: Game<WebAudioBackend, BrowserScheduler>,
        renderer: DomRenderer,
    }

    impl WebApp {
        fn handle(&mut self, intent: Intent) {
            self.game.dispatch(intent);
            self.redraw();
        }

        fn redraw(&mut self) {
            if let Err(e) = self.renderer.render(self.game.view()) {
                log::error!("Render error: {:?}", e);
            }
        }
    }

    fn timer_callback(app: Weak<RefCell<WebApp>>) -> Rc<dyn Fn(TimerId)> {
        Rc::new(move |timer| {
            if let Some(app) = app.upgrade() {
                app.borrow_mut().handle(Intent::TimerFired(timer));
            }
        })
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Gendarme Enquête starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let root = document.get_element_by_id("app").ok_or("no #app element")?;
        let settings = GameSettings::load();
        let seed = js_sys::Date::now() as u64;

        let app = Rc::new_cyclic(|weak: &Weak<RefCell<WebApp>>| {
            let scheduler = BrowserScheduler::new(timer_callback(weak.clone()));
            RefCell::new(WebApp {
                game: Game::new(seed, &settings, WebAudioBackend::new(), scheduler),
                renderer: DomRenderer::new(document.clone(), root.clone()),
            })
        });
        log::info!("Game initialized with seed: {}", seed);

        // One delegated listener for every button and scene object
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some(action) = action_from_event(&event) {
                    log::debug!("Action: {}", action);
                    app.borrow_mut().handle(action.intent());
                }
            });
            root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        app.borrow_mut().redraw();
        log::info!("Gendarme Enquête running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gendarme Enquête (native) starting...");
    log::info!("The game itself runs in the browser - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

    autoplay::run(seed);
}

/// Headless run: a player who finds one target per second and blunders
/// into a piece of clutter at the start of every level.
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use gendarme_enquete::audio::SilentBackend;
    use gendarme_enquete::settings::GameSettings;
    use gendarme_enquete::sim::{GamePhase, Intent};
    use gendarme_enquete::timer::ManualScheduler;
    use gendarme_enquete::ui::format_clock;
    use gendarme_enquete::Game;

    pub fn run(seed: u64) {
        let settings = GameSettings::load();
        let mut game = Game::new(seed, &settings, SilentBackend, ManualScheduler::new());
        log::info!("Headless run with seed: {}", seed);

        game.dispatch(Intent::StartGame);
        while game.state().phase == GamePhase::Playing {
            let level = game.state().level_index;
            if let Some(cfg) = game.state().level() {
                log::info!(
                    "Level {} '{}': {} targets among {} objects, {}",
                    cfg.id,
                    cfg.name,
                    cfg.target_count,
                    game.state().objects.len(),
                    format_clock(game.state().time_left)
                );
            }

            if let Some(clutter) = game.state().objects.iter().find(|o| !o.is_target) {
                let id = clutter.id;
                game.dispatch(Intent::ObjectClicked(id));
            }

            let targets: Vec<u32> = game.state().targets.iter().map(|t| t.id).collect();
            for id in targets {
                game.advance_time(u64::from(settings.rules.tick_interval_ms));
                if game.state().phase != GamePhase::Playing {
                    break;
                }
                game.dispatch(Intent::ObjectClicked(id));
            }

            game.advance_time(u64::from(settings.rules.advance_delay_ms));
            if game.state().phase == GamePhase::Playing && game.state().level_index == level {
                // Stuck on a level means targets could not all be clicked; let the clock run out
                let remaining = u64::from(game.state().time_left);
                game.advance_time(remaining * u64::from(settings.rules.tick_interval_ms));
            }
        }

        let elapsed = game.scheduler().now_ms() / 1000;
        log::info!("Run took {} of game time", format_clock(u32::try_from(elapsed).unwrap_or(u32::MAX)));
        match game.state().phase {
            GamePhase::Won => log::info!("Won! Final score: {}", game.state().score),
            phase => log::info!(
                "Run ended in {:?} on level {} with score {}",
                phase,
                game.state().level_index + 1,
                game.state().score
            ),
        }
    }
}
