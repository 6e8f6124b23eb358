//! Neon Runner entry point
//!
//! On wasm the cabinet shell owns a [`wasm_game::CabinetHandle`]: building
//! one starts a requestAnimationFrame loop that pumps the driver and hands
//! each frame snapshot to the page for rendering, and freeing it halts all
//! future ticks and releases the keydown listener. On native this runs a
//! headless scripted demo session.

#[cfg(target_arch = "wasm32")]
pub mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use neon_runner::consts::SIM_DT;
    use neon_runner::sim::{RunEvent, RunStatus};
    use neon_runner::{RunConfig, RunDriver};

    // The page installs window.__presentFrame to render snapshots and
    // window.__onGameOver to receive the final score; the core never
    // touches pixels itself.
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (window.__presentFrame) {
                window.__presentFrame(JSON.parse(json));
            }
        }
        export function report_final_score(score) {
            if (window.__onGameOver) {
                window.__onGameOver(score);
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
        fn report_final_score(score: u32);
    }

    /// A keydown listener that unregisters itself when dropped.
    ///
    /// Tearing down the handle must release the listener on every exit
    /// path, or a dead session keeps receiving input against a torn-down
    /// page.
    struct KeyBinding {
        window: web_sys::Window,
        closure: Closure<dyn FnMut(KeyboardEvent)>,
    }

    impl KeyBinding {
        fn bind(harness: &Rc<RefCell<Harness>>) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or("no window")?;
            // Weak capture: input must stop reaching a torn-down session
            let weak = Rc::downgrade(harness);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(harness) = weak.upgrade() {
                    on_key(&harness, &event);
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            Ok(Self { window, closure })
        }
    }

    impl Drop for KeyBinding {
        fn drop(&mut self) {
            let _ = self.window.remove_event_listener_with_callback(
                "keydown",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }

    /// Loop state shared between the rAF callback and the key binding
    struct Harness {
        driver: RunDriver,
        last_time: f64,
        /// True while a rAF callback is pending; cleared when the loop
        /// parks itself on game over
        scheduled: bool,
    }

    fn on_key(harness: &Rc<RefCell<Harness>>, event: &KeyboardEvent) {
        let resume = {
            let mut h = harness.borrow_mut();
            match event.code().as_str() {
                "Space" | "ArrowUp" => {
                    h.driver.on_jump_requested();
                    false
                }
                "KeyR" => {
                    h.driver.on_restart_requested();
                    // The loop parked itself on game over; kick it awake so
                    // the next frame can apply the restart edge
                    if !h.scheduled {
                        h.scheduled = true;
                        h.last_time = 0.0;
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            }
        };
        if resume {
            request_animation_frame(Rc::downgrade(harness));
        }
    }

    fn request_animation_frame(harness: Weak<RefCell<Harness>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(harness, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(weak: Weak<RefCell<Harness>>, time: f64) {
        // Handle freed: the session is gone, halt without rescheduling
        let Some(harness) = weak.upgrade() else {
            return;
        };

        let parked = {
            let mut h = harness.borrow_mut();

            let dt = if h.last_time > 0.0 {
                ((time - h.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            h.last_time = time;

            for event in h.driver.frame(dt) {
                let RunEvent::GameOver { score } = event;
                log::info!("Game over, final score {score}");
                report_final_score(score);
            }

            let snapshot = h.driver.snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => present_frame(&json),
                Err(e) => log::error!("Snapshot serialization failed: {e}"),
            }

            // Park the loop once over; only a restart edge resumes it
            if h.driver.status() == RunStatus::Over {
                h.scheduled = false;
                true
            } else {
                false
            }
        };
        if !parked {
            request_animation_frame(weak);
        }
    }

    /// The cabinet shell's handle on one mounted game.
    ///
    /// Construction starts the loop; `free()` from JS halts all future
    /// ticks and releases the input listener.
    #[wasm_bindgen]
    pub struct CabinetHandle {
        harness: Rc<RefCell<Harness>>,
        _binding: KeyBinding,
    }

    #[wasm_bindgen]
    impl CabinetHandle {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<CabinetHandle, JsValue> {
            let seed = js_sys::Date::now() as u64;
            let driver = RunDriver::new(seed, RunConfig::default())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            log::info!("Neon Runner mounted (seed {seed})");

            let harness = Rc::new(RefCell::new(Harness {
                driver,
                last_time: 0.0,
                scheduled: true,
            }));
            let binding = KeyBinding::bind(&harness)?;
            request_animation_frame(Rc::downgrade(&harness));

            Ok(CabinetHandle {
                harness,
                _binding: binding,
            })
        }

        /// Latest score, for the shell's HUD between frames.
        pub fn score(&self) -> u32 {
            self.harness.borrow().driver.snapshot().score
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use neon_runner::consts::SIM_DT;
    use neon_runner::sim::{RunEvent, RunStatus};
    use neon_runner::{RunConfig, RunDriver};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    log::info!("Neon Runner headless demo (seed {seed})");

    let mut driver = match RunDriver::new(seed, RunConfig::default()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Jump on a fixed cadence and run until the session ends (ten minutes
    // of simulated time at most).
    for frame in 0..36_000u32 {
        if frame % 30 == 0 {
            driver.on_jump_requested();
        }
        for event in driver.frame(SIM_DT) {
            let RunEvent::GameOver { score } = event;
            println!("Game over after {frame} frames, final score {score}");
        }
        if driver.status() == RunStatus::Over {
            return;
        }
    }
    let snapshot = driver.snapshot();
    println!("Demo ended while still alive, score {}", snapshot.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
