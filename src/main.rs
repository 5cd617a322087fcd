//! Floppy Bird entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use floppy_bird::Tuning;
    use floppy_bird::consts::MAX_SUBSTEPS;
    use floppy_bird::game::{Flow, Game};
    use floppy_bird::platform::input::signal_for_dom_key;
    use floppy_bird::platform::{FixedStep, InputFrame, InputSignal, SystemClock, seed_from_clock};
    use floppy_bird::renderer::{OverlayKind, RenderState};

    /// Browser-side wrapper: session, GPU state and frame bookkeeping
    struct App {
        game: Game<SystemClock>,
        render_state: Option<RenderState>,
        step: FixedStep,
        last_time: f64,
        input: InputFrame,
        running: bool,
    }

    impl App {
        fn new(tuning: Tuning, seed: u64) -> Self {
            let step = FixedStep::new(tuning.fps, MAX_SUBSTEPS);
            Self {
                game: Game::new(tuning, seed, SystemClock::new()),
                render_state: None,
                step,
                last_time: 0.0,
                input: InputFrame::default(),
                running: true,
            }
        }

        /// Run as many gameplay frames as the elapsed time calls for
        fn update(&mut self, dt_ms: f64) {
            let steps = self.step.advance(dt_ms);
            for _ in 0..steps {
                let input = self.input.take();
                if self.game.frame(input) == Flow::Quit {
                    self.running = false;
                    return;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = self.game.scene();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let scene = self.game.scene();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.game.state().score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match scene.text(OverlayKind::GameOverPrompt) {
                    Some(prompt) => {
                        let _ = el.set_attribute("class", "");
                        if let Some(text) = document.get_element_by_id("game-over-text") {
                            text.set_text_content(Some(&prompt.text));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Floppy Bird starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::load();
        let seed = seed_from_clock();
        let app = Rc::new(RefCell::new(App::new(tuning, seed)));

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_keyboard(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Floppy Bird running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(signal) = signal_for_dom_key(&event.key()) else {
                return;
            };
            // Keep Space and arrows from scrolling the page
            event.prevent_default();
            if event.repeat() {
                return;
            }
            if signal == InputSignal::Quit {
                log::info!("Escape pressed, stopping");
            }
            app.borrow_mut().input.push(signal);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt_ms = if a.last_time > 0.0 {
                time - a.last_time
            } else {
                0.0
            };
            a.last_time = time;

            a.update(dt_ms);
            if !a.running {
                log::info!("Game loop stopped");
                return;
            }
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let tuning_path = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Play { tuning }) => tuning,
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Ok(Command::Version) => {
            println!("floppy-bird {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'floppy-bird --help' for usage.");
            std::process::exit(2);
        }
    };

    if let Err(e) = native::run(tuning_path.as_deref()) {
        eprintln!("floppy-bird: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, PartialEq)]
enum Command {
    Play { tuning: Option<std::path::PathBuf> },
    Help,
    Version,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut tuning = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--tuning" => match args.next() {
                Some(path) => tuning = Some(path.into()),
                None => return Err("--tuning requires a file path".to_string()),
            },
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Play { tuning })
}

#[cfg(not(target_arch = "wasm32"))]
fn print_help() {
    println!("Floppy Bird - terminal edition\n");
    println!("Usage: floppy-bird [--tuning <path>]\n");
    println!("Options:");
    println!("  --tuning <path>  Load gameplay constants from a JSON file");
    println!("  --version        Show version information");
    println!("  --help           Show this help message\n");
    println!("Controls: Space/Up/Enter to jump or restart, Esc/q to quit");
    println!("Logs go to stderr; redirect it when setting RUST_LOG.");
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io;
    use std::path::Path;
    use std::time::Duration;

    use crossterm::event::{self, Event};

    use floppy_bird::Tuning;
    use floppy_bird::game::{Flow, Game};
    use floppy_bird::platform::{
        Clock, FramePacer, InputFrame, KeyEdgeFilter, SystemClock, seed_from_clock,
    };
    use floppy_bird::renderer::term::{TermCanvas, TerminalSession};

    pub fn run(tuning_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
        let tuning = Tuning::load(tuning_path)?;
        let mut pacer = FramePacer::new(tuning.frame_duration());
        let mut game = Game::new(tuning, seed_from_clock(), SystemClock::new());

        let mut stdout = io::stdout();
        // Restores the terminal when dropped, including on early `?` returns
        let _session = TerminalSession::enter(&mut stdout)?;
        let (cols, rows) = TerminalSession::size()?;
        let mut canvas = TermCanvas::new(stdout, cols, rows);
        let mut input = InputFrame::default();
        let mut keys = KeyEdgeFilter::default();

        loop {
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(signal) = keys.signal(&key, game.clock().now_ms()) {
                            input.push(signal);
                        }
                    }
                    Event::Resize(c, r) => canvas.resize(c, r),
                    _ => {}
                }
            }

            if game.frame(input.take()) == Flow::Quit {
                break;
            }

            canvas.draw(&game.scene())?;
            pacer.pace();
        }

        Ok(())
    }
}
