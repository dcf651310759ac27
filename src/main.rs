//! SpaceSense collision simulator entry point
//!
//! In the browser, wires the dashboard panel's controls to a `Session` and
//! drives it from an interval timer. Natively, runs a headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

    use spacesense::audio::AlertPlayer;
    use spacesense::platform::timer::Interval;
    use spacesense::platform::{Host, format_clock, now_ms};
    use spacesense::renderer::{CanvasSurface, Frame};
    use spacesense::sim::SimStats;
    use spacesense::{LogEntry, Session, SimConfig, SimulationEngine};

    const CANVAS_ID: &str = "simulatorCanvas";

    /// Dashboard panel elements
    struct DomHost {
        surface: Option<CanvasSurface>,
        alert: AlertPlayer,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    impl Host for DomHost {
        fn draw(&mut self, frame: &Frame) {
            if let Some(surface) = &self.surface {
                surface.draw(frame);
            }
        }

        fn show_stats(&mut self, stats: &SimStats) {
            let Some(document) = document() else { return };
            set_text(&document, "simTime", &stats.elapsed_label());
            set_text(&document, "simCollisions", &stats.collision_count.to_string());
            set_text(&document, "simApproaches", &stats.close_approach_count.to_string());
            set_text(&document, "simDebris", &stats.debris_generated_count.to_string());
        }

        fn show_log(&mut self, entries: &[LogEntry]) {
            let Some(document) = document() else { return };
            let Some(container) = document.get_element_by_id("logEntries") else {
                return;
            };
            container.set_inner_html("");

            for entry in entries {
                let Ok(row) = document.create_element("div") else { continue };
                row.set_class_name(&entry.level.css_class());

                if let Ok(time) = document.create_element("span") {
                    time.set_class_name("log-time");
                    time.set_text_content(Some(&format_clock(entry.timestamp_ms)));
                    let _ = row.append_child(&time);
                }
                if let Ok(message) = document.create_element("span") {
                    message.set_class_name("log-message");
                    message.set_text_content(Some(&entry.message));
                    let _ = row.append_child(&message);
                }
                let _ = container.append_child(&row);
            }
        }

        fn collision_alert(&mut self) {
            self.alert.play_alert(now_ms());
        }
    }

    /// Session plus the timer driving it
    struct App {
        session: RefCell<Session<DomHost>>,
        timer: RefCell<Option<Interval>>,
    }

    /// (Re)start the tick timer at the session's current interval
    fn schedule_ticks(app: &Rc<App>) {
        let period = app.session.borrow().tick_interval_ms();
        let tick_app: Weak<App> = Rc::downgrade(app);
        let interval = Interval::start(period, move || {
            if let Some(app) = tick_app.upgrade() {
                app.session.borrow_mut().step();
            }
        });
        // Replacing the old interval cancels it
        *app.timer.borrow_mut() = interval;
    }

    fn stop_ticks(app: &App) {
        app.timer.borrow_mut().take();
    }

    fn on_event(id: &str, event: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing #{} - control not wired", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(app: &Rc<App>) {
        {
            let app = app.clone();
            on_event("runSimulation", "click", move || {
                if app.session.borrow_mut().start() {
                    schedule_ticks(&app);
                }
            });
        }
        {
            let app = app.clone();
            on_event("pauseSimulation", "click", move || {
                stop_ticks(&app);
                app.session.borrow_mut().pause();
            });
        }
        {
            let app = app.clone();
            on_event("resetSimulation", "click", move || {
                stop_ticks(&app);
                app.session.borrow_mut().reset();
            });
        }
        {
            let app = app.clone();
            on_event("toggleSound", "click", move || {
                let muted = app.session.borrow_mut().toggle_alerts();
                let Some(button) = document().and_then(|d| d.get_element_by_id("toggleSound"))
                else {
                    return;
                };
                let _ = button.class_list().toggle_with_force("active", !muted);
                button.set_inner_html(if muted {
                    "<i class=\"fas fa-volume-mute\"></i><span>Sound</span>"
                } else {
                    "<i class=\"fas fa-volume-up\"></i><span>Sound</span>"
                });
            });
        }
        {
            let app = app.clone();
            on_event("simSpeed", "input", move || {
                let Some(document) = document() else { return };
                let Some(input) = document
                    .get_element_by_id("simSpeed")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let Ok(speed) = input.value().parse::<u32>() else {
                    log::warn!("Ignoring speed input {:?}", input.value());
                    return;
                };
                let reschedule = app.session.borrow_mut().set_speed(speed);
                if reschedule {
                    schedule_ticks(&app);
                }
                let applied = app.session.borrow().engine().config().speed;
                set_text(&document, "simSpeedValue", &format!("{}x", applied));
            });
        }
        {
            let app = app.clone();
            on_event("timeStep", "change", move || {
                let Some(select) = document()
                    .and_then(|d| d.get_element_by_id("timeStep"))
                    .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                else {
                    return;
                };
                match select.value().parse::<u32>() {
                    Ok(secs) => {
                        // Rejected steps are logged and leave the current one
                        let _ = app.session.borrow_mut().set_time_step_secs(secs);
                    }
                    Err(_) => log::warn!("Ignoring time step {:?}", select.value()),
                }
            });
        }
    }

    fn setup_resize(app: &Rc<App>, height: u32) {
        let Some(window) = web_sys::window() else { return };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut session = app.session.borrow_mut();
            let Some(size) = session
                .host()
                .surface
                .as_ref()
                .map(|s| s.fit_to_container(height))
            else {
                return;
            };
            session.resize(size.0, size.1);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Read the optional JSON config from the canvas `data-sim-config`
    fn load_config(surface: Option<&CanvasSurface>) -> SimConfig {
        let Some(json) = surface.and_then(|s| s.canvas.get_attribute("data-sim-config")) else {
            return SimConfig::default();
        };
        SimConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring simulator config: {}", e);
            SimConfig::default()
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("SpaceSense collision simulator starting...");

        let surface = CanvasSurface::from_element_id(CANVAS_ID);
        if surface.is_none() {
            log::warn!("No #{} canvas - drawing disabled", CANVAS_ID);
        }

        let mut config = load_config(surface.as_ref());
        let height = config.canvas_height as u32;
        if let Some(surface) = &surface {
            let (w, h) = surface.fit_to_container(height);
            config.set_canvas_size(w, h);
        }

        let engine = SimulationEngine::new(config);
        let host = DomHost {
            surface,
            alert: AlertPlayer::new(),
        };
        let app = Rc::new(App {
            session: RefCell::new(Session::new(engine, host)),
            timer: RefCell::new(None),
        });

        setup_controls(&app);
        setup_resize(&app, height);

        log::info!("SpaceSense collision simulator ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;

    use spacesense::platform::{Host, format_clock};
    use spacesense::renderer::Frame;
    use spacesense::sim::SimStats;
    use spacesense::{ConfigError, LogEntry, Session, SimConfig, SimulationEngine};

    /// Headless collision simulator run
    #[derive(Parser, Debug)]
    #[command(name = "spacesense")]
    pub struct Args {
        /// JSON config file
        #[arg(short, long)]
        pub config: Option<PathBuf>,
        /// RNG seed (overrides config)
        #[arg(short, long)]
        pub seed: Option<u64>,
        /// Ticks to run
        #[arg(short, long, default_value_t = 300)]
        pub ticks: u64,
        /// Speed multiplier 1-10 (overrides config)
        #[arg(long)]
        pub speed: Option<u32>,
        /// Time step seconds: 60, 300, 600 or 3600 (overrides config)
        #[arg(long)]
        pub time_step: Option<u32>,
        /// Sleep between ticks at the wall-clock tick rate
        #[arg(long)]
        pub realtime: bool,
    }

    /// Prints new log entries and keeps the latest stats
    #[derive(Default)]
    struct ConsoleHost {
        last_entry: Option<LogEntry>,
        stats: SimStats,
        frames: u64,
    }

    impl Host for ConsoleHost {
        fn draw(&mut self, frame: &Frame) {
            self.frames += 1;
            log::trace!("Frame {}: {} objects", self.frames, frame.circle_count());
        }

        fn show_stats(&mut self, stats: &SimStats) {
            self.stats = *stats;
        }

        fn show_log(&mut self, entries: &[LogEntry]) {
            let unseen = match &self.last_entry {
                Some(last) => entries.iter().position(|e| e == last).unwrap_or(entries.len()),
                None => entries.len(),
            };
            for entry in entries[..unseen].iter().rev() {
                println!(
                    "[{}] {:<7} {}",
                    format_clock(entry.timestamp_ms),
                    entry.level.as_str(),
                    entry.message
                );
            }
            self.last_entry = entries.first().cloned();
        }
    }

    pub fn run(args: Args) -> Result<(), ConfigError> {
        let mut config = match &args.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }

        let mut engine = SimulationEngine::new(config);
        if let Some(speed) = args.speed {
            engine.set_speed(speed);
        }
        if let Some(secs) = args.time_step {
            engine.set_time_step_secs(secs)?;
        }

        let mut session = Session::new(engine, ConsoleHost::default());
        session.start();
        let interval = Duration::from_secs_f64(session.tick_interval_ms() / 1000.0);
        for _ in 0..args.ticks {
            session.step();
            if args.realtime {
                std::thread::sleep(interval);
            }
        }

        let stats = session.host().stats;
        let active = session
            .engine()
            .state()
            .map(|s| s.active_count())
            .unwrap_or(0);
        println!();
        println!("Time elapsed:        {}", stats.elapsed_label());
        println!("Collisions detected: {}", stats.collision_count);
        println!("Close approaches:    {}", stats.close_approach_count);
        println!("Debris generated:    {}", stats.debris_generated_count);
        println!("Active objects:      {}", active);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), spacesense::ConfigError> {
    use clap::Parser;

    env_logger::init();
    log::info!("SpaceSense collision simulator (native) starting...");
    native::run(native::Args::parse())
}
