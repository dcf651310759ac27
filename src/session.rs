//! Simulator session
//!
//! Binds an engine to a host UI. Each control call updates the host panels;
//! each `step` runs one tick, then redraws, refreshes stats and the log, and
//! raises collision alerts unless muted. The host owns the timer and calls `step` every
//! `tick_interval_ms`.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::engine::SimulationEngine;
use crate::error::ConfigError;
use crate::platform::Host;
use crate::renderer::RenderAdapter;
use crate::sim::SimEvent;

pub struct Session<H: Host, R = Pcg32> {
    engine: SimulationEngine<R>,
    renderer: RenderAdapter,
    host: H,
    alerts_muted: bool,
}

impl<H: Host, R: Rng> Session<H, R> {
    /// Wrap an engine and draw the idle scene
    pub fn new(engine: SimulationEngine<R>, host: H) -> Self {
        let config = engine.config();
        let renderer = RenderAdapter::new(config.canvas_width, config.canvas_height);
        let mut session = Self {
            engine,
            renderer,
            host,
            alerts_muted: false,
        };
        session.redraw();
        session
    }

    pub fn engine(&self) -> &SimulationEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine<R> {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn alerts_muted(&self) -> bool {
        self.alerts_muted
    }

    /// Flip collision alerts on or off. Returns true if now muted.
    pub fn toggle_alerts(&mut self) -> bool {
        self.alerts_muted = !self.alerts_muted;
        log::info!(
            "Collision alerts {}",
            if self.alerts_muted { "muted" } else { "on" }
        );
        self.alerts_muted
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.engine.tick_interval_ms()
    }

    /// Start a run; the host should begin its timer when this returns true
    pub fn start(&mut self) -> bool {
        let started = self.engine.start();
        if started {
            self.redraw();
            self.host.show_stats(&self.engine.stats());
        }
        self.host.show_log(self.engine.log().entries());
        started
    }

    /// Stop the run; the host should cancel its timer. The last frame stays.
    pub fn pause(&mut self) -> bool {
        let paused = self.engine.pause();
        if paused {
            self.host.show_log(self.engine.log().entries());
        }
        paused
    }

    /// Stop the run, blank the scene, zero the stats and clear the log
    pub fn reset(&mut self) {
        self.engine.reset();
        self.redraw();
        self.host.show_stats(&self.engine.stats());
        self.host.show_log(self.engine.log().entries());
    }

    /// Change speed. Returns true if a running host timer must be
    /// rescheduled at the new `tick_interval_ms`.
    pub fn set_speed(&mut self, speed: u32) -> bool {
        let before = self.engine.config().speed;
        self.engine.set_speed(speed) != before && self.engine.is_running()
    }

    pub fn set_time_step_secs(&mut self, secs: u32) -> Result<(), ConfigError> {
        self.engine.set_time_step_secs(secs)
    }

    /// Match the simulation extent to a resized surface
    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.set_canvas_size(width, height);
        let config = self.engine.config();
        self.renderer
            .resize(config.canvas_width, config.canvas_height);
        self.redraw();
    }

    /// Run one tick and push its results to the host
    pub fn step(&mut self) -> Vec<SimEvent> {
        if !self.engine.is_running() {
            return Vec::new();
        }

        let events = self.engine.tick();
        self.redraw();
        self.host.show_stats(&self.engine.stats());

        if !events.is_empty() {
            self.host.show_log(self.engine.log().entries());
        }
        if !self.alerts_muted {
            for event in &events {
                if matches!(event, SimEvent::Collision { .. }) {
                    self.host.collision_alert();
                }
            }
        }
        events
    }

    fn redraw(&mut self) {
        let frame = self.renderer.render(self.engine.state());
        self.host.draw(&frame);
    }
}
