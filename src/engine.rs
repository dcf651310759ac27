//! Simulation engine
//!
//! Owns the configuration, the RNG, the current run (if any) and the event
//! log, and exposes the control surface the host UI calls:
//! `start`, `pause`, `reset`, `set_speed`, `set_time_step`.
//!
//! Misuse is tolerated: starting while running or pausing while idle does
//! nothing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::ConfigError;
use crate::event_log::{EventLog, LogLevel};
use crate::platform;
use crate::settings::{SimConfig, TimeStep, clamp_speed};
use crate::sim::{
    SimEvent, SimStats, SimulationState, TickParams, generate_population, tick,
};

/// The collision simulator
#[derive(Debug)]
pub struct SimulationEngine<R = Pcg32> {
    config: SimConfig,
    rng: R,
    /// Current run; `None` when idle
    run: Option<SimulationState>,
    log: EventLog,
}

impl SimulationEngine<Pcg32> {
    /// Create an engine seeded from the config (or the host clock)
    pub fn new(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| platform::now_ms() as u64);
        log::info!("Simulation engine seeded with {}", seed);
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Create an engine drawing all randomness from `rng`
    pub fn with_rng(config: SimConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            run: None,
            log: EventLog::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.run.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut SimulationState> {
        self.run.as_mut()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Current counters (all zero when idle)
    pub fn stats(&self) -> SimStats {
        self.run.as_ref().map(|run| run.stats).unwrap_or_default()
    }

    /// Wall-clock interval between ticks at the current speed
    pub fn tick_interval_ms(&self) -> f64 {
        crate::tick_interval_ms(self.config.speed)
    }

    /// Begin a new run with a fresh population. Returns false if a run is
    /// already active.
    pub fn start(&mut self) -> bool {
        if self.run.is_some() {
            log::debug!("start() ignored: simulation already running");
            return false;
        }

        let now = platform::now_ms();
        let mut run = SimulationState::new(now);
        let bounds = TickParams::from_config(&self.config).bounds;
        generate_population(
            &mut run,
            &mut self.rng,
            self.config.initial_population,
            bounds,
        );
        log::info!(
            "Simulation started: {} objects on {}x{}",
            run.objects.len(),
            bounds.x,
            bounds.y
        );

        self.run = Some(run);
        self.log.push(now, LogLevel::Info, "Simulation started");
        true
    }

    /// Stop and discard the current run. Returns false if nothing was running.
    pub fn pause(&mut self) -> bool {
        let Some(run) = self.run.take() else {
            return false;
        };
        log::info!("Simulation paused after {} ticks", run.time_ticks);
        self.log
            .push(platform::now_ms(), LogLevel::Warning, "Simulation paused");
        true
    }

    /// Stop any run and clear the log; the reset entry is the only one left
    pub fn reset(&mut self) {
        self.run = None;
        self.log.clear();
        self.log
            .push(platform::now_ms(), LogLevel::Info, "Simulation reset");
        log::info!("Simulation reset");
    }

    /// Set the speed multiplier, clamped to 1..=10. Returns the value applied.
    pub fn set_speed(&mut self, speed: u32) -> u32 {
        let clamped = clamp_speed(speed);
        if clamped != speed {
            log::warn!("Speed {} out of range, using {}", speed, clamped);
        }
        self.config.speed = clamped;
        clamped
    }

    pub fn set_time_step(&mut self, step: TimeStep) {
        self.config.time_step = step;
    }

    /// Set the time step from seconds; unsupported values leave it unchanged
    pub fn set_time_step_secs(&mut self, secs: u32) -> Result<(), ConfigError> {
        let step = TimeStep::try_from(secs).inspect_err(|e| log::warn!("{}", e))?;
        self.set_time_step(step);
        Ok(())
    }

    /// Resize the simulation extent (takes effect on the next tick)
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.config.set_canvas_size(width, height);
    }

    /// Advance the active run by one tick and record its events in the log.
    /// Does nothing while idle.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };

        let params = TickParams::from_config(&self.config);
        let events = tick(run, &params, &mut self.rng);

        let now = platform::now_ms();
        for event in &events {
            let (level, message) = describe(event);
            self.log.push(now, level, message);
        }
        events
    }
}

/// Log level and message for a tick event
pub fn describe(event: &SimEvent) -> (LogLevel, String) {
    match event {
        SimEvent::Collision {
            first,
            second,
            fragments,
            ..
        } => (
            LogLevel::Danger,
            format!(
                "Collision: {} ↔ {} ({} fragments)",
                first,
                second,
                fragments.len()
            ),
        ),
        SimEvent::CloseApproach {
            first,
            second,
            distance,
        } => (
            LogLevel::Warning,
            format!("Close approach: {} ↔ {} ({:.1}px)", first, second, distance),
        ),
    }
}
