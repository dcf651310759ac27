//! SpaceSense - orbital debris collision simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (objects, physics, collisions)
//! - `engine`: Command interface and run lifecycle
//! - `event_log`: Bounded, newest-first event log
//! - `renderer`: Snapshot to 2D canvas frame
//! - `platform`: Host collaborators, clock and tick timer
//! - `session`: Engine + host wiring for one dashboard panel
//! - `settings`: Simulation configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod error;
pub mod event_log;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use engine::SimulationEngine;
pub use error::ConfigError;
pub use event_log::{EventLog, LogEntry, LogLevel};
pub use session::Session;
pub use settings::{SimConfig, TimeStep};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default canvas extent (canvas units)
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 400.0;

    /// Logical ticks per second at speed 1
    pub const BASE_TICK_RATE_HZ: f64 = 30.0;

    /// Speed multiplier range
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 10;

    /// Initial population
    pub const INITIAL_POPULATION: usize = 20;
    /// Probability that a generated object is debris rather than a satellite
    pub const DEBRIS_PROBABILITY: f64 = 0.3;
    /// Initial velocity component range (canvas units per tick)
    pub const INITIAL_SPEED_RANGE: f32 = 1.0;
    /// Initial radius range
    pub const INITIAL_RADIUS_MIN: f32 = 2.0;
    pub const INITIAL_RADIUS_MAX: f32 = 7.0;

    /// Fragments spawned per collision (inclusive)
    pub const FRAGMENTS_MIN: u32 = 3;
    pub const FRAGMENTS_MAX: u32 = 7;
    /// Fragment velocity component range
    pub const FRAGMENT_SPEED_RANGE: f32 = 2.0;
    /// Fragment radius range
    pub const FRAGMENT_RADIUS_MIN: f32 = 1.0;
    pub const FRAGMENT_RADIUS_MAX: f32 = 3.0;

    /// Center distance below which a non-overlapping pair is a close approach
    pub const CLOSE_APPROACH_THRESHOLD: f32 = 20.0;

    /// Active object cap (fragments beyond it are not spawned)
    pub const MAX_ACTIVE_OBJECTS: usize = 400;
    /// Inactive objects kept in the backing store before pruning
    pub const PRUNE_THRESHOLD: usize = 256;

    /// Event log capacity
    pub const EVENT_LOG_CAPACITY: usize = 10;
}

/// Midpoint between two positions
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Tick interval in milliseconds for a speed multiplier
#[inline]
pub fn tick_interval_ms(speed: u32) -> f64 {
    1000.0 / (consts::BASE_TICK_RATE_HZ * speed.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_scales_with_speed() {
        assert!((tick_interval_ms(1) - 1000.0 / 30.0).abs() < 1e-9);
        assert!((tick_interval_ms(10) - 1000.0 / 300.0).abs() < 1e-9);
        // Zero is treated as speed 1
        assert_eq!(tick_interval_ms(0), tick_interval_ms(1));
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(Vec2::new(0.0, 0.0), Vec2::new(8.0, 4.0));
        assert_eq!(m, Vec2::new(4.0, 2.0));
    }
}
