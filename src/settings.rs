//! Simulation configuration
//!
//! Set before or during a run; the engine reads it at the start of each tick.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Simulated seconds advanced per tick (before speed scaling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeStep {
    #[default]
    OneMinute,
    FiveMinutes,
    TenMinutes,
    OneHour,
}

impl TimeStep {
    pub const ALL: [TimeStep; 4] = [
        TimeStep::OneMinute,
        TimeStep::FiveMinutes,
        TimeStep::TenMinutes,
        TimeStep::OneHour,
    ];

    pub fn secs(&self) -> u32 {
        match self {
            TimeStep::OneMinute => 60,
            TimeStep::FiveMinutes => 300,
            TimeStep::TenMinutes => 600,
            TimeStep::OneHour => 3600,
        }
    }
}

impl TryFrom<u32> for TimeStep {
    type Error = ConfigError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        TimeStep::ALL
            .into_iter()
            .find(|step| step.secs() == secs)
            .ok_or(ConfigError::InvalidTimeStep(secs))
    }
}

impl From<TimeStep> for u32 {
    fn from(step: TimeStep) -> u32 {
        step.secs()
    }
}

fn valid_extent(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Clamp a requested speed multiplier into the supported range
pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Canvas extent the objects are bounded to
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Wall-clock and sim-clock multiplier (1..=10)
    pub speed: u32,
    pub time_step: TimeStep,
    pub close_approach_threshold: f32,
    /// Objects generated on start
    pub initial_population: usize,
    /// Fragments are not spawned past this many active objects
    pub max_active_objects: usize,
    /// Engine RNG seed (host clock when absent)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            speed: MIN_SPEED,
            time_step: TimeStep::default(),
            close_approach_threshold: CLOSE_APPROACH_THRESHOLD,
            initial_population: INITIAL_POPULATION,
            max_active_objects: MAX_ACTIVE_OBJECTS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: SimConfig = serde_json::from_str(json)?;
        config.speed = clamp_speed(config.speed);
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !valid_extent(self.canvas_width) || !valid_extent(self.canvas_height) {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !(self.close_approach_threshold.is_finite() && self.close_approach_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(self.close_approach_threshold));
        }
        if self.max_active_objects < self.initial_population.saturating_add(FRAGMENTS_MAX as usize) {
            return Err(ConfigError::InvalidPopulation {
                initial: self.initial_population,
                max: self.max_active_objects,
            });
        }
        Ok(())
    }

    /// Resize the canvas extent (ignores non-positive or non-finite sizes)
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        if valid_extent(width) && valid_extent(height) {
            self.canvas_width = width;
            self.canvas_height = height;
        }
    }

    /// Simulated seconds per tick after speed scaling
    pub fn sim_seconds_per_tick(&self) -> u64 {
        u64::from(self.time_step.secs()) * u64::from(self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_step_from_secs() {
        assert_eq!(TimeStep::try_from(3600).unwrap(), TimeStep::OneHour);
        assert_eq!(TimeStep::try_from(300).unwrap(), TimeStep::FiveMinutes);
        assert!(matches!(
            TimeStep::try_from(120),
            Err(ConfigError::InvalidTimeStep(120))
        ));
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(0), 1);
        assert_eq!(clamp_speed(5), 5);
        assert_eq!(clamp_speed(42), 10);
    }

    #[test]
    fn test_from_json_defaults_and_overrides() {
        let config = SimConfig::from_json(r#"{ "speed": 3, "time_step": 600, "seed": 7 }"#).unwrap();
        assert_eq!(config.speed, 3);
        assert_eq!(config.time_step, TimeStep::TenMinutes);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.canvas_height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(config.initial_population, INITIAL_POPULATION);
    }

    #[test]
    fn test_from_json_clamps_speed() {
        let config = SimConfig::from_json(r#"{ "speed": 99 }"#).unwrap();
        assert_eq!(config.speed, MAX_SPEED);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "time_step": 61 }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "canvas_width": 0 }"#),
            Err(ConfigError::InvalidCanvas { .. })
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "close_approach_threshold": -1 }"#),
            Err(ConfigError::InvalidThreshold(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "max_active_objects": 0 }"#),
            Err(ConfigError::InvalidPopulation { initial: 20, max: 0 })
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "initial_population": 500 }"#),
            Err(ConfigError::InvalidPopulation { initial: 500, max: 400 })
        ));
        // Just enough room for the population and one collision
        assert!(SimConfig::from_json(r#"{ "initial_population": 10, "max_active_objects": 17 }"#).is_ok());
    }

    #[test]
    fn test_set_canvas_size_ignores_bad_extents() {
        let mut config = SimConfig::default();
        config.set_canvas_size(f32::INFINITY, 300.0);
        config.set_canvas_size(640.0, f32::NAN);
        config.set_canvas_size(0.0, 300.0);
        assert_eq!(
            (config.canvas_width, config.canvas_height),
            (DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
        );

        config.set_canvas_size(640.0, 300.0);
        assert_eq!((config.canvas_width, config.canvas_height), (640.0, 300.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sim_seconds_per_tick() {
        let config = SimConfig {
            speed: 4,
            time_step: TimeStep::FiveMinutes,
            ..Default::default()
        };
        assert_eq!(config.sim_seconds_per_tick(), 1200);
    }
}
