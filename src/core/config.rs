//! Simulation configuration with documented constants
//!
//! All tunable numbers are collected here. Values are loaded from TOML
//! (every field optional, falling back to defaults) and validated at the
//! boundary before an engine ever sees them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::error::{FleetError, Result};

/// Shortest wall-clock gap the scheduler will tick at
pub const MIN_EFFECTIVE_PERIOD: Duration = Duration::from_millis(1);
/// Longest wall-clock gap the scheduler will tick at
pub const MAX_EFFECTIVE_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Top-level configuration for a fleet simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the engine RNG. Restarts re-seed from this value.
    pub seed: u64,

    /// Target number of vehicles in the fleet
    pub fleet_size: usize,

    /// Base wall-clock period between ticks (milliseconds)
    ///
    /// The scheduler divides this by `speed_multiplier`.
    pub tick_period_ms: u64,

    /// Playback speed. 2.0 ticks twice as often as 1.0.
    pub speed_multiplier: f64,

    pub clock: ClockConfig,
    pub dynamics: DynamicsConfig,
    pub advisor: AdvisorConfig,
}

/// Simulated local time, used for rush-hour detection and log timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Local hour at tick 0 (0-23)
    pub start_hour: u32,
    /// Local minute at tick 0 (0-59)
    pub start_minute: u32,
    /// Simulated minutes that pass per tick. 0 freezes the clock.
    pub minutes_per_tick: u32,
}

/// Inclusive window of local hours, e.g. 8..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour <= self.end
    }
}

/// Per-tick state drift parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Displacement per tick for moving vehicles (degrees)
    pub move_distance: f64,

    /// Chance per vehicle per tick of drawing a new status
    pub status_flip_chance: f64,

    /// Chance per traffic record per tick of a new congestion level
    pub traffic_shift_chance: f64,

    /// Chance per tick that temperature and wind drift
    pub weather_drift_chance: f64,

    /// Maximum temperature change per drift (°C, symmetric)
    pub temperature_step: f64,

    /// Maximum wind change per drift (km/h, symmetric)
    pub wind_step: f64,

    /// Local-hour windows with rising demand
    pub rush_hours: Vec<HourWindow>,

    /// Requests added per zone per rush-hour tick are drawn from 0..rush_increment
    pub rush_increment: u32,

    /// Requests removed per zone per off-peak tick are drawn from 0..calm_decrement
    pub calm_decrement: u32,
}

/// Threshold rules and filler channel of the decision advisor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Rule 1 fires when high-demand zones exceed this count...
    pub high_zone_threshold: usize,
    /// ...and available vehicles are below this count
    pub low_availability_threshold: usize,
    /// Rule 2 fires when high-congestion areas exceed this count
    pub congestion_threshold: usize,
    /// Rule 3 fires when available vehicles exceed this share of the fleet
    pub excess_availability_ratio: f64,
    /// Chance per invocation of appending a filler decision
    pub filler_chance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fleet_size: 25,
            tick_period_ms: 3000,
            speed_multiplier: 1.0,
            clock: ClockConfig::default(),
            dynamics: DynamicsConfig::default(),
            advisor: AdvisorConfig::default(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_hour: 8,
            start_minute: 0,
            minutes_per_tick: 1,
        }
    }
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            move_distance: 0.001,
            status_flip_chance: 0.02,
            traffic_shift_chance: 0.05,
            weather_drift_chance: 0.02,
            temperature_step: 2.0,
            wind_step: 3.0,
            // Morning and evening rush
            rush_hours: vec![HourWindow::new(8, 10), HourWindow::new(17, 19)],
            rush_increment: 3,
            calm_decrement: 2,
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            high_zone_threshold: 2,
            low_availability_threshold: 5,
            congestion_threshold: 1,
            excess_availability_ratio: 0.6,
            filler_chance: 0.3,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Period between scheduled ticks after applying the speed multiplier
    /// Base period divided by the speed multiplier, clamped to [`MIN_EFFECTIVE_PERIOD`, `MAX_EFFECTIVE_PERIOD`]
    pub fn effective_period(&self) -> Duration {
        let secs = self.tick_period().as_secs_f64() / self.speed_multiplier;
        Duration::try_from_secs_f64(secs)
            .unwrap_or(MAX_EFFECTIVE_PERIOD)
            .clamp(MIN_EFFECTIVE_PERIOD, MAX_EFFECTIVE_PERIOD)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_fleet_size(self.fleet_size)?;
        validate_tick_period(self.tick_period())?;
        validate_speed_multiplier(self.speed_multiplier)?;

        if self.clock.start_hour > 23 || self.clock.start_minute > 59 {
            return Err(FleetError::InvalidConfig(format!(
                "clock start {:02}:{:02} is not a valid time of day",
                self.clock.start_hour, self.clock.start_minute
            )));
        }

        for window in &self.dynamics.rush_hours {
            if window.start > window.end || window.end > 23 {
                return Err(FleetError::InvalidConfig(format!(
                    "rush hour window {}..={} must be ordered hours within 0..=23",
                    window.start, window.end
                )));
            }
        }

        let chances = [
            ("status_flip_chance", self.dynamics.status_flip_chance),
            ("traffic_shift_chance", self.dynamics.traffic_shift_chance),
            ("weather_drift_chance", self.dynamics.weather_drift_chance),
            ("filler_chance", self.advisor.filler_chance),
            ("excess_availability_ratio", self.advisor.excess_availability_ratio),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(FleetError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        let magnitudes = [
            ("move_distance", self.dynamics.move_distance),
            ("temperature_step", self.dynamics.temperature_step),
            ("wind_step", self.dynamics.wind_step),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(FleetError::InvalidConfig(format!(
                    "{} ({}) must be a non-negative finite number",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

pub fn validate_fleet_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(FleetError::InvalidFleetSize(size));
    }
    Ok(())
}

/// Periods are stored as whole milliseconds. Returns the stored value;
/// anything under 1ms or beyond `u64::MAX` milliseconds is rejected.
pub fn validate_tick_period(period: Duration) -> Result<u64> {
    match u64::try_from(period.as_millis()) {
        Ok(millis) if millis > 0 => Ok(millis),
        _ => Err(FleetError::InvalidTickPeriod(period)),
    }
}

pub fn validate_speed_multiplier(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(FleetError::InvalidSpeedMultiplier(speed));
    }
    Ok(())
}
