//! City weather
//!
//! A single weather record per engine. Conditions drift occasionally in
//! small steps and are clamped so they never leave their ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const TEMPERATURE_MIN: f64 = 20.0;
pub const TEMPERATURE_MAX: f64 = 40.0;
pub const WIND_SPEED_MIN: f64 = 0.0;
pub const WIND_SPEED_MAX: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    /// Degrees Celsius, within [TEMPERATURE_MIN, TEMPERATURE_MAX]
    pub temperature: f64,
    pub condition: String,
    /// Relative humidity percent
    pub humidity: u8,
    /// km/h, within [WIND_SPEED_MIN, WIND_SPEED_MAX]
    pub wind_speed: f64,
    /// mm
    pub precipitation: f64,
}

impl WeatherState {
    pub fn new() -> Self {
        Self {
            temperature: 32.0,
            condition: "Partly Cloudy".to_string(),
            humidity: 78,
            wind_speed: 12.0,
            precipitation: 0.0,
        }
    }

    /// With probability `chance`, perturb temperature by up to
    /// `temperature_step` and wind by up to `wind_step` in either direction.
    /// Returns true when the weather moved.
    pub fn drift<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        chance: f64,
        temperature_step: f64,
        wind_step: f64,
    ) -> bool {
        if rng.gen::<f64>() >= chance {
            return false;
        }

        self.temperature = (self.temperature + symmetric(rng, temperature_step))
            .clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);
        self.wind_speed =
            (self.wind_speed + symmetric(rng, wind_step)).clamp(WIND_SPEED_MIN, WIND_SPEED_MAX);
        true
    }
}

impl Default for WeatherState {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform draw from [-step, step)
fn symmetric<R: Rng + ?Sized>(rng: &mut R, step: f64) -> f64 {
    rng.gen::<f64>() * 2.0 * step - step
}
